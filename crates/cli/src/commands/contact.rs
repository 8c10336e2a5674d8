//! `rr contact ...`

use std::io::Write;

use registrar::ContactRequest;

use super::{or_empty, Context};
use crate::args::{ContactCommand, ContactFields};
use crate::report::CliError;

pub(crate) async fn run<W: Write>(ctx: &mut Context<W>, command: ContactCommand) -> anyhow::Result<()> {
    let customer = ctx.customer()?;
    let api = ctx.api()?;
    match command {
        ContactCommand::List { paging } => {
            let page = api.list_contacts(&customer, &paging.into()).await?;
            let rows: Vec<Vec<String>> = page
                .entities
                .iter()
                .map(|c| {
                    vec![
                        c.handle.to_string(),
                        c.name.clone(),
                        or_empty(c.organization.as_ref()),
                        c.email.clone(),
                        c.country.clone(),
                    ]
                })
                .collect();
            ctx.printer
                .rows(&page, &["HANDLE", "NAME", "ORGANIZATION", "EMAIL", "COUNTRY"], &rows)
        }
        ContactCommand::Get { handle } => {
            let contact = api.get_contact(&customer, &handle).await?;
            let pairs = [
                ("Handle", contact.handle.to_string()),
                ("Name", contact.name.clone()),
                ("Organization", or_empty(contact.organization.as_ref())),
                ("Email", contact.email.clone()),
                ("Phone", contact.phone.clone()),
                ("Address", contact.address_line.join(", ")),
                ("City", format!("{} {}", contact.postal_code, contact.city)),
                ("Country", contact.country.clone()),
            ];
            ctx.printer.record(&contact, &pairs)
        }
        ContactCommand::Create { handle, fields } => {
            let missing = fields.missing_for_create();
            if !missing.is_empty() {
                return Err(CliError::Usage(format!("missing --{}", missing.join(", --"))).into());
            }
            api.create_contact(&customer, &handle, &fields.into()).await?;
            ctx.printer.done(&format!("Created contact {handle}"))
        }
        ContactCommand::Update { handle, fields } => {
            let request = ContactRequest::from(fields);
            if request == ContactRequest::default() {
                return Err(CliError::Usage("nothing to update".to_string()).into());
            }
            api.update_contact(&customer, &handle, &request).await?;
            ctx.printer.done(&format!("Updated contact {handle}"))
        }
        ContactCommand::Delete { handle } => {
            api.delete_contact(&customer, &handle).await?;
            ctx.printer.done(&format!("Deleted contact {handle}"))
        }
    }
}

impl ContactFields {
    /// Flags `contact create` cannot do without, by flag name.
    fn missing_for_create(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("postal", &self.postal_code),
            ("country", &self.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(flag, _)| flag)
        .collect()
    }
}

impl From<ContactFields> for ContactRequest {
    fn from(fields: ContactFields) -> Self {
        ContactRequest {
            name: fields.name.unwrap_or_default(),
            organization: fields.organization,
            email: fields.email.unwrap_or_default(),
            phone: fields.phone.unwrap_or_default(),
            fax: None,
            address_line: fields.address.into_iter().collect(),
            city: fields.city.unwrap_or_default(),
            state: fields.state,
            postal_code: fields.postal_code.unwrap_or_default(),
            country: fields.country.map(|c| c.to_uppercase()).unwrap_or_default(),
        }
    }
}
