//! `rr domain ...`

use std::io::Write;

use isproxy::{open_tls, split_domain, IsProxyClient};
use registrar::{
    ApiKey, CheckResult, DomainListOptions, DomainName, Process, RegisterRequest, TransferRequest,
    UpdateRequest,
};
use rust_decimal::Decimal;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::{or_empty, Context};
use crate::args::DomainCommand;
use crate::output::yes_no;
use crate::report::CliError;

/// Upper bound on names accepted by one `check-bulk` invocation.
pub(crate) const MAX_BULK_DOMAINS: usize = 50;

pub(crate) async fn run<W: Write>(ctx: &mut Context<W>, command: DomainCommand) -> anyhow::Result<()> {
    match command {
        DomainCommand::List {
            paging,
            status,
            expiring_within,
            order,
        } => {
            let options = DomainListOptions {
                list: paging.into(),
                status,
                expiring_within,
                order,
            };
            list(ctx, &options).await
        }
        DomainCommand::Get { domain } => get(ctx, &domain).await,
        DomainCommand::Check { domain } => check(ctx, &domain).await,
        DomainCommand::CheckBulk { domains } => check_bulk(ctx, &domains).await,
        DomainCommand::Renew { domain, period } => renew(ctx, &domain, period).await,
        DomainCommand::Delete { domain } => {
            ctx.api()?.delete_domain(&domain).await?;
            ctx.printer.done(&format!("Deleted {domain}"))
        }
        DomainCommand::Register {
            domain,
            registrant,
            period,
            name_servers,
            auto_renew,
            privacy,
        } => {
            let request = RegisterRequest {
                period: Some(period),
                registrant: registrant.to_string(),
                name_servers,
                auto_renew: Some(auto_renew),
                privacy_proxy: privacy.then_some(true),
                ..Default::default()
            };
            let process = ctx.api()?.register_domain(&domain, &request).await?;
            print_process(ctx, &process)
        }
        DomainCommand::Update {
            domain,
            registrant,
            name_servers,
            auto_renew,
        } => {
            let request = UpdateRequest {
                registrant: registrant.map(|h| h.to_string()),
                name_servers,
                auto_renew,
                ..Default::default()
            };
            if request == UpdateRequest::default() {
                return Err(CliError::Usage(
                    "nothing to update; pass --registrant, --ns or --auto-renew".to_string(),
                )
                .into());
            }
            ctx.api()?.update_domain(&domain, &request).await?;
            ctx.printer.done(&format!("Updated {domain}"))
        }
        DomainCommand::TransferIn {
            domain,
            auth_code,
            registrant,
            auto_renew,
        } => {
            let request = TransferRequest {
                auth_code,
                registrant: registrant.map(|h| h.to_string()),
                auto_renew: Some(auto_renew),
            };
            let process = ctx.api()?.transfer_domain(&domain, &request).await?;
            print_process(ctx, &process)
        }
        DomainCommand::TransferStatus { domain } => {
            let domain = ctx.api()?.get_domain(&domain).await?;
            let pairs = [
                ("Domain", domain.domain_name.to_string()),
                ("Status", domain.status.join(", ")),
            ];
            ctx.printer.record(&domain, &pairs)
        }
    }
}

async fn list<W: Write>(ctx: &mut Context<W>, options: &DomainListOptions) -> anyhow::Result<()> {
    let page = ctx.api()?.list_domains(options).await?;
    let rows: Vec<Vec<String>> = page
        .entities
        .iter()
        .map(|d| {
            vec![
                d.domain_name.to_string(),
                or_empty(d.status.first()),
                or_empty(d.expiry_date.map(|t| t.date())),
                yes_no(d.auto_renew),
            ]
        })
        .collect();
    ctx.printer.rows(&page, &["NAME", "STATUS", "EXPIRY", "AUTO-RENEW"], &rows)
}

async fn get<W: Write>(ctx: &mut Context<W>, name: &DomainName) -> anyhow::Result<()> {
    let domain = ctx.api()?.get_domain(name).await?;
    let pairs = [
        ("Domain", domain.domain_name.to_string()),
        ("Status", domain.status.join(", ")),
        ("Expires", or_empty(domain.expiry_date.map(|t| t.date()))),
        ("Auto-renew", yes_no(domain.auto_renew)),
        ("Registrant", or_empty(domain.registrant.as_ref())),
        ("Nameservers", domain.name_servers.join(", ")),
        ("Premium", yes_no(domain.premium)),
    ];
    ctx.printer.record(&domain, &pairs)
}

/// Single REST availability check. When the registrar quotes no price and a
/// customer is configured, the registration price is looked up in the
/// customer's pricelist.
async fn check<W: Write>(ctx: &mut Context<W>, name: &DomainName) -> anyhow::Result<()> {
    let api = ctx.api()?;
    let mut availability = api.check_domain(name).await?;
    let mut currency = None;

    if availability.available && availability.price.is_none() {
        if let (Some(customer), Some((_, tld))) =
            (ctx.settings.customer.as_ref(), name.as_str().split_once('.'))
        {
            match api.get_pricelist(customer).await {
                Ok(pricelist) => match pricelist.create_price(tld) {
                    Some((cents, cur)) => {
                        availability.price = Some(Decimal::new(cents, 2));
                        currency = Some(cur.to_string());
                    }
                    None => debug!(tld, "TLD not found in pricelist"),
                },
                Err(err) => debug!(error = %err, "pricelist lookup failed"),
            }
        }
    }

    let mut available = yes_no(availability.available);
    if availability.premium {
        available.push_str(" (premium)");
    }
    let mut pairs = vec![("Domain", availability.domain.clone()), ("Available", available)];
    match (availability.price, currency) {
        (Some(price), Some(cur)) => pairs.push(("Price", format!("{price:.2} {cur}/year"))),
        (Some(price), None) => pairs.push(("Price", format!("{price:.2}/year"))),
        (None, _) if availability.available && ctx.settings.customer.is_none() => {
            pairs.push(("Price", "(set RR_CUSTOMER to show pricing)".to_string()))
        }
        (None, _) => {}
    }
    ctx.printer.record(&availability, &pairs)
}

/// Bulk availability over one bulk-check session. Results gathered before a
/// mid-batch failure are printed before the failure is reported.
async fn check_bulk<W: Write>(ctx: &mut Context<W>, domains: &[String]) -> anyhow::Result<()> {
    if domains.len() > MAX_BULK_DOMAINS {
        return Err(CliError::Usage(format!(
            "at most {MAX_BULK_DOMAINS} domains per bulk check, got {}",
            domains.len()
        ))
        .into());
    }
    for domain in domains {
        split_domain(domain)?;
    }

    let key = ctx.api_key()?;
    let stream = open_tls(&ctx.settings.isproxy).await?;
    check_over(ctx, key, stream, domains).await
}

/// Authenticates over `stream`, checks `domains` in order, and closes.
async fn check_over<W, S>(
    ctx: &mut Context<W>,
    key: ApiKey,
    stream: S,
    domains: &[String],
) -> anyhow::Result<()>
where
    W: Write,
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    let mut session = IsProxyClient::new(key, ctx.settings.isproxy.timeout);
    session.handshake(stream).await?;
    let outcome = session.check_many(domains).await;
    session.close().await;

    match outcome {
        Ok(results) => print_checks(ctx, &results),
        Err(batch) => {
            print_checks(ctx, &batch.completed)?;
            Err(batch.into())
        }
    }
}

fn print_checks<W: Write>(ctx: &mut Context<W>, results: &[CheckResult]) -> anyhow::Result<()> {
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|r| {
            vec![
                r.fqdn(),
                yes_no(r.available),
                or_empty(r.price.map(|p| format!("{p:.2}"))),
            ]
        })
        .collect();
    ctx.printer.rows(results, &["DOMAIN", "AVAILABLE", "PRICE"], &rows)
}

async fn renew<W: Write>(ctx: &mut Context<W>, name: &DomainName, period: u32) -> anyhow::Result<()> {
    let process = ctx.api()?.renew_domain(name, period).await?;
    print_process(ctx, &process)
}

/// Prints the process tracking an asynchronous domain operation.
fn print_process<W: Write>(ctx: &mut Context<W>, process: &Process) -> anyhow::Result<()> {
    let pairs = [
        ("Process", process.id.to_string()),
        ("Action", process.action.clone()),
        ("Status", process.status.clone()),
    ];
    ctx.printer.record(process, &pairs)
}
