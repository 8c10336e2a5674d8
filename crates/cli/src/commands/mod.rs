//! Command handlers.
//!
//! Each handler builds the client it needs from [`Settings`], performs its
//! calls, and prints through the shared [`Printer`]. Handlers return
//! `anyhow::Result`; typed library errors pass through untouched so
//! [`crate::report`] can pick the exit code.

mod contact;
mod domain;
mod process;
mod tld;
mod zone;

use std::io::Write;

use registrar::{ApiKey, CustomerHandle, ListOptions};
use rest_api::ApiClient;

use crate::args::{Cli, Command, Paging};
use crate::output::Printer;
use crate::report::CliError;
use crate::settings::Settings;

/// Resolved settings plus the output sink.
pub struct Context<W> {
    pub(crate) settings: Settings,
    pub(crate) printer: Printer<W>,
}

impl<W: Write> Context<W> {
    pub fn new(settings: Settings, out: W) -> Self {
        let printer = Printer::new(settings.output, out);
        Self { settings, printer }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.printer.into_inner()
    }

    /// REST client; refuses to build without an API key.
    pub(crate) fn api(&self) -> anyhow::Result<ApiClient> {
        if self.settings.client.api_key.is_none() {
            return Err(CliError::MissingApiKey.into());
        }
        Ok(ApiClient::new(self.settings.client.clone())?)
    }

    pub(crate) fn api_key(&self) -> Result<ApiKey, CliError> {
        self.settings
            .client
            .api_key
            .clone()
            .ok_or(CliError::MissingApiKey)
    }

    pub(crate) fn customer(&self) -> Result<CustomerHandle, CliError> {
        self.settings
            .customer
            .clone()
            .ok_or(CliError::MissingCustomer)
    }
}

/// Runs the parsed command, writing results to `out`.
pub async fn run<W: Write>(cli: Cli, out: W) -> anyhow::Result<()> {
    let mut ctx = Context::new(Settings::resolve(&cli.global), out);
    dispatch(&mut ctx, cli.command).await
}

pub(crate) async fn dispatch<W: Write>(ctx: &mut Context<W>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Domain { command } => domain::run(ctx, command).await,
        Command::Process { command } => process::run(ctx, command).await,
        Command::Zone { command } => zone::run(ctx, command).await,
        Command::Tld { command } => tld::run(ctx, command).await,
        Command::Contact { command } => contact::run(ctx, command).await,
        Command::Pricelist => tld::pricelist(ctx).await,
    }
}

impl From<Paging> for ListOptions {
    fn from(paging: Paging) -> Self {
        ListOptions {
            limit: paging.limit,
            offset: paging.offset,
            search: paging.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Formats an optional value, empty when absent.
pub(crate) fn or_empty<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
