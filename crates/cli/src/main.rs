//! `rr`, the Realtime Register command-line client.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse arguments**: clap, with every global flag also readable from
//!    its `RR_*` environment variable.
//! 2. **Wire logging**: `tracing-subscriber` on stderr, text or JSON.
//! 3. **Construct clients**: [`rest_api::ApiClient`] for REST commands,
//!    [`isproxy::IsProxyClient`] for `domain check-bulk`.
//! 4. **Report**: print results to stdout; on failure print a readable
//!    message to stderr and exit with a code that identifies the failure
//!    class (see [`report`]).

mod args;
mod commands;
mod logging;
mod output;
mod report;
mod settings;

use std::process::ExitCode;

use clap::Parser;

use crate::args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.global.verbose, cli.global.log_json);

    match commands::run(cli, std::io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprint!("{}", report::render(&err));
            ExitCode::from(report::exit_code(&err))
        }
    }
}
