//! `rr process ...`

use std::io::Write;

use registrar::{Process, ProcessId, ProcessListOptions};

use super::{or_empty, Context};
use crate::args::ProcessCommand;

pub(crate) async fn run<W: Write>(ctx: &mut Context<W>, command: ProcessCommand) -> anyhow::Result<()> {
    let api = ctx.api()?;
    match command {
        ProcessCommand::List {
            limit,
            offset,
            status,
        } => {
            let options = ProcessListOptions {
                limit,
                offset,
                status,
            };
            let page = api.list_processes(&options).await?;
            let rows: Vec<Vec<String>> = page
                .entities
                .iter()
                .map(|p| {
                    vec![
                        p.id.to_string(),
                        p.status.clone(),
                        p.action.clone(),
                        p.kind.clone(),
                        or_empty(p.identifier.as_ref()),
                    ]
                })
                .collect();
            ctx.printer
                .rows(&page, &["ID", "STATUS", "ACTION", "TYPE", "IDENTIFIER"], &rows)
        }
        ProcessCommand::Get { id } => {
            let process = api.get_process(ProcessId::new(id)).await?;
            let pairs = summary(&process);
            ctx.printer.record(&process, &pairs)
        }
        ProcessCommand::Info { id } => {
            let info = api.get_process_info(ProcessId::new(id)).await?;
            let mut pairs = summary(&info.process);
            if let Some(entity) = &info.process.entity {
                pairs.push(("Entity", entity.clone()));
            }
            ctx.printer.record(&info, &pairs)
        }
        ProcessCommand::Cancel { id } => {
            api.cancel_process(ProcessId::new(id)).await?;
            ctx.printer.done(&format!("Cancelled process {id}"))
        }
        ProcessCommand::Resend { id } => {
            api.resend_process(ProcessId::new(id)).await?;
            ctx.printer.done(&format!("Notifications resent for process {id}"))
        }
    }
}

fn summary(process: &Process) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("ID", process.id.to_string()),
        ("Type", process.kind.clone()),
        ("Action", process.action.clone()),
        ("Status", process.status.clone()),
        ("Identifier", or_empty(process.identifier.as_ref())),
        ("Created", or_empty(process.created_date.map(|t| t.date()))),
    ];
    if let Some(message) = &process.message {
        pairs.push(("Message", message.clone()));
    }
    pairs
}
