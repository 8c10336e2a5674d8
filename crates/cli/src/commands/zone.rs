//! `rr zone ...`

use std::io::Write;

use registrar::{ZoneId, ZoneRequest};
use serde_json::json;

use super::{or_empty, Context};
use crate::args::ZoneCommand;
use crate::output::yes_no;
use crate::report::CliError;

pub(crate) async fn run<W: Write>(ctx: &mut Context<W>, command: ZoneCommand) -> anyhow::Result<()> {
    let api = ctx.api()?;
    match command {
        ZoneCommand::List { paging } => {
            let page = api.list_zones(&paging.into()).await?;
            let rows: Vec<Vec<String>> = page
                .entities
                .iter()
                .map(|z| {
                    vec![
                        z.id.to_string(),
                        z.name.clone(),
                        or_empty(z.service.as_ref()),
                        z.records.len().to_string(),
                    ]
                })
                .collect();
            ctx.printer
                .rows(&page, &["ID", "NAME", "SERVICE", "RECORDS"], &rows)
        }
        ZoneCommand::Get { id } => {
            let zone = api.get_zone(ZoneId::new(id)).await?;
            let mut pairs = vec![
                ("ID", zone.id.to_string()),
                ("Name", zone.name.clone()),
                ("TTL", zone.ttl.to_string()),
                ("DNSSEC", yes_no(zone.dnssec)),
            ];
            pairs.extend(zone.records.iter().map(|r| {
                let prio = r.prio.map(|p| format!(" {p}")).unwrap_or_default();
                ("Record", format!("{} {} {}{prio} {}", r.name, r.ttl, r.kind, r.content))
            }));
            ctx.printer.record(&zone, &pairs)
        }
        ZoneCommand::Delete { id } => {
            api.delete_zone(ZoneId::new(id)).await?;
            ctx.printer.done(&format!("Deleted zone {id}"))
        }
        ZoneCommand::Create { name, ttl } => {
            let request = ZoneRequest {
                name: Some(name.clone()),
                ttl: Some(ttl),
                ..Default::default()
            };
            let id = api.create_zone(&request).await?;
            let pairs = [("ID", id.to_string()), ("Name", name.clone())];
            ctx.printer.record(&json!({ "id": id, "name": name }), &pairs)
        }
        ZoneCommand::Update { id, ttl } => {
            let Some(ttl) = ttl else {
                return Err(CliError::Usage("nothing to update; pass --ttl".to_string()).into());
            };
            let request = ZoneRequest {
                ttl: Some(ttl),
                ..Default::default()
            };
            api.update_zone(ZoneId::new(id), &request).await?;
            ctx.printer.done(&format!("Updated zone {id}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::args::{Command, Paging};
    use crate::commands::testing;
    use crate::output::OutputMode;
    use crate::report::{exit_code, EXIT_USAGE};

    #[tokio::test]
    async fn list_searches_with_q() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dns/zones"))
            .and(query_param("q", "shop"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "entities": [{"id": 3, "name": "shop.nl", "service": "BASIC", "records": []}],
                "pagination": {"limit": 10, "offset": 0, "total": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let command = Command::Zone {
            command: ZoneCommand::List {
                paging: Paging {
                    limit: 10,
                    offset: 0,
                    search: Some("shop".into()),
                },
            },
        };
        let (result, out) = testing::run(testing::settings(&server, OutputMode::Plain), command).await;
        result.unwrap();
        assert_eq!(
            out,
            "ID  NAME     SERVICE  RECORDS\n\
             3   shop.nl  BASIC    0\n"
        );
    }

    #[tokio::test]
    async fn get_lists_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dns/zones/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "name": "shop.nl", "ttl": 3600, "dnssec": false,
                "records": [
                    {"name": "shop.nl", "type": "MX", "content": "mx.shop.nl", "ttl": 300, "prio": 10}
                ]
            })))
            .mount(&server)
            .await;

        let command = Command::Zone {
            command: ZoneCommand::Get { id: 3 },
        };
        let (result, out) = testing::run(testing::settings(&server, OutputMode::Plain), command).await;
        result.unwrap();
        assert!(out.ends_with("Record\tshop.nl 300 MX 10 mx.shop.nl\n"), "{out}");
    }

    #[tokio::test]
    async fn create_posts_name_and_default_ttl() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dns/zones"))
            .and(body_json(json!({"name": "shop.nl", "defaultTtl": 3600})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 41})))
            .expect(1)
            .mount(&server)
            .await;

        let command = Command::Zone {
            command: ZoneCommand::Create {
                name: "shop.nl".into(),
                ttl: 3600,
            },
        };
        let (result, out) = testing::run(testing::settings(&server, OutputMode::Json), command).await;
        result.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, json!({"id": 41, "name": "shop.nl"}));
    }

    #[tokio::test]
    async fn update_posts_the_new_ttl() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dns/zones/41/update"))
            .and(body_json(json!({"defaultTtl": 600})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let command = Command::Zone {
            command: ZoneCommand::Update {
                id: 41,
                ttl: Some(600),
            },
        };
        let (result, out) = testing::run(testing::settings(&server, OutputMode::Plain), command).await;
        result.unwrap();
        assert_eq!(out, "Updated zone 41\n");
    }

    #[tokio::test]
    async fn update_without_ttl_is_a_usage_error() {
        let server = MockServer::start().await;
        let command = Command::Zone {
            command: ZoneCommand::Update { id: 41, ttl: None },
        };
        let (result, _) = testing::run(testing::settings(&server, OutputMode::Plain), command).await;
        assert_eq!(exit_code(&result.unwrap_err()), EXIT_USAGE);
    }
}
