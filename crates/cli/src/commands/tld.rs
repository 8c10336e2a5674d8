//! `rr tld ...` and `rr pricelist`.

use std::io::Write;

use rust_decimal::Decimal;

use super::{or_empty, Context};
use crate::args::TldCommand;

pub(crate) async fn run<W: Write>(ctx: &mut Context<W>, command: TldCommand) -> anyhow::Result<()> {
    let api = ctx.api()?;
    match command {
        TldCommand::List { paging } => {
            let page = api.list_tlds(&paging.into()).await?;
            let rows: Vec<Vec<String>> = page
                .entities
                .iter()
                .map(|t| {
                    vec![
                        t.tld.to_string(),
                        or_empty(t.price_create),
                        or_empty(t.price_renew),
                    ]
                })
                .collect();
            ctx.printer
                .rows(&page, &["TLD", "CREATE PRICE", "RENEW PRICE"], &rows)
        }
        TldCommand::Get { tld } => {
            let info = api.get_tld(&tld).await?;
            let pairs = [
                ("TLD", info.tld.to_string()),
                ("Create", or_empty(info.price_create)),
                ("Renew", or_empty(info.price_renew)),
                ("Transfer", or_empty(info.price_transfer)),
                ("Min period", or_empty(info.min_period)),
                ("Max period", or_empty(info.max_period)),
            ];
            ctx.printer.record(&info, &pairs)
        }
    }
}

/// Prints every pricelist entry; prices arrive in cents.
pub(crate) async fn pricelist<W: Write>(ctx: &mut Context<W>) -> anyhow::Result<()> {
    let customer = ctx.customer()?;
    let pricelist = ctx.api()?.get_pricelist(&customer).await?;
    let rows: Vec<Vec<String>> = pricelist
        .prices
        .iter()
        .map(|p| {
            vec![
                p.product.clone(),
                p.action.clone(),
                p.currency.clone(),
                Decimal::new(p.price, 2).to_string(),
            ]
        })
        .collect();
    ctx.printer
        .rows(&pricelist, &["PRODUCT", "ACTION", "CURRENCY", "PRICE"], &rows)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::args::Command;
    use crate::commands::testing;
    use crate::output::OutputMode;
    use crate::report::{exit_code, EXIT_USAGE};

    #[tokio::test]
    async fn pricelist_prints_cents_as_decimal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers/acme/pricelist"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "prices": [{"product": "domain_com", "action": "CREATE", "currency": "USD", "price": 1099}]
            })))
            .mount(&server)
            .await;

        let (result, out) =
            testing::run(testing::settings(&server, OutputMode::Plain), Command::Pricelist).await;
        result.unwrap();
        assert_eq!(
            out,
            "PRODUCT     ACTION  CURRENCY  PRICE\n\
             domain_com  CREATE  USD       10.99\n"
        );
    }

    #[tokio::test]
    async fn pricelist_requires_a_customer() {
        let server = MockServer::start().await;
        let mut settings = testing::settings(&server, OutputMode::Plain);
        settings.customer = None;

        let (result, _) = testing::run(settings, Command::Pricelist).await;
        assert_eq!(exit_code(&result.unwrap_err()), EXIT_USAGE);
    }
}
