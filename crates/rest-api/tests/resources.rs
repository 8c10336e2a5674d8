//! Resource request builders: paths, query strings, and payload shapes.

use std::time::Duration;

use registrar::{
    ApiKey, ClientConfig, ContactHandle, CustomerHandle, DomainListOptions, DomainName,
    ListOptions, ProcessId, RetryPolicy, Tld, ZoneId, ZoneRequest,
};
use rest_api::ApiClient;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    let config = ClientConfig::new(ApiKey::new("k"))
        .with_base_url(format!("{}/v2/", server.uri()))
        .with_timeout(Duration::from_secs(5))
        .with_retry(RetryPolicy::no_retries());
    ApiClient::new(config).unwrap()
}

fn empty_page() -> serde_json::Value {
    json!({"entities": [], "pagination": {"limit": 0, "offset": 0, "total": 0}})
}

#[tokio::test]
async fn list_domains_sends_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/domains"))
        .and(query_param("limit", "25"))
        .and(query_param("search", "shop"))
        .and(query_param("expiringWithin", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [{"domainName": "shop.nl", "status": ["ok"]}],
            "pagination": {"limit": 25, "offset": 0, "total": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = DomainListOptions {
        list: ListOptions {
            limit: 25,
            offset: 0,
            search: Some("shop".into()),
        },
        expiring_within: 30,
        ..Default::default()
    };
    let page = client(&server).list_domains(&options).await.unwrap();
    assert_eq!(page.entities[0].domain_name.as_str(), "shop.nl");
    assert_eq!(page.pagination.total, 1);
}

#[tokio::test]
async fn check_domain_decodes_price() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/domains/example.com/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "available": true, "domain": "example.com", "price": 9.95
        })))
        .mount(&server)
        .await;

    let name = DomainName::new("example.com").unwrap();
    let availability = client(&server).check_domain(&name).await.unwrap();
    assert!(availability.available);
    assert_eq!(availability.price, Some(dec!(9.95)));
}

#[tokio::test]
async fn renew_posts_the_period() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/domains/example.com/renew"))
        .and(body_json(json!({"period": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 991, "status": "COMPLETED", "action": "renew", "type": "domain"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let name = DomainName::new("example.com").unwrap();
    let process = client(&server).renew_domain(&name, 2).await.unwrap();
    assert_eq!(process.id, ProcessId::new(991));
    assert_eq!(process.kind, "domain");
}

#[tokio::test]
async fn process_cancel_and_resend_use_their_paths() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/processes/12"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/processes/12/resend"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    api.cancel_process(ProcessId::new(12)).await.unwrap();
    api.resend_process(ProcessId::new(12)).await.unwrap();
}

#[tokio::test]
async fn zone_search_uses_q() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/dns/zones"))
        .and(query_param("q", "example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(1)
        .mount(&server)
        .await;

    let options = ListOptions {
        search: Some("example".into()),
        ..Default::default()
    };
    let page = client(&server).list_zones(&options).await.unwrap();
    assert!(page.entities.is_empty());
}

#[tokio::test]
async fn create_zone_returns_the_new_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/dns/zones"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 77})))
        .mount(&server)
        .await;

    let request = ZoneRequest {
        name: Some("example.com".into()),
        ..Default::default()
    };
    let id = client(&server).create_zone(&request).await.unwrap();
    assert_eq!(id, ZoneId::new(77));
}

#[tokio::test]
async fn contact_paths_are_scoped_and_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/customers/acme%20corp/contacts/H%2F1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let customer = CustomerHandle::new("acme corp").unwrap();
    let handle = ContactHandle::new("H/1").unwrap();
    client(&server)
        .delete_contact(&customer, &handle)
        .await
        .unwrap();
}

#[tokio::test]
async fn tld_and_pricelist_lookups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/tlds/nl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tld": "nl"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/customers/acme/pricelist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prices": [
                {"product": "domain_nl", "action": "RENEW", "currency": "EUR", "price": 500},
                {"product": "domain_nl", "action": "CREATE", "currency": "EUR", "price": 450}
            ]
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let info = api.get_tld(&Tld::new("nl").unwrap()).await.unwrap();
    assert_eq!(info.tld.as_str(), "nl");

    let prices = api
        .get_pricelist(&CustomerHandle::new("acme").unwrap())
        .await
        .unwrap();
    assert_eq!(prices.create_price("nl"), Some((450, "EUR")));
}
