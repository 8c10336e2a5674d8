//! Value types exchanged with the registrar.
//!
//! These carry no business rules: the transport layer only serialises,
//! transmits, and deserialises them. Field names follow the registrar's JSON
//! (camelCase) through serde renames.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ContactHandle, CustomerHandle, DomainName, ProcessId, Tld, ZoneId};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Formats the calendar date as `YYYY-MM-DD`.
    pub fn date(self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Offset-based pagination metadata returned with every list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub total: u32,
}

/// A page of entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub entities: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Which query parameter name the endpoint uses for free-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchParam {
    /// `?search=` (domains, contacts).
    #[default]
    Search,
    /// `?q=` (zones, TLDs).
    Q,
}

impl SearchParam {
    fn key(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Q => "q",
        }
    }
}

/// Common list filters. Zero and empty values are omitted from the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: u32,
    pub offset: u32,
    pub search: Option<String>,
}

impl ListOptions {
    /// Returns the non-empty query parameters, in a stable order.
    pub fn query_pairs(&self, search_param: SearchParam) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.limit > 0 {
            pairs.push(("limit", self.limit.to_string()));
        }
        if self.offset > 0 {
            pairs.push(("offset", self.offset.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push((search_param.key(), search.to_string()));
        }
        pairs
    }
}

/// Domain list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainListOptions {
    pub list: ListOptions,
    pub status: Option<String>,
    /// Only domains expiring within this many days.
    pub expiring_within: u32,
    pub order: Option<String>,
}

impl DomainListOptions {
    /// Returns the non-empty query parameters, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.list.query_pairs(SearchParam::Search);
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("status", status.to_string()));
        }
        if self.expiring_within > 0 {
            pairs.push(("expiringWithin", self.expiring_within.to_string()));
        }
        if let Some(order) = self.order.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("order", order.to_string()));
        }
        pairs
    }
}

/// Process list filters. Processes have no free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessListOptions {
    pub limit: u32,
    pub offset: u32,
    pub status: Option<String>,
}

impl ProcessListOptions {
    /// Returns the non-empty query parameters, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = ListOptions {
            limit: self.limit,
            offset: self.offset,
            search: None,
        }
        .query_pairs(SearchParam::Search);
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("status", status.to_string()));
        }
        pairs
    }
}

// ---------------------------------------------------------------------------
// Domains
// ---------------------------------------------------------------------------

/// A domain registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub domain_name: DomainName,
    #[serde(default)]
    pub registry: Option<String>,
    #[serde(default)]
    pub customer: Option<CustomerHandle>,
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub expiry_date: Option<Timestamp>,
    #[serde(default)]
    pub auto_renew: bool,
    #[serde(default)]
    pub auto_renew_period: Option<u32>,
    #[serde(default)]
    pub registrant: Option<ContactHandle>,
    #[serde(default, rename = "ns")]
    pub name_servers: Vec<String>,
    #[serde(default, rename = "authcode", skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
    #[serde(default)]
    pub created_date: Option<Timestamp>,
    #[serde(default)]
    pub updated_date: Option<Timestamp>,
    #[serde(default)]
    pub privacy_protect: bool,
    #[serde(default)]
    pub premium: bool,
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.status.first().map(String::as_str).unwrap_or("unknown");
        match self.expiry_date {
            Some(expiry) => write!(f, "{} ({status}, expires {})", self.domain_name, expiry.date()),
            None => write!(f, "{} ({status})", self.domain_name),
        }
    }
}

/// Result of the REST availability check for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAvailability {
    pub available: bool,
    pub domain: String,
    #[serde(default)]
    pub premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

/// Payload for registering a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    pub registrant: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<String>,
    #[serde(rename = "ns", skip_serializing_if = "Vec::is_empty", default)]
    pub name_servers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_proxy: Option<bool>,
}

/// Payload for updating a domain. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<String>,
    #[serde(rename = "ns", skip_serializing_if = "Vec::is_empty", default)]
    pub name_servers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
}

/// Payload for renewing a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewRequest {
    pub period: u32,
}

/// Payload for transferring a domain in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub auth_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
}

// ---------------------------------------------------------------------------
// Processes
// ---------------------------------------------------------------------------

/// An asynchronous registrar operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: ProcessId,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub customer: Option<CustomerHandle>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default)]
    pub created_date: Option<Timestamp>,
    #[serde(default)]
    pub updated_date: Option<Timestamp>,
    #[serde(default)]
    pub started_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A process plus its free-form detail map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    #[serde(flatten)]
    pub process: Process,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

/// A contact handle's registered details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub handle: ContactHandle,
    #[serde(default)]
    pub customer: Option<CustomerHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "voice")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default)]
    pub address_line: Vec<String>,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub created_date: Option<Timestamp>,
}

/// Payload for creating or updating a contact.
///
/// Empty fields are omitted, so an update only touches what is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, rename = "voice", skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address_line: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
}

// ---------------------------------------------------------------------------
// DNS zones
// ---------------------------------------------------------------------------

/// A DNS resource record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prio: Option<u32>,
}

/// A hosted DNS zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    #[serde(default)]
    pub customer: Option<CustomerHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub dnssec: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<DnsRecord>,
    #[serde(default)]
    pub created_date: Option<Timestamp>,
    #[serde(default)]
    pub updated_date: Option<Timestamp>,
}

/// Payload for creating or updating a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "defaultTtl", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnssec_mode: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub records: Vec<DnsRecord>,
}

/// Response to zone creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateZoneResponse {
    pub id: ZoneId,
}

// ---------------------------------------------------------------------------
// TLDs and prices
// ---------------------------------------------------------------------------

/// Metadata and list prices for a top-level domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TldInfo {
    pub tld: Tld,
    #[serde(default)]
    pub price_create: Option<Decimal>,
    #[serde(default)]
    pub price_renew: Option<Decimal>,
    #[serde(default)]
    pub price_transfer: Option<Decimal>,
    #[serde(default)]
    pub min_period: Option<u32>,
    #[serde(default)]
    pub max_period: Option<u32>,
}

/// One entry of a customer's pricelist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricelistEntry {
    pub product: String,
    pub action: String,
    pub currency: String,
    /// Price in cents.
    pub price: i64,
}

/// A customer's pricelist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricelist {
    #[serde(default)]
    pub prices: Vec<PricelistEntry>,
}

impl Pricelist {
    /// Finds the registration (`CREATE`) price for `tld`, in cents, with its
    /// currency.
    pub fn create_price(&self, tld: &str) -> Option<(i64, &str)> {
        let product = format!("domain_{tld}");
        self.prices
            .iter()
            .find(|entry| entry.product == product && entry.action == "CREATE")
            .map(|entry| (entry.price, entry.currency.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Bulk availability
// ---------------------------------------------------------------------------

/// One line of a bulk availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Label before the first dot, e.g. `"example"`.
    pub domain: String,
    /// Everything after the first dot, e.g. `"com"` or `"co.uk"`; empty when
    /// the server echoed a bare label.
    pub tld: String,
    pub available: bool,
    /// Registration price; only ever set for available domains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl CheckResult {
    /// Returns `name.tld`, or just the name when the TLD is empty.
    pub fn fqdn(&self) -> String {
        if self.tld.is_empty() {
            self.domain.clone()
        } else {
            format!("{}.{}", self.domain, self.tld)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_list_options_produce_no_pairs() {
        assert!(ListOptions::default().query_pairs(SearchParam::Q).is_empty());
        assert!(DomainListOptions::default().query_pairs().is_empty());
        assert!(ProcessListOptions::default().query_pairs().is_empty());
    }

    #[test]
    fn list_options_use_the_endpoint_search_key() {
        let opts = ListOptions {
            limit: 10,
            offset: 20,
            search: Some("shop".into()),
        };
        assert_eq!(
            opts.query_pairs(SearchParam::Q),
            vec![
                ("limit", "10".to_string()),
                ("offset", "20".to_string()),
                ("q", "shop".to_string())
            ]
        );
        assert_eq!(opts.query_pairs(SearchParam::Search)[2].0, "search");
    }

    #[test]
    fn domain_options_add_filters() {
        let opts = DomainListOptions {
            list: ListOptions::default(),
            status: Some("ok".into()),
            expiring_within: 30,
            order: Some("-expiryDate".into()),
        };
        assert_eq!(
            opts.query_pairs(),
            vec![
                ("status", "ok".to_string()),
                ("expiringWithin", "30".to_string()),
                ("order", "-expiryDate".to_string())
            ]
        );
    }

    #[test]
    fn domain_deserialises_from_registrar_json() {
        let raw = r#"{
            "domainName": "example.com",
            "status": ["ok"],
            "expiryDate": "2027-03-01T00:00:00Z",
            "autoRenew": true,
            "ns": ["ns1.example.net"]
        }"#;
        let domain: Domain = serde_json::from_str(raw).unwrap();
        assert_eq!(domain.domain_name.as_str(), "example.com");
        assert_eq!(domain.name_servers, vec!["ns1.example.net"]);
        assert_eq!(domain.to_string(), "example.com (ok, expires 2027-03-01)");
    }

    #[test]
    fn register_request_omits_unset_fields() {
        let req = RegisterRequest {
            registrant: "H123".into(),
            period: Some(1),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"period": 1, "registrant": "H123"})
        );
    }

    #[test]
    fn contact_update_sends_only_set_fields() {
        let req = ContactRequest {
            email: "ops@example.com".into(),
            city: "Utrecht".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"email": "ops@example.com", "city": "Utrecht"})
        );
    }

    #[test]
    fn pricelist_finds_create_price() {
        let list = Pricelist {
            prices: vec![
                PricelistEntry {
                    product: "domain_com".into(),
                    action: "RENEW".into(),
                    currency: "EUR".into(),
                    price: 1100,
                },
                PricelistEntry {
                    product: "domain_com".into(),
                    action: "CREATE".into(),
                    currency: "EUR".into(),
                    price: 995,
                },
            ],
        };
        assert_eq!(list.create_price("com"), Some((995, "EUR")));
        assert_eq!(list.create_price("org"), None);
    }

    #[test]
    fn check_result_fqdn_joins_name_and_tld() {
        let result = CheckResult {
            domain: "example".into(),
            tld: "co.uk".into(),
            available: true,
            price: Some(dec!(9.95)),
        };
        assert_eq!(result.fqdn(), "example.co.uk");
    }
}
