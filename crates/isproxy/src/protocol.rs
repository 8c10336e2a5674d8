//! Line formatting and response parsing.
//!
//! Requests are CRLF-terminated. Responses are read one line at a time and
//! trimmed before interpretation.

use std::str::FromStr;

use registrar::{ApiKey, CheckResult};
use rust_decimal::Decimal;

use crate::IsProxyError;

/// Exact success token for `AUTH`.
pub(crate) const AUTH_OK: &str = "OK";

/// Status token marking a domain as available.
pub(crate) const AVAILABLE: &str = "AVAILABLE";

pub(crate) const QUIT_LINE: &str = "QUIT\r\n";

pub(crate) fn auth_line(key: &ApiKey) -> String {
    format!("AUTH {}\r\n", key.expose())
}

pub(crate) fn check_line(name: &str, tld: &str) -> String {
    format!("CHECK {name} {tld}\r\n")
}

/// Splits `name.tld` on the first dot.
///
/// Both halves must be non-empty and free of whitespace, since either would
/// corrupt the request line.
pub fn split_domain(input: &str) -> Result<(&str, &str), IsProxyError> {
    let invalid = || IsProxyError::InvalidDomain {
        input: input.to_string(),
    };
    let (name, tld) = input.split_once('.').ok_or_else(invalid)?;
    let usable = |part: &str| !part.is_empty() && !part.contains(char::is_whitespace);
    if usable(name) && usable(tld) {
        Ok((name, tld))
    } else {
        Err(invalid())
    }
}

/// Parses one `CHECK` response line, e.g. `example.com AVAILABLE 9.95`.
///
/// Fewer than two fields is a protocol violation. A price is only read for
/// available domains, and an unparsable price leaves it unset.
pub fn parse_check_line(line: &str) -> Result<CheckResult, IsProxyError> {
    let mut fields = line.split_whitespace();
    let (Some(fqdn), Some(status)) = (fields.next(), fields.next()) else {
        return Err(IsProxyError::ProtocolViolation {
            line: line.trim().to_string(),
        });
    };

    let (domain, tld) = fqdn.split_once('.').unwrap_or((fqdn, ""));
    let available = status == AVAILABLE;
    let price = fields
        .next()
        .filter(|_| available)
        .and_then(parse_price);

    Ok(CheckResult {
        domain: domain.to_string(),
        tld: tld.to_string(),
        available,
        price,
    })
}

/// Plain decimal first, then exponent form (`1e1`, `2.5E2`).
fn parse_price(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn available_line_carries_price() {
        let result = parse_check_line("example.com AVAILABLE 9.95\r\n").unwrap();
        assert_eq!(result.domain, "example");
        assert_eq!(result.tld, "com");
        assert!(result.available);
        assert_eq!(result.price, Some(dec!(9.95)));
    }

    #[test]
    fn multi_label_tld_splits_on_first_dot() {
        let result = parse_check_line("shop.co.uk TAKEN").unwrap();
        assert_eq!((result.domain.as_str(), result.tld.as_str()), ("shop", "co.uk"));
        assert!(!result.available);
    }

    #[test]
    fn price_is_ignored_for_unavailable_domains() {
        let result = parse_check_line("example.com TAKEN 12.00").unwrap();
        assert_eq!(result.price, None);
    }

    #[test]
    fn malformed_price_is_dropped() {
        let result = parse_check_line("example.com AVAILABLE n/a").unwrap();
        assert!(result.available);
        assert_eq!(result.price, None);
    }

    #[test]
    fn exponent_form_price_is_accepted() {
        let result = parse_check_line("example.com AVAILABLE 1e1").unwrap();
        assert_eq!(result.price, Some(dec!(10)));
        let result = parse_check_line("example.com AVAILABLE 2.5E2").unwrap();
        assert_eq!(result.price, Some(dec!(250)));
    }

    #[test]
    fn status_match_is_exact() {
        assert!(!parse_check_line("example.com available").unwrap().available);
    }

    #[test]
    fn bare_label_has_empty_tld() {
        let result = parse_check_line("localhost AVAILABLE").unwrap();
        assert_eq!(result.tld, "");
        assert_eq!(result.fqdn(), "localhost");
    }

    #[test]
    fn short_lines_are_protocol_violations() {
        for line in ["", "   \r\n", "example.com"] {
            assert!(matches!(
                parse_check_line(line),
                Err(IsProxyError::ProtocolViolation { .. })
            ));
        }
    }

    #[test]
    fn split_domain_requires_both_halves() {
        assert_eq!(split_domain("example.co.uk").unwrap(), ("example", "co.uk"));
        for bad in ["example", ".com", "example.", "my shop.com", ""] {
            assert!(split_domain(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn request_lines_are_crlf_terminated() {
        let key = ApiKey::new("k1").unwrap();
        assert_eq!(auth_line(&key), "AUTH k1\r\n");
        assert_eq!(check_line("example", "com"), "CHECK example com\r\n");
    }
}
