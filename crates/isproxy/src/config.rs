//! Connection settings for the bulk-check endpoint.

use std::time::Duration;

use serde::Deserialize;

/// Production bulk-check host.
pub const DEFAULT_HOST: &str = "isapi.yoursrs.com";

/// Production bulk-check TLS port.
pub const DEFAULT_PORT: u16 = 5443;

/// Where and how long to talk to the bulk-check server.
///
/// TLS 1.2 is the minimum protocol version; there is no setting to lower it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IsProxyConfig {
    pub host: String,
    pub port: u16,
    /// Bound on the connect, the TLS handshake, and each request/response
    /// exchange.
    pub timeout: Duration,
}

impl Default for IsProxyConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(30),
        }
    }
}

impl IsProxyConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `host:port` for dialling.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let config = IsProxyConfig::default();
        assert_eq!(config.address(), "isapi.yoursrs.com:5443");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn host_override_keeps_port() {
        let config = IsProxyConfig::default().with_host("isapi.example.test");
        assert_eq!(config.address(), "isapi.example.test:5443");
    }
}
