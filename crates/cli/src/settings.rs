//! Resolves client configuration from flags and environment.

use std::time::Duration;

use isproxy::IsProxyConfig;
use registrar::{ApiKey, ClientConfig, CustomerHandle, Environment};

use crate::args::GlobalArgs;
use crate::output::OutputMode;

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientConfig,
    pub isproxy: IsProxyConfig,
    pub customer: Option<CustomerHandle>,
    pub output: OutputMode,
}

impl Settings {
    /// Precedence for the REST endpoint: `--base-url`, then `--sandbox`,
    /// then production.
    pub fn resolve(args: &GlobalArgs) -> Self {
        let environment = if args.sandbox {
            Environment::Sandbox
        } else {
            Environment::Production
        };

        let mut client = ClientConfig::new(args.api_key.as_deref().and_then(ApiKey::new))
            .with_environment(environment);
        if let Some(url) = args.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            client = client.with_base_url(url.trim());
        }
        if let Some(secs) = args.timeout.filter(|s| *s > 0) {
            client = client.with_timeout(Duration::from_secs(secs));
        }

        let mut isproxy = IsProxyConfig::default();
        if let Some(host) = args.isproxy_host.as_deref().filter(|h| !h.trim().is_empty()) {
            isproxy = isproxy.with_host(host.trim());
        }

        Self {
            client,
            isproxy,
            customer: args.customer.clone(),
            output: if args.json {
                OutputMode::Json
            } else {
                OutputMode::Plain
            },
        }
    }
}
