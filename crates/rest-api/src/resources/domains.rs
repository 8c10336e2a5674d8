//! Domain endpoints.
//!
//! | Verb | Path | Method |
//! |------|------|--------|
//! | GET | `/domains` | [`ApiClient::list_domains`] |
//! | GET | `/domains/{name}` | [`ApiClient::get_domain`] |
//! | GET | `/domains/{name}/check` | [`ApiClient::check_domain`] |
//! | POST | `/domains/{name}` | [`ApiClient::register_domain`] |
//! | POST | `/domains/{name}/update` | [`ApiClient::update_domain`] |
//! | DELETE | `/domains/{name}` | [`ApiClient::delete_domain`] |
//! | POST | `/domains/{name}/renew` | [`ApiClient::renew_domain`] |
//! | POST | `/domains/{name}/transfer` | [`ApiClient::transfer_domain`] |

use registrar::{
    ClassifiedError, Domain, DomainAvailability, DomainListOptions, DomainName, ListResponse,
    Process, RegisterRequest, RenewRequest, TransferRequest, UpdateRequest,
};

use crate::paths::{segment, with_query};
use crate::ApiClient;

fn domain_path(name: &DomainName) -> String {
    format!("/domains/{}", segment(name.as_str()))
}

impl ApiClient {
    /// Lists domains matching `options`.
    pub async fn list_domains(
        &self,
        options: &DomainListOptions,
    ) -> Result<ListResponse<Domain>, ClassifiedError> {
        let path = with_query("/domains".to_string(), &options.query_pairs());
        self.get(&path).await
    }

    /// Fetches one domain.
    pub async fn get_domain(&self, name: &DomainName) -> Result<Domain, ClassifiedError> {
        self.get(&domain_path(name)).await
    }

    /// Checks availability of one domain over REST.
    pub async fn check_domain(
        &self,
        name: &DomainName,
    ) -> Result<DomainAvailability, ClassifiedError> {
        self.get(&format!("{}/check", domain_path(name))).await
    }

    /// Registers a domain, returning the process tracking the registration.
    pub async fn register_domain(
        &self,
        name: &DomainName,
        request: &RegisterRequest,
    ) -> Result<Process, ClassifiedError> {
        self.post(&domain_path(name), request).await
    }

    /// Updates domain settings.
    pub async fn update_domain(
        &self,
        name: &DomainName,
        request: &UpdateRequest,
    ) -> Result<(), ClassifiedError> {
        self.post_no_content(&format!("{}/update", domain_path(name)), Some(request))
            .await
    }

    /// Deletes a domain.
    pub async fn delete_domain(&self, name: &DomainName) -> Result<(), ClassifiedError> {
        self.delete(&domain_path(name)).await
    }

    /// Renews a domain for `period` years.
    pub async fn renew_domain(
        &self,
        name: &DomainName,
        period: u32,
    ) -> Result<Process, ClassifiedError> {
        self.post(&format!("{}/renew", domain_path(name)), &RenewRequest { period })
            .await
    }

    /// Starts an inbound transfer.
    pub async fn transfer_domain(
        &self,
        name: &DomainName,
        request: &TransferRequest,
    ) -> Result<Process, ClassifiedError> {
        self.post(&format!("{}/transfer", domain_path(name)), request)
            .await
    }
}
