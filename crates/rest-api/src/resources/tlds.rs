//! TLD metadata and customer pricelist endpoints.

use registrar::{
    ClassifiedError, CustomerHandle, ListOptions, ListResponse, Pricelist, SearchParam, Tld,
    TldInfo,
};

use crate::paths::{segment, with_query};
use crate::ApiClient;

impl ApiClient {
    /// Lists TLDs; free-text search uses `?q=`.
    pub async fn list_tlds(
        &self,
        options: &ListOptions,
    ) -> Result<ListResponse<TldInfo>, ClassifiedError> {
        let path = with_query("/tlds".to_string(), &options.query_pairs(SearchParam::Q));
        self.get(&path).await
    }

    /// Fetches metadata for one TLD.
    pub async fn get_tld(&self, tld: &Tld) -> Result<TldInfo, ClassifiedError> {
        self.get(&format!("/tlds/{}", segment(tld.as_str()))).await
    }

    /// Fetches the pricelist of a customer account.
    pub async fn get_pricelist(
        &self,
        customer: &CustomerHandle,
    ) -> Result<Pricelist, ClassifiedError> {
        self.get(&format!(
            "/customers/{}/pricelist",
            segment(customer.as_str())
        ))
        .await
    }
}
