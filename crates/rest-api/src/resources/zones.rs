//! DNS zone endpoints (`/dns/zones`).

use registrar::{
    ClassifiedError, CreateZoneResponse, ListOptions, ListResponse, SearchParam, Zone, ZoneId,
    ZoneRequest,
};

use crate::paths::with_query;
use crate::ApiClient;

impl ApiClient {
    /// Lists zones; free-text search uses `?q=`.
    pub async fn list_zones(
        &self,
        options: &ListOptions,
    ) -> Result<ListResponse<Zone>, ClassifiedError> {
        let path = with_query("/dns/zones".to_string(), &options.query_pairs(SearchParam::Q));
        self.get(&path).await
    }

    /// Fetches one zone with its records.
    pub async fn get_zone(&self, id: ZoneId) -> Result<Zone, ClassifiedError> {
        self.get(&format!("/dns/zones/{id}")).await
    }

    /// Creates a zone and returns its new id.
    pub async fn create_zone(&self, request: &ZoneRequest) -> Result<ZoneId, ClassifiedError> {
        let created: CreateZoneResponse = self.post("/dns/zones", request).await?;
        Ok(created.id)
    }

    /// Replaces zone settings and records.
    pub async fn update_zone(
        &self,
        id: ZoneId,
        request: &ZoneRequest,
    ) -> Result<(), ClassifiedError> {
        self.post_no_content(&format!("/dns/zones/{id}/update"), Some(request))
            .await
    }

    /// Deletes a zone.
    pub async fn delete_zone(&self, id: ZoneId) -> Result<(), ClassifiedError> {
        self.delete(&format!("/dns/zones/{id}")).await
    }
}
