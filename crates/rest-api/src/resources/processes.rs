//! Process endpoints (`/processes`).

use registrar::{
    ClassifiedError, ListResponse, Process, ProcessId, ProcessInfo, ProcessListOptions,
};

use crate::paths::with_query;
use crate::ApiClient;

impl ApiClient {
    /// Lists processes matching `options`.
    pub async fn list_processes(
        &self,
        options: &ProcessListOptions,
    ) -> Result<ListResponse<Process>, ClassifiedError> {
        let path = with_query("/processes".to_string(), &options.query_pairs());
        self.get(&path).await
    }

    /// Fetches one process.
    pub async fn get_process(&self, id: ProcessId) -> Result<Process, ClassifiedError> {
        self.get(&format!("/processes/{id}")).await
    }

    /// Fetches a process with its detail map.
    pub async fn get_process_info(&self, id: ProcessId) -> Result<ProcessInfo, ClassifiedError> {
        self.get(&format!("/processes/{id}/info")).await
    }

    /// Cancels a pending process.
    pub async fn cancel_process(&self, id: ProcessId) -> Result<(), ClassifiedError> {
        self.delete(&format!("/processes/{id}")).await
    }

    /// Re-sends the notifications of a process.
    pub async fn resend_process(&self, id: ProcessId) -> Result<(), ClassifiedError> {
        self.post_no_content(&format!("/processes/{id}/resend"), None::<&()>)
            .await
    }
}
