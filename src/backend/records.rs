//! Record store client.

use async_trait::async_trait;
use memoria_common::{Memory, NewMemory};
use reqwest::Method;

use super::{BackendClient, BackendError};
use crate::config::BackendConfig;

/// Structured record storage.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a memory row into `table` and return the persisted row.
    async fn insert(&self, table: &str, memory: &NewMemory) -> Result<Memory, BackendError>;
}

/// Record store backed by a PostgREST endpoint.
#[derive(Debug, Clone)]
pub struct PostgrestRecords {
    base: BackendClient,
}

impl PostgrestRecords {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            base: BackendClient::new(config),
        }
    }
}

#[async_trait]
impl RecordStore for PostgrestRecords {
    async fn insert(&self, table: &str, memory: &NewMemory) -> Result<Memory, BackendError> {
        let request = self
            .base
            .request(Method::POST, &format!("/rest/v1/{}", table))
            .header("Prefer", "return=representation")
            // Ask for exactly one row back as an object
            .header(reqwest::header::ACCEPT, "application/vnd.pgrst.object+json")
            .json(&[memory]);

        let response = self.base.send(request).await?;

        let row: Memory = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        tracing::debug!("Inserted {} row {}", table, row.id);
        Ok(row)
    }
}
