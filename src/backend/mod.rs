//! Clients for the managed backend: object storage and the record store.
//!
//! Both speak plain HTTP to a Supabase-style project. The workflow only sees
//! the [`StorageClient`] and [`RecordStore`] traits.

mod error;
mod records;
mod storage;

pub use error::BackendError;
pub use records::{PostgrestRecords, RecordStore};
pub use storage::{StorageClient, StoragePath, SupabaseStorage, UploadOptions};

use reqwest::{Client, Method, RequestBuilder, Response};

use crate::config::BackendConfig;

/// Shared HTTP plumbing: base URL, credentials, and error decoding.
#[derive(Debug, Clone)]
pub(crate) struct BackendClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BackendClient {
    pub(crate) fn new(config: &BackendConfig) -> Self {
        // No request timeout: the network stack's own behavior applies
        let client = Client::builder()
            .user_agent(concat!("memoria/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.anon_key.clone(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Send a request, turning non-2xx responses into [`BackendError::Rejected`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(BackendError::Transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::rejected(status, &body));
        }

        Ok(response)
    }
}
