//! # HubSpot Client
//!
//! `reqwest`-based implementation of [`CrmBackend`] against the HubSpot
//! CRM v3 objects API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::backend::{CrmBackend, SearchResponse};
use super::errors::{CrmError, CrmResult};
use crate::config::CrmConfig;
use crate::query::{Collection, SearchRequest};

/// HubSpot CRM client
pub struct HubSpotClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for HubSpotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubSpotClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl HubSpotClient {
    /// Create a client. Fails with `CredentialMissing` when no token is set.
    pub fn new(config: &CrmConfig) -> CrmResult<Self> {
        let token = config
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(CrmError::CredentialMissing)?
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    fn objects_url(&self, collection: &str) -> String {
        format!("{}/crm/v3/objects/{}", self.base_url, collection)
    }

    /// Send a request with auth attached and map non-2xx to a failure
    async fn send(&self, request: reqwest::RequestBuilder) -> CrmResult<reqwest::Response> {
        let response = request.bearer_auth(&self.token).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "HubSpot request failed");
            return Err(CrmError::downstream(format!(
                "HubSpot API error ({}): {}",
                status, body
            )));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> CrmResult<T> {
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|e| CrmError::downstream(format!("Failed to parse HubSpot response: {}", e)))
    }
}

#[async_trait]
impl CrmBackend for HubSpotClient {
    async fn search(
        &self,
        collection: Collection,
        request: &SearchRequest,
    ) -> CrmResult<SearchResponse> {
        let url = format!("{}/search", self.objects_url(collection.as_str()));
        debug!(%collection, limit = request.limit, "searching HubSpot");
        self.send_json(self.client.post(url).json(request)).await
    }

    async fn list_objects(&self, collection: &str) -> CrmResult<Value> {
        self.send_json(self.client.get(self.objects_url(collection)))
            .await
    }

    async fn create_object(&self, collection: &str, body: Value) -> CrmResult<Value> {
        self.send_json(self.client.post(self.objects_url(collection)).json(&body))
            .await
    }

    async fn update_object(&self, collection: &str, id: &str, body: Value) -> CrmResult<Value> {
        let url = format!("{}/{}", self.objects_url(collection), id);
        self.send_json(self.client.patch(url).json(&body)).await
    }

    async fn delete_object(&self, collection: &str, id: &str) -> CrmResult<()> {
        let url = format!("{}/{}", self.objects_url(collection), id);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
