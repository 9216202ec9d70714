//! HTTP implementation of [`RecordStore`].

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use timemachine_core::config::StoreConfig;
use timemachine_core::models::{MediaRecord, NewMediaRecord, RecordPatch};

use crate::error::{StoreError, StoreResult};
use crate::keys;
use crate::traits::{RecordFilters, RecordStore, StoredObject};

/// Authentication strategy for the record store service.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    ApiKey(String),
}

/// HTTP client for the record store service.
#[derive(Clone, Debug)]
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
    auth: Option<Auth>,
}

impl HttpRecordStore {
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| StoreError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(HttpRecordStore {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth: config.api_key.clone().map(Auth::ApiKey),
        })
    }

    /// Create a client from `TIMEMACHINE_API_URL` / `TIMEMACHINE_API_KEY`.
    pub fn from_env() -> StoreResult<Self> {
        let config = StoreConfig::from_env().map_err(|err| StoreError::Config(err.to_string()))?;
        Self::new(&config)
    }

    /// Replace the auth strategy (e.g. a per-user bearer token).
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(Auth::Bearer(token)) => request.bearer_auth(token),
            Some(Auth::ApiKey(key)) => request.header("X-API-Key", key.as_str()),
            None => request,
        }
    }

    /// Map a non-success status to `Rejected`, otherwise hand the
    /// response back for body parsing.
    async fn checked(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn json_body<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
        let response = Self::checked(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn upload_binary(
        &self,
        user_id: Uuid,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StoreResult<StoredObject> {
        let key = keys::object_key(user_id, file_name);
        debug!(%user_id, file_name, size = data.len(), key = %key, "uploading binary");

        let request = self
            .client
            .post(self.url(&format!("/storage/{key}")))
            .header(CONTENT_TYPE, content_type)
            .body(data);
        let response = self.apply_auth(request).send().await?;
        Self::json_body(response).await
    }

    async fn create_record(&self, record: NewMediaRecord) -> StoreResult<MediaRecord> {
        debug!(user_id = %record.user_id, file_name = %record.file_name, "creating record");
        let request = self.client.post(self.url("/records")).json(&record);
        let response = self.apply_auth(request).send().await?;
        Self::json_body(response).await
    }

    async fn list_records(
        &self,
        user_id: Uuid,
        filters: Option<RecordFilters>,
    ) -> StoreResult<Vec<MediaRecord>> {
        let mut query: Vec<(&str, String)> = vec![("user_id", user_id.to_string())];
        if let Some(kind) = filters.and_then(|f| f.file_type) {
            query.push(("file_type", kind.to_string()));
        }

        let request = self.client.get(self.url("/records")).query(&query);
        let response = self.apply_auth(request).send().await?;
        Self::json_body(response).await
    }

    async fn list_timeline_records(&self, user_id: Uuid) -> StoreResult<Vec<MediaRecord>> {
        let request = self
            .client
            .get(self.url("/records/timeline"))
            .query(&[("user_id", user_id.to_string())]);
        let response = self.apply_auth(request).send().await?;
        Self::json_body(response).await
    }

    async fn update_record(&self, id: Uuid, patch: RecordPatch) -> StoreResult<MediaRecord> {
        let request = self
            .client
            .patch(self.url(&format!("/records/{id}")))
            .json(&patch);
        let response = self.apply_auth(request).send().await?;
        Self::json_body(response).await
    }

    async fn delete_record(&self, id: Uuid) -> StoreResult<()> {
        let request = self.client.delete(self.url(&format!("/records/{id}")));
        let response = self.apply_auth(request).send().await?;
        // Some backends answer 204, some 200 with a body; either is fine.
        Self::checked(response).await?;
        Ok(())
    }
}
