use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{Usuario, UsuarioApi, UsuarioDraft, UsuarioId};
use crate::error::ApiError;

/// reqwest-backed client for a REST collection such as `/api/usuario`.
#[derive(Clone, Debug)]
pub struct HttpUsuarioApi {
    client: Client,
    base: Url,
}

impl HttpUsuarioApi {
    /// Build a client for the collection at `base_url`. `timeout` of `None`
    /// leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base = Url::parse(base_url.trim()).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an http(s) url".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().map_err(ApiError::Client)?;

        debug!(base = %base, ?timeout, "created usuario api client");
        Ok(Self { client, base })
    }

    pub fn collection_url(&self) -> Url {
        self.base.clone()
    }

    /// `{base}/{id}` with the id percent-encoded as a single path segment.
    pub fn item_url(&self, id: &UsuarioId) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    async fn send(&self, method: &'static str, url: &Url, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        debug!(method, %url, "sending request");
        let response = request.send().await.map_err(|source| ApiError::Transport {
            method,
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { method, url: url.to_string(), status: status.as_u16(), body })
    }

    async fn json<T: DeserializeOwned>(method: &'static str, url: &Url, response: reqwest::Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            method,
            url: url.to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            method,
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl UsuarioApi for HttpUsuarioApi {
    fn endpoint(&self) -> String {
        self.base.to_string()
    }

    async fn list(&self) -> Result<Vec<Usuario>, ApiError> {
        let url = self.collection_url();
        let response = self.send("GET", &url, self.client.get(url.clone())).await?;
        Self::json("GET", &url, response).await
    }

    async fn create(&self, draft: &UsuarioDraft) -> Result<Usuario, ApiError> {
        let url = self.collection_url();
        let response = self.send("POST", &url, self.client.post(url.clone()).json(draft)).await?;
        Self::json("POST", &url, response).await
    }

    async fn update(&self, id: &UsuarioId, draft: &UsuarioDraft) -> Result<Usuario, ApiError> {
        let url = self.item_url(id);
        let response = self.send("PUT", &url, self.client.put(url.clone()).json(draft)).await?;
        Self::json("PUT", &url, response).await
    }

    async fn delete(&self, id: &UsuarioId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        self.send("DELETE", &url, self.client.delete(url.clone())).await?;
        Ok(())
    }
}
