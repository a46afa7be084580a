//! Network transport seam
//!
//! The retry orchestrator only knows this trait; production uses the
//! reqwest-backed [`HttpTransport`], tests substitute a scripted mock.
//! Transport-level failures (no connectivity, refused connections,
//! timeouts) are mapped to error kinds here; status classification of
//! completed responses happens a layer up.

use reqwest::header::CONTENT_TYPE;

use crate::config::ClientConfig;
use crate::error::{MealSnapError, Result};
use crate::multipart::EncodedPayload;

/// Header carrying the application API key
pub const API_KEY_HEADER: &str = "X-App-API-Key";

/// One attempt's worth of request: endpoint, credential and framed body.
/// Owned by exactly one attempt and consumed by the send.
#[derive(Debug)]
pub struct PreparedUpload {
    pub endpoint: String,
    pub api_key: String,
    pub payload: EncodedPayload,
}

/// A completed HTTP exchange: status plus raw body bytes
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Abstraction over the HTTP layer
pub trait Transport: Send + Sync {
    /// POST a multipart upload. Errors only for transport-level failures;
    /// non-2xx statuses come back as a normal [`TransportResponse`].
    fn send(
        &self,
        upload: PreparedUpload,
    ) -> impl std::future::Future<Output = Result<TransportResponse>> + Send;

    /// Plain GET against a service endpoint (health checks)
    fn get(
        &self,
        endpoint: &str,
        api_key: &str,
    ) -> impl std::future::Future<Output = Result<TransportResponse>> + Send;
}

/// Production transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());

        if !config.use_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build().map_err(MealSnapError::network_from_reqwest)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn read_response(response: reqwest::Response) -> Result<TransportResponse> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(MealSnapError::network_from_reqwest)?
            .to_vec();
        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, upload: PreparedUpload) -> Result<TransportResponse> {
        let url = self.config.endpoint_url(&upload.endpoint);
        let content_type = upload.payload.content_type();

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &upload.api_key)
            .header(CONTENT_TYPE, content_type)
            .body(upload.payload.bytes)
            .send()
            .await
            .map_err(MealSnapError::network_from_reqwest)?;

        Self::read_response(response).await
    }

    async fn get(&self, endpoint: &str, api_key: &str) -> Result<TransportResponse> {
        let url = self.config.endpoint_url(endpoint);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(MealSnapError::network_from_reqwest)?;

        Self::read_response(response).await
    }
}
