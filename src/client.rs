//! Public client surface for the MealSnap inference service
//!
//! Thin composition point: obtain the secret, prepare images, then let the
//! retry orchestrator drive per-attempt payload assembly, sending,
//! classification, decoding and semantic validation. No invariant lives
//! here that is not owned by one of those layers.

use tokio_util::sync::CancellationToken;

use crate::classify::classify;
use crate::config::ClientConfig;
use crate::error::{MealSnapError, Result};
use crate::media::{prepare_image, ImageRole};
use crate::model::{AnalysisEnvelope, HealthStatus, RecipeResponse};
use crate::request::{RecipePreferences, UploadRequest};
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::secret::SecretProvider;
use crate::transport::{HttpTransport, PreparedUpload, Transport};
use crate::validate::validate_response;

const ANALYZE_SINGLE_ENDPOINT: &str = "/analyze_fridge_image";
const ANALYZE_DUAL_ENDPOINT: &str = "/analyze_fridge_pantry_images";
const HEALTH_ENDPOINT: &str = "/health";

/// Client for the MealSnap photo-to-recipe service
///
/// Cheap to share: holds no per-call state, so concurrent calls from
/// different tasks are fully independent. Within one call, attempts are
/// strictly sequential.
#[derive(Debug, Clone)]
pub struct MealSnapClient<S, T> {
    secrets: S,
    transport: T,
    retry: RetryExecutor,
}

impl<S: SecretProvider> MealSnapClient<S, HttpTransport> {
    /// Create a production client backed by a reqwest transport
    pub fn new(config: ClientConfig, secrets: S) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self {
            secrets,
            transport,
            retry: RetryExecutor::default(),
        })
    }
}

impl<S: SecretProvider, T: Transport> MealSnapClient<S, T> {
    /// Create a client over an injected transport (tests, custom stacks)
    pub fn with_transport(secrets: S, transport: T) -> Self {
        Self {
            secrets,
            transport,
            retry: RetryExecutor::default(),
        }
    }

    /// Override the default retry policy
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = RetryExecutor::new(policy);
        self
    }

    /// Analyze a single fridge/pantry photo and generate recipes
    pub async fn analyze_fridge_image(
        &self,
        image: &[u8],
        session_id: &str,
        preferences: RecipePreferences,
        cancel: &CancellationToken,
    ) -> Result<RecipeResponse> {
        let api_key = self.api_key()?;
        let prepared = prepare_image(image, ImageRole::Ingredient)?;
        let request = UploadRequest::single(session_id, prepared, preferences);
        self.run_upload(ANALYZE_SINGLE_ENDPOINT, &api_key, &request, cancel)
            .await
    }

    /// Analyze paired fridge and pantry photos and generate recipes
    pub async fn analyze_fridge_and_pantry(
        &self,
        fridge_image: &[u8],
        pantry_image: &[u8],
        session_id: &str,
        preferences: RecipePreferences,
        cancel: &CancellationToken,
    ) -> Result<RecipeResponse> {
        let api_key = self.api_key()?;
        let fridge = prepare_image(fridge_image, ImageRole::Analysis)?;
        let pantry = prepare_image(pantry_image, ImageRole::Analysis)?;
        let request = UploadRequest::dual(session_id, fridge, pantry, preferences);
        self.run_upload(ANALYZE_DUAL_ENDPOINT, &api_key, &request, cancel)
            .await
    }

    /// Check service availability. Single attempt, no retry.
    pub async fn health_check(&self, cancel: &CancellationToken) -> Result<HealthStatus> {
        let api_key = self.api_key()?;

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(MealSnapError::Cancelled),
            response = self.transport.get(HEALTH_ENDPOINT, &api_key) => response?,
        };

        if let Some(err) = classify(response.status, Some(&response.body)) {
            return Err(err);
        }

        serde_json::from_slice(&response.body).map_err(Into::into)
    }

    /// A missing credential fails immediately, before any payload work:
    /// it will not fix itself, so retrying or encoding first is wasted.
    fn api_key(&self) -> Result<String> {
        self.secrets.api_key().ok_or_else(MealSnapError::missing_api_key)
    }

    async fn run_upload(
        &self,
        endpoint: &str,
        api_key: &str,
        request: &UploadRequest,
        cancel: &CancellationToken,
    ) -> Result<RecipeResponse> {
        tracing::info!(
            session_id = %request.session_id,
            endpoint,
            images = request.images.len(),
            "starting analysis upload"
        );

        let transport = &self.transport;
        self.retry
            .execute(cancel, move |attempt| async move {
                // The payload is rebuilt per attempt: fresh boundary, no
                // bytes shared with a previous send.
                let payload = request.encode()?;
                let upload = PreparedUpload {
                    endpoint: endpoint.to_string(),
                    api_key: api_key.to_string(),
                    payload,
                };

                tracing::debug!(attempt, session_id = %request.session_id, "sending attempt");
                let response = transport.send(upload).await?;

                if let Some(err) = classify(response.status, Some(&response.body)) {
                    return Err(err);
                }

                let envelope: AnalysisEnvelope = serde_json::from_slice(&response.body)?;
                validate_response(&envelope.data)?;
                Ok(RecipeResponse::from(envelope))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::error::{ErrorCode, Recovery};
    use crate::tests::mocks::MockTransport;
    use crate::tests::utils::test_helpers::{jpeg_image_bytes, sample_analysis_json};

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(50),
        }
    }

    fn client_with(transport: MockTransport) -> MealSnapClient<crate::secret::StaticKeyProvider, MockTransport> {
        MealSnapClient::with_transport(crate::secret::StaticKeyProvider::new("test-key"), transport)
            .with_retry_policy(fast_retry())
    }

    struct NoKeyProvider;
    impl crate::secret::SecretProvider for NoKeyProvider {
        fn api_key(&self) -> Option<String> {
            None
        }
    }

    #[tokio::test]
    async fn test_single_upload_success() {
        let transport = MockTransport::new();
        transport.push_response(200, sample_analysis_json(2, 3).into_bytes());
        let client = client_with(transport.clone());

        let response = client
            .analyze_fridge_image(
                &jpeg_image_bytes(640, 480),
                "sess-1",
                RecipePreferences::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(response.recipes.len(), 3);
        assert_eq!(response.ingredients.len(), 2);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint, "/analyze_fridge_image");
        assert_eq!(requests[0].api_key, "test-key");

        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"session_id\""));
        assert!(body.contains("sess-1"));
        assert!(body.contains("name=\"dietary_restrictions\""));
        assert!(body.contains("name=\"image_file\"; filename=\"image_file.jpg\""));
    }

    #[tokio::test]
    async fn test_dual_upload_uses_both_image_fields() {
        let transport = MockTransport::new();
        transport.push_response(200, sample_analysis_json(1, 1).into_bytes());
        let client = client_with(transport.clone());

        client
            .analyze_fridge_and_pantry(
                &jpeg_image_bytes(320, 240),
                &jpeg_image_bytes(320, 240),
                "sess-2",
                RecipePreferences::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].endpoint, "/analyze_fridge_pantry_images");
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"fridge_image\""));
        assert!(body.contains("name=\"pantry_image\""));
    }

    #[tokio::test]
    async fn test_retryable_failure_then_success() {
        let transport = MockTransport::new();
        transport.push_response(500, b"{\"message\": \"flaky\"}".to_vec());
        transport.push_response(200, sample_analysis_json(1, 1).into_bytes());
        let client = client_with(transport.clone());

        let response = client
            .analyze_fridge_image(
                &jpeg_image_bytes(320, 240),
                "sess-3",
                RecipePreferences::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(response.recipes.len(), 1);
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_payload_is_rebuilt_per_attempt() {
        let transport = MockTransport::new();
        transport.push_response(502, Vec::new());
        transport.push_response(200, sample_analysis_json(1, 1).into_bytes());
        let client = client_with(transport.clone());

        client
            .analyze_fridge_image(
                &jpeg_image_bytes(320, 240),
                "sess-4",
                RecipePreferences::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        // Fresh boundary per attempt, visible in the Content-Type header.
        assert_ne!(requests[0].content_type, requests[1].content_type);
    }

    #[tokio::test]
    async fn test_authentication_failure_is_not_retried() {
        let transport = MockTransport::new();
        transport.push_response(401, b"{\"message\": \"bad key\"}".to_vec());
        let client = client_with(transport.clone());

        let err = client
            .analyze_fridge_image(
                &jpeg_image_bytes(320, 240),
                "sess-5",
                RecipePreferences::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(err.is_auth_error());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_work() {
        let transport = MockTransport::new();
        let client = MealSnapClient::with_transport(NoKeyProvider, transport.clone());

        // Garbage image bytes: the secret check must fire before image
        // preparation ever sees them.
        let err = client
            .analyze_fridge_image(
                b"not an image",
                "sess-6",
                RecipePreferences::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::MissingApiKey);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_rate_limit_hint_survives_to_caller() {
        let transport = MockTransport::new();
        for _ in 0..3 {
            transport.push_response(429, b"{\"retry_after\": 12}".to_vec());
        }
        let client = client_with(transport.clone());

        let err = client
            .analyze_fridge_image(
                &jpeg_image_bytes(320, 240),
                "sess-7",
                RecipePreferences::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        // Rate limiting is retryable; after exhaustion the caller still
        // sees the server's retry-after hint.
        assert_eq!(transport.request_count(), 3);
        assert_eq!(err.recovery(), Recovery::RetryAfter(Duration::from_secs(12)));
    }

    #[tokio::test]
    async fn test_semantically_empty_success_is_an_error() {
        let transport = MockTransport::new();
        transport.push_response(200, sample_analysis_json(1, 0).into_bytes());
        let client = client_with(transport.clone());

        let err = client
            .analyze_fridge_image(
                &jpeg_image_bytes(320, 240),
                "sess-8",
                RecipePreferences::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::NoRecipesGenerated);
        // Semantic failures are final; no retry budget is spent on them.
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_decoding_error() {
        let transport = MockTransport::new();
        transport.push_response(200, b"<html>so sorry</html>".to_vec());
        let client = client_with(transport.clone());

        let err = client
            .analyze_fridge_image(
                &jpeg_image_bytes(320, 240),
                "sess-9",
                RecipePreferences::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, MealSnapError::Decoding { .. }));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_cancellation_mid_flight() {
        let transport = MockTransport::new().with_delay(Duration::from_secs(5));
        transport.push_response(200, sample_analysis_json(1, 1).into_bytes());
        let client = client_with(transport.clone());

        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let err = client
            .analyze_fridge_image(
                &jpeg_image_bytes(320, 240),
                "sess-10",
                RecipePreferences::default(),
                &cancel,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, MealSnapError::Cancelled));
    }

    #[tokio::test]
    async fn test_health_check() {
        let transport = MockTransport::new();
        transport.push_response(200, b"{\"status\": \"ok\", \"message\": \"running\"}".to_vec());
        let client = client_with(transport.clone());

        let health = client.health_check(&CancellationToken::new()).await.unwrap();
        assert_eq!(health.status, "ok");

        let requests = transport.requests();
        assert_eq!(requests[0].endpoint, "/health");
    }
}
