//! Unified error handling for the MealSnap client SDK
//!
//! This module provides the closed error taxonomy for the upload pipeline:
//! - Unique error codes for debugging and documentation
//! - Structured error information (status, field, retry-after hints)
//! - Convenient constructor methods
//! - Retryability and recovery classification consumed by the retry
//!   orchestrator and the presentation layer

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Unified Result type for all MealSnap client operations
pub type Result<T> = std::result::Result<T, MealSnapError>;

/// Error codes for MealSnap client operations
///
/// Each error has a unique code in the format `MXXX` where:
/// - M1XX: Authentication and authorization errors
/// - M2XX: Network and API errors
/// - M3XX: Validation and input errors
/// - M4XX: Recipe analysis (domain) errors
/// - M8XX: Cancellation
/// - M9XX: Internal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Authentication (M1XX)
    /// M101: Authentication failed
    AuthenticationFailed,
    /// M102: Authorization denied
    AuthorizationDenied,
    /// M103: API key unavailable
    MissingApiKey,

    // Network (M2XX)
    /// M201: HTTP request failed
    HttpError,
    /// M202: Request timed out
    ConnectionTimeout,
    /// M203: No network connectivity
    NoConnectivity,
    /// M204: Connection refused
    ConnectionRefused,
    /// M205: API returned error response
    ApiError,
    /// M206: Invalid API response format
    InvalidResponse,
    /// M207: Rate limited by server
    RateLimited,

    // Validation (M3XX)
    /// M301: Validation failed
    ValidationFailed,
    /// M302: Invalid input
    InvalidInput,
    /// M303: Image too large
    ImageTooLarge,
    /// M304: Image could not be encoded
    ImageEncodingFailed,

    // Domain (M4XX)
    /// M401: Photo is not a food image
    NotFoodImage,
    /// M402: No ingredients detected
    NoIngredientsDetected,
    /// M403: No recipes generated
    NoRecipesGenerated,

    // Cancellation (M8XX)
    /// M801: Operation cancelled by caller
    UserCancelled,

    // Internal (M9XX)
    /// M901: Internal error
    InternalError,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u16 {
        match self {
            // Authentication (M1XX)
            ErrorCode::AuthenticationFailed => 101,
            ErrorCode::AuthorizationDenied => 102,
            ErrorCode::MissingApiKey => 103,

            // Network (M2XX)
            ErrorCode::HttpError => 201,
            ErrorCode::ConnectionTimeout => 202,
            ErrorCode::NoConnectivity => 203,
            ErrorCode::ConnectionRefused => 204,
            ErrorCode::ApiError => 205,
            ErrorCode::InvalidResponse => 206,
            ErrorCode::RateLimited => 207,

            // Validation (M3XX)
            ErrorCode::ValidationFailed => 301,
            ErrorCode::InvalidInput => 302,
            ErrorCode::ImageTooLarge => 303,
            ErrorCode::ImageEncodingFailed => 304,

            // Domain (M4XX)
            ErrorCode::NotFoodImage => 401,
            ErrorCode::NoIngredientsDetected => 402,
            ErrorCode::NoRecipesGenerated => 403,

            // Cancellation (M8XX)
            ErrorCode::UserCancelled => 801,

            // Internal (M9XX)
            ErrorCode::InternalError => 901,
        }
    }

    /// Get the string code (e.g., "M101")
    pub fn as_str(&self) -> String {
        format!("M{}", self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.code())
    }
}

/// Recovery hint attached to every surfaced error
///
/// The presentation layer chooses "show retry button" vs. "show support
/// contact" vs. "requeue after N seconds" from this hint instead of
/// re-deriving the decision from a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// The operation may succeed if attempted again
    Retry,
    /// The operation may succeed after the given delay
    RetryAfter(Duration),
    /// The user should contact support
    ContactSupport,
    /// No recovery action will change the outcome
    None,
}

/// Main error type for all MealSnap client operations
#[derive(Error, Debug)]
pub enum MealSnapError {
    // ==================== Authentication Errors (M1XX) ====================
    /// Authentication failed
    #[error("[{code}] Authentication failed: {message}")]
    Authentication { code: ErrorCode, message: String },

    /// Authorization denied
    #[error("[{code}] Authorization denied: {message}")]
    Authorization { code: ErrorCode, message: String },

    // ==================== Network Errors (M2XX) ====================
    /// HTTP/Network error
    #[error("[{code}] Network error: {message}")]
    Network {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Request timed out
    #[error("[M202] Request timed out: {message}")]
    Timeout { message: String },

    /// API error with status code
    #[error("[{code}] API error ({status}): {message}")]
    Api {
        code: ErrorCode,
        status: u16,
        message: String,
        retry_after: Option<Duration>,
    },

    /// Rate limited by the server
    #[error("[M207] Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after: Duration,
    },

    // ==================== Validation Errors (M3XX) ====================
    /// Validation error
    #[error("[{code}] Validation error: {message}")]
    Validation {
        code: ErrorCode,
        message: String,
        field: Option<String>,
    },

    // ==================== Domain Errors (M4XX) ====================
    /// The uploaded photo is not a food image
    #[error("[M401] Not a food image: {message}")]
    NotFoodImage { message: String },

    /// No usable ingredients or recipes came back
    #[error("[{code}] {message}")]
    NoIngredients { code: ErrorCode, message: String },

    /// Response body could not be decoded
    #[error("[M206] Failed to decode response: {message}")]
    Decoding {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // ==================== Cancellation (M8XX) ====================
    /// The caller cancelled the operation
    #[error("[M801] Operation cancelled")]
    Cancelled,

    // ==================== Internal Errors (M9XX) ====================
    /// Internal/Unexpected error
    #[error("[M901] Internal error: {message}")]
    Internal { message: String },
}

// ==================== Constructor Methods ====================

impl MealSnapError {
    // --- Authentication ---

    /// Create authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            code: ErrorCode::AuthenticationFailed,
            message: message.into(),
        }
    }

    /// Create missing-API-key error (fatal configuration problem)
    pub fn missing_api_key() -> Self {
        Self::Authentication {
            code: ErrorCode::MissingApiKey,
            message: "No API key available from the secret provider".to_string(),
        }
    }

    /// Create authorization error
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            code: ErrorCode::AuthorizationDenied,
            message: message.into(),
        }
    }

    // --- Network ---

    /// Create network error from message
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            code: ErrorCode::HttpError,
            message: message.into(),
            source: None,
        }
    }

    /// Create no-connectivity error (non-retryable)
    pub fn no_connectivity(message: impl Into<String>) -> Self {
        Self::Network {
            code: ErrorCode::NoConnectivity,
            message: message.into(),
            source: None,
        }
    }

    /// Create network error from reqwest error
    pub fn network_from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                message: err.to_string(),
            };
        }

        let code = if err.is_connect() {
            if describes_unreachable(&err) {
                ErrorCode::NoConnectivity
            } else {
                ErrorCode::ConnectionRefused
            }
        } else {
            ErrorCode::HttpError
        };

        Self::Network {
            code,
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code: ErrorCode::ApiError,
            status,
            message: message.into(),
            retry_after: None,
        }
    }

    /// Create API error carrying a server-supplied retry-after hint
    pub fn api_with_retry_after(
        status: u16,
        message: impl Into<String>,
        retry_after: Duration,
    ) -> Self {
        Self::Api {
            code: ErrorCode::ApiError,
            status,
            message: message.into(),
            retry_after: Some(retry_after),
        }
    }

    /// Create rate-limited error
    pub fn rate_limited(message: impl Into<String>, retry_after: Duration) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after,
        }
    }

    // --- Validation ---

    /// Create validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            field: None,
        }
    }

    /// Create validation error with field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::InvalidInput,
            message: message.into(),
            field: None,
        }
    }

    /// Create image encoding error (caller input problem, never retried)
    pub fn image_encoding(message: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::ImageEncodingFailed,
            message: message.into(),
            field: None,
        }
    }

    // --- Domain ---

    /// Create not-a-food-image error
    pub fn not_food_image(message: impl Into<String>) -> Self {
        Self::NotFoodImage {
            message: message.into(),
        }
    }

    /// Create no-ingredients-detected error
    pub fn no_ingredients(message: impl Into<String>) -> Self {
        Self::NoIngredients {
            code: ErrorCode::NoIngredientsDetected,
            message: message.into(),
        }
    }

    /// Create no-recipes-generated error
    pub fn no_recipes(message: impl Into<String>) -> Self {
        Self::NoIngredients {
            code: ErrorCode::NoRecipesGenerated,
            message: message.into(),
        }
    }

    /// Create decoding error
    pub fn decoding(message: impl Into<String>) -> Self {
        Self::Decoding {
            message: message.into(),
            source: None,
        }
    }

    // --- Internal ---

    /// Create internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // --- Utility Methods ---

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Authentication { code, .. } => *code,
            Self::Authorization { code, .. } => *code,
            Self::Network { code, .. } => *code,
            Self::Timeout { .. } => ErrorCode::ConnectionTimeout,
            Self::Api { code, .. } => *code,
            Self::RateLimited { .. } => ErrorCode::RateLimited,
            Self::Validation { code, .. } => *code,
            Self::NotFoodImage { .. } => ErrorCode::NotFoodImage,
            Self::NoIngredients { code, .. } => *code,
            Self::Decoding { .. } => ErrorCode::InvalidResponse,
            Self::Cancelled => ErrorCode::UserCancelled,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Check if this is an authentication error
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::Authorization { .. }
        )
    }

    /// Check if this is a retryable error
    ///
    /// Request-shape errors (authentication, authorization, validation),
    /// domain errors, decode failures, cancellation, and no-connectivity
    /// network failures are never retried; transient network, timeout,
    /// rate-limit, and server errors are.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { code, .. } => *code != ErrorCode::NoConnectivity,
            Self::Timeout { .. } | Self::Api { .. } | Self::RateLimited { .. } => true,
            _ => false,
        }
    }

    /// Get the recovery hint for the presentation layer
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::Network { code, .. } => {
                if *code == ErrorCode::NoConnectivity {
                    Recovery::None
                } else {
                    Recovery::Retry
                }
            }
            Self::Timeout { .. } => Recovery::Retry,
            Self::Api {
                status,
                retry_after,
                ..
            } => match *status {
                404 | 501 => Recovery::ContactSupport,
                503 => Recovery::RetryAfter(retry_after.unwrap_or(Duration::from_secs(300))),
                _ => Recovery::Retry,
            },
            Self::RateLimited { retry_after, .. } => Recovery::RetryAfter(*retry_after),
            Self::Decoding { .. } => Recovery::ContactSupport,
            Self::Internal { .. } => Recovery::Retry,
            Self::Authentication { .. }
            | Self::Authorization { .. }
            | Self::Validation { .. }
            | Self::NotFoodImage { .. }
            | Self::NoIngredients { .. }
            | Self::Cancelled => Recovery::None,
        }
    }
}

// ==================== From Implementations ====================

impl From<reqwest::Error> for MealSnapError {
    fn from(err: reqwest::Error) -> Self {
        Self::network_from_reqwest(err)
    }
}

impl From<serde_json::Error> for MealSnapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decoding {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Best-effort detection of an unreachable-network failure in a connect
/// error chain. reqwest has no dedicated kind for it, so the rendered
/// causes are inspected.
fn describes_unreachable(err: &reqwest::Error) -> bool {
    let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = cause {
        let text = e.to_string().to_lowercase();
        if text.contains("network is unreachable")
            || text.contains("host is unreachable")
            || text.contains("network unreachable")
        {
            return true;
        }
        cause = e.source();
    }
    false
}
