//! Client configuration for the MealSnap SDK

use std::time::Duration;

use crate::error::{MealSnapError, Result};

/// Default per-attempt timeout. Image analysis is slow, so this is
/// deliberately generous; a hung call becomes a timeout error here, not in
/// the retry orchestrator.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the MealSnap API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the inference service, e.g. `https://api.mealsnap.app`
    pub base_url: String,
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Whether to honor system proxy settings
    pub use_proxy: bool,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mealsnap.app".to_string(),
            timeout: DEFAULT_TIMEOUT,
            use_proxy: true,
            user_agent: format!("mealsnap-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(MealSnapError::invalid_input("Base URL must not be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(MealSnapError::invalid_input(format!(
                "Base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(MealSnapError::invalid_input("Timeout must be nonzero"));
        }

        Ok(())
    }

    /// Build a full endpoint URL from a path like `/analyze_fridge_image`
    pub fn endpoint_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    use_proxy: Option<bool>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn use_proxy(mut self, use_proxy: bool) -> Self {
        self.use_proxy = Some(use_proxy);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let defaults = ClientConfig::default();
        let config = ClientConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            use_proxy: self.use_proxy.unwrap_or(defaults.use_proxy),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        };

        config.validate()?;
        Ok(config)
    }
}
