//! Secret lookup seam for the MealSnap client
//!
//! The client never owns credential storage; the surrounding application
//! loads the key (keychain, remote config, ...) and hands it in through
//! this trait. The token is opaque to the client.

/// Read-only provider of the application API key
pub trait SecretProvider: Send + Sync {
    /// Return the current API key, or `None` if no key is available.
    ///
    /// A `None` here is a fatal configuration error for every upload:
    /// a missing credential will not fix itself, so it is surfaced
    /// immediately and never retried.
    fn api_key(&self) -> Option<String>;
}

/// Secret provider backed by a key handed in at construction time
#[derive(Debug, Clone)]
pub struct StaticKeyProvider {
    key: String,
}

impl StaticKeyProvider {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SecretProvider for StaticKeyProvider {
    fn api_key(&self) -> Option<String> {
        if self.key.is_empty() {
            None
        } else {
            Some(self.key.clone())
        }
    }
}
