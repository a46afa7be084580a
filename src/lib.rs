//! MealSnap client SDK
//!
//! Resilient client for the MealSnap photo-to-recipe inference service:
//! the user photographs a fridge or pantry, the client uploads the image(s)
//! with their preferences and gets structured recipe data back.
//!
//! The pipeline per call: look up the API key, downscale and re-encode the
//! photo(s), frame a multipart payload, send it with bounded retry and
//! exponential backoff, classify every failure into a closed error
//! taxonomy, and semantically validate 200 responses (was it food? were
//! ingredients found? were recipes generated?) before handing the result
//! to the caller. Every call ends in exactly one validated
//! [`RecipeResponse`] or one [`MealSnapError`].
//!
//! ```no_run
//! use mealsnap_client::{ClientConfig, MealSnapClient, RecipePreferences, StaticKeyProvider};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run(photo: Vec<u8>) -> mealsnap_client::Result<()> {
//! let client = MealSnapClient::new(
//!     ClientConfig::default(),
//!     StaticKeyProvider::new("app-api-key"),
//! )?;
//!
//! let cancel = CancellationToken::new();
//! let result = client
//!     .analyze_fridge_image(&photo, "session-42", RecipePreferences::default(), &cancel)
//!     .await?;
//!
//! println!("{} recipes generated", result.recipes.len());
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod media;
pub mod model;
pub mod multipart;
pub mod request;
pub mod retry;
pub mod secret;
pub mod transport;
pub mod validate;

#[cfg(test)]
pub(crate) mod tests;

pub use client::MealSnapClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ErrorCode, MealSnapError, Recovery, Result};
pub use model::{HealthStatus, Ingredient, Recipe, RecipeResponse};
pub use request::RecipePreferences;
pub use retry::RetryPolicy;
pub use secret::{SecretProvider, StaticKeyProvider};
