//! Upload request model and payload assembly

use crate::error::{MealSnapError, Result};
use crate::media::PreparedImage;
use crate::multipart::{EncodedPayload, MultipartBody};

/// Optional user preferences attached to an analysis request
///
/// Every field maps to a fixed form-field name on the wire. Scalar fields
/// are omitted when unset; `dietary_restrictions` is always sent (an empty
/// list goes out as the literal `[]`, which the server treats as its
/// default), while the other array fields are omitted entirely when empty.
#[derive(Debug, Clone, Default)]
pub struct RecipePreferences {
    pub dietary_restrictions: Vec<String>,
    pub food_type: Option<String>,
    pub difficulty_preference: Option<String>,
    pub health_preference: Option<String>,
    pub meal_type: Option<String>,
    pub cooking_time_preference: Option<String>,
    pub number_of_recipes: Option<u32>,
    pub llm_provider: Option<String>,
    pub existing_recipe_names: Vec<String>,
    pub food_preferences: Vec<String>,
}

/// One image part of an upload
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub field_name: String,
    pub filename: String,
    pub media_type: String,
    pub jpeg: Vec<u8>,
}

impl ImagePart {
    pub fn new(field_name: &str, image: PreparedImage) -> Self {
        Self {
            field_name: field_name.to_string(),
            filename: format!("{}.jpg", field_name),
            media_type: "image/jpeg".to_string(),
            jpeg: image.jpeg,
        }
    }
}

/// A fully assembled upload request, immutable once constructed
///
/// Built fresh per call; the encoded payload it produces is owned by a
/// single attempt and rebuilt (with a new boundary) for every retry.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub session_id: String,
    pub images: Vec<ImagePart>,
    pub preferences: RecipePreferences,
}

impl UploadRequest {
    /// Single-image request (`image_file` field)
    pub fn single(session_id: &str, image: PreparedImage, preferences: RecipePreferences) -> Self {
        Self {
            session_id: session_id.to_string(),
            images: vec![ImagePart::new("image_file", image)],
            preferences,
        }
    }

    /// Dual-image request (`fridge_image` + `pantry_image` fields)
    pub fn dual(
        session_id: &str,
        fridge: PreparedImage,
        pantry: PreparedImage,
        preferences: RecipePreferences,
    ) -> Self {
        Self {
            session_id: session_id.to_string(),
            images: vec![
                ImagePart::new("fridge_image", fridge),
                ImagePart::new("pantry_image", pantry),
            ],
            preferences,
        }
    }

    /// Ordered text fields for the multipart body
    pub fn form_fields(&self) -> Result<Vec<(String, String)>> {
        let prefs = &self.preferences;
        let mut fields = Vec::new();

        fields.push(("session_id".to_string(), self.session_id.clone()));
        fields.push((
            "dietary_restrictions".to_string(),
            json_array(&prefs.dietary_restrictions)?,
        ));

        if let Some(ref food_type) = prefs.food_type {
            fields.push(("food_type".to_string(), food_type.clone()));
        }
        if let Some(ref difficulty) = prefs.difficulty_preference {
            fields.push(("difficulty_preference".to_string(), difficulty.clone()));
        }
        if let Some(ref health) = prefs.health_preference {
            fields.push(("health_preference".to_string(), health.clone()));
        }
        if let Some(ref meal_type) = prefs.meal_type {
            fields.push(("meal_type".to_string(), meal_type.clone()));
        }
        if let Some(ref cooking_time) = prefs.cooking_time_preference {
            fields.push(("cooking_time_preference".to_string(), cooking_time.clone()));
        }
        if let Some(count) = prefs.number_of_recipes {
            fields.push(("number_of_recipes".to_string(), count.to_string()));
        }
        if let Some(ref provider) = prefs.llm_provider {
            fields.push(("llm_provider".to_string(), provider.clone()));
        }
        if !prefs.existing_recipe_names.is_empty() {
            fields.push((
                "existing_recipe_names".to_string(),
                json_array(&prefs.existing_recipe_names)?,
            ));
        }
        if !prefs.food_preferences.is_empty() {
            fields.push((
                "food_preferences".to_string(),
                json_array(&prefs.food_preferences)?,
            ));
        }

        Ok(fields)
    }

    /// Frame the request into a multipart body with a fresh boundary
    pub fn encode(&self) -> Result<EncodedPayload> {
        let mut body = MultipartBody::new();

        for (name, value) in self.form_fields()? {
            body.text(&name, &value);
        }
        for image in &self.images {
            body.file(&image.field_name, &image.filename, &image.media_type, &image.jpeg);
        }

        let payload = body.finish();
        tracing::debug!(
            session_id = %self.session_id,
            images = self.images.len(),
            payload_bytes = payload.bytes.len(),
            "encoded upload payload"
        );
        Ok(payload)
    }
}

fn json_array(values: &[String]) -> Result<String> {
    serde_json::to_string(values)
        .map_err(|e| MealSnapError::invalid_input(format!("Failed to serialize field: {}", e)))
}
