//! Wire model for the MealSnap inference service responses

use serde::Deserialize;

/// Top-level envelope of an analysis response
#[derive(Debug, Deserialize)]
pub struct AnalysisEnvelope {
    #[serde(default)]
    pub message: String,
    pub data: RecipeData,
}

/// Decoded analysis payload, not yet semantically validated
#[derive(Debug, Deserialize)]
pub struct RecipeData {
    pub image_analysis: ImageAnalysis,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// The model's verdict on the uploaded photo
#[derive(Debug, Clone, Deserialize)]
pub struct ImageAnalysis {
    pub is_food_image: bool,
    pub confidence: String,
    pub image_description: String,
}

/// A single detected ingredient
#[derive(Debug, Clone, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
    pub freshness: String,
    pub location: Option<String>,
}

/// Per-recipe nutrition estimates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: i32,
    #[serde(default)]
    pub protein: i32,
    #[serde(default)]
    pub carbs: i32,
    #[serde(default)]
    pub fat: i32,
    pub fiber: Option<i32>,
    pub sugar: Option<i32>,
    pub sodium: Option<i32>,
}

/// An ingredient as used by a generated recipe
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientUsed {
    pub name: String,
    pub amount: String,
}

/// A generated recipe
#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub main_dish: Option<String>,
    pub side_dish: Option<String>,
    pub total_time: Option<u32>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: String,
    #[serde(default)]
    pub ingredients_used: Vec<IngredientUsed>,
    pub instructions: Vec<String>,
    pub nutrition: Option<Nutrition>,
    pub tips: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub share_caption: Option<String>,
}

/// Validated analysis result handed to the caller
///
/// Only produced after the semantic validator has accepted the decoded
/// payload; an HTTP 200 alone is never enough.
#[derive(Debug)]
pub struct RecipeResponse {
    pub message: String,
    pub image_analysis: ImageAnalysis,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
}

impl From<AnalysisEnvelope> for RecipeResponse {
    fn from(envelope: AnalysisEnvelope) -> Self {
        Self {
            message: envelope.message,
            image_analysis: envelope.data.image_analysis,
            ingredients: envelope.data.ingredients,
            recipes: envelope.data.recipes,
        }
    }
}

/// Response of the service health endpoint
#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}
