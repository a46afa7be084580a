//! Semantic validation of decoded responses
//!
//! The inference service can return a syntactically valid 200 that is
//! useless to the user: the photo was not food, nothing was detected, or
//! recipe generation came back empty. HTTP success is never conflated with
//! a usable result; every decoded payload passes this gate before being
//! surfaced as success.

use crate::error::{MealSnapError, Result};
use crate::model::RecipeData;

/// Accept or reject a decoded analysis payload.
///
/// Rules apply in order: non-food image first, then missing ingredients,
/// then empty recipe generation.
pub fn validate_response(data: &RecipeData) -> Result<()> {
    if !data.image_analysis.is_food_image {
        return Err(MealSnapError::not_food_image(
            "This doesn't look like a photo of food. Try retaking the picture of your fridge or pantry.",
        ));
    }

    if data.ingredients.is_empty() {
        return Err(MealSnapError::no_ingredients(
            "No ingredients could be detected. Try better lighting or a clearer shot.",
        ));
    }

    if data.recipes.is_empty() {
        return Err(MealSnapError::no_recipes(
            "Ingredients were found but recipe generation failed. Try adding more ingredients or loosening your preferences.",
        ));
    }

    Ok(())
}
