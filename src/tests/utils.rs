//! Test utilities and helpers for unit tests
//!
//! This module provides common fixtures:
//! - Sample wire responses matching the service contract
//! - Domain object builders
//! - Synthetic test images

pub mod test_helpers {
    use std::io::Cursor;

    use image::codecs::jpeg::JpegEncoder;
    use image::{Rgb, RgbImage};
    use serde_json::{json, Value};

    use crate::model::{ImageAnalysis, Ingredient, Recipe, RecipeData};

    /// JPEG bytes of a synthetic image with the given dimensions
    pub fn jpeg_image_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([120, 180, 90]));
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut Cursor::new(&mut bytes), 75)
            .encode_image(&img)
            .expect("Failed to encode test image");
        bytes
    }

    /// A complete analysis response body with the requested counts
    pub fn sample_analysis_json(ingredients: usize, recipes: usize) -> String {
        let ingredients: Vec<Value> = (0..ingredients)
            .map(|i| {
                json!({
                    "name": format!("ingredient-{}", i),
                    "quantity": "1",
                    "unit": "piece",
                    "category": "produce",
                    "freshness": "fresh",
                    "location": "top shelf"
                })
            })
            .collect();

        let recipes: Vec<Value> = (0..recipes)
            .map(|i| {
                json!({
                    "id": format!("recipe-{}", i),
                    "name": format!("Recipe {}", i),
                    "description": "A quick test dish",
                    "total_time": 25,
                    "servings": 2,
                    "difficulty": "easy",
                    "ingredients_used": [{"name": "eggs", "amount": "2"}],
                    "instructions": ["prep", "cook", "serve"],
                    "nutrition": {"calories": 320, "protein": 18, "carbs": 24, "fat": 14},
                    "tags": ["quick", "weeknight"]
                })
            })
            .collect();

        json!({
            "message": "Recipe generation successful.",
            "data": {
                "image_analysis": {
                    "is_food_image": true,
                    "confidence": "high",
                    "image_description": "a stocked fridge"
                },
                "ingredients": ingredients,
                "recipes": recipes
            }
        })
        .to_string()
    }

    pub fn sample_ingredient(name: &str) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            quantity: "1".to_string(),
            unit: "piece".to_string(),
            category: "produce".to_string(),
            freshness: "fresh".to_string(),
            location: None,
        }
    }

    pub fn sample_recipe(name: &str) -> Recipe {
        Recipe {
            id: "recipe-1".to_string(),
            name: name.to_string(),
            description: "A quick test dish".to_string(),
            main_dish: None,
            side_dish: None,
            total_time: Some(25),
            prep_time: None,
            cook_time: None,
            servings: Some(2),
            difficulty: "easy".to_string(),
            ingredients_used: Vec::new(),
            instructions: vec!["prep".to_string(), "cook".to_string()],
            nutrition: None,
            tips: None,
            tags: Vec::new(),
            share_caption: None,
        }
    }

    pub fn sample_recipe_data(ingredients: Vec<Ingredient>, recipes: Vec<Recipe>) -> RecipeData {
        RecipeData {
            image_analysis: ImageAnalysis {
                is_food_image: true,
                confidence: "high".to_string(),
                image_description: "a stocked fridge".to_string(),
            },
            ingredients,
            recipes,
        }
    }
}
