// ABOUTME: Hosted recipe catalog HTTP client with DTO-to-model mapping
// ABOUTME: Backend payload shapes stay internal; the trait returns Recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Hosted Catalog Client
//!
//! HTTP client for the third-party recipe API. The provider's response
//! shapes are deserialized into internal DTOs and converted to the shared
//! [`Recipe`] model at the boundary, so nothing outside this file knows
//! the provider's field names.

use super::{RecipeCatalog, SearchFilters};
use crate::config::CatalogConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, Nutrient, Recipe};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// HTTP client for the hosted recipe catalog
#[derive(Clone)]
pub struct RemoteCatalog {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RecipeDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeDto {
    id: serde_json::Value,
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    servings: Option<u32>,
    #[serde(default)]
    ready_in_minutes: Option<u32>,
    #[serde(default)]
    preparation_minutes: Option<u32>,
    #[serde(default)]
    cooking_minutes: Option<u32>,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    source_name: Option<String>,
    #[serde(default)]
    dish_types: Vec<String>,
    #[serde(default)]
    diets: Vec<String>,
    #[serde(default)]
    nutrition: Option<NutritionDto>,
    #[serde(default)]
    extended_ingredients: Vec<IngredientDto>,
    #[serde(default)]
    analyzed_instructions: Vec<InstructionBlockDto>,
}

#[derive(Debug, Deserialize)]
struct NutritionDto {
    #[serde(default)]
    nutrients: Vec<NutrientDto>,
}

#[derive(Debug, Deserialize)]
struct NutrientDto {
    name: String,
    amount: f64,
    unit: String,
}

#[derive(Debug, Deserialize)]
struct IngredientDto {
    name: String,
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InstructionBlockDto {
    #[serde(default)]
    steps: Vec<InstructionStepDto>,
}

#[derive(Debug, Deserialize)]
struct InstructionStepDto {
    step: String,
}

impl From<RecipeDto> for Recipe {
    fn from(dto: RecipeDto) -> Self {
        // the provider serves numeric ids; normalize to strings
        let id = match &dto.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let nutrients: Vec<Nutrient> = dto
            .nutrition
            .map(|n| {
                n.nutrients
                    .into_iter()
                    .map(|n| Nutrient {
                        name: n.name,
                        amount: n.amount,
                        unit: n.unit,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let calories = nutrients
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case("calories"))
            .map(|n| n.amount);

        Self {
            id,
            title: dto.title,
            image: dto.image,
            calories,
            servings: dto.servings,
            ready_in_minutes: dto.ready_in_minutes,
            prep_time: dto.preparation_minutes,
            cook_time: dto.cooking_minutes,
            source_url: dto.source_url,
            source_name: dto.source_name,
            dish_types: dto.dish_types,
            diets: dto.diets,
            nutrients,
            ingredients: dto
                .extended_ingredients
                .into_iter()
                .map(|i| Ingredient {
                    name: i.name,
                    amount: i.amount,
                    unit: i.unit,
                })
                .collect(),
            instructions: dto
                .analyzed_instructions
                .into_iter()
                .flat_map(|block| block.steps)
                .map(|step| step.step)
                .collect(),
        }
    }
}

impl RemoteCatalog {
    /// Create a client from catalog configuration
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is malformed or the HTTP client
    /// cannot be constructed
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::invalid_input(format!("catalog base url: {e}")))?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(AppError::from)?;
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| AppError::invalid_input("catalog base url cannot be a base"))?;
            for segment in segments {
                path.push(segment);
            }
        }
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("apiKey", key);
        }
        Ok(url)
    }

    async fn fetch<T>(&self, url: Url) -> AppResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        debug!(%url, "catalog GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found("recipe not found in catalog"));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "catalog returned {status}: {body}"
            )));
        }
        response.json().await.map_err(AppError::from)
    }
}

#[async_trait]
impl RecipeCatalog for RemoteCatalog {
    async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: usize,
    ) -> AppResult<Vec<Recipe>> {
        let mut url = self.endpoint(&["recipes", "complexSearch"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query.trim());
            pairs.append_pair("number", &limit.to_string());
            pairs.append_pair("addRecipeNutrition", "true");
            if let Some(diet) = filters.diet.as_deref().filter(|d| !d.trim().is_empty()) {
                pairs.append_pair("diet", diet.trim());
            }
            if let Some(max_calories) = filters.max_calories {
                pairs.append_pair("maxCalories", &max_calories.to_string());
            }
        }
        let response: SearchResponse = self.fetch(url).await?;
        Ok(response.results.into_iter().map(Recipe::from).collect())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Recipe> {
        let mut url = self.endpoint(&["recipes", id, "information"])?;
        url.query_pairs_mut()
            .append_pair("includeNutrition", "true");
        let dto: RecipeDto = self.fetch(url).await?;
        Ok(Recipe::from(dto))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_mapping_normalizes_id_and_calories() {
        let payload = serde_json::json!({
            "id": 12345,
            "title": "Roast Vegetables",
            "servings": 4,
            "readyInMinutes": 45,
            "diets": ["vegan"],
            "nutrition": {
                "nutrients": [
                    {"name": "Calories", "amount": 390.0, "unit": "kcal"},
                    {"name": "Protein", "amount": 9.0, "unit": "g"}
                ]
            },
            "extendedIngredients": [
                {"name": "carrot", "amount": 3.0, "unit": "pcs"},
                {"name": "potato"}
            ],
            "analyzedInstructions": [
                {"steps": [{"step": "Chop."}, {"step": "Roast."}]}
            ]
        });
        let dto: RecipeDto = serde_json::from_value(payload).unwrap();
        let recipe = Recipe::from(dto);
        assert_eq!(recipe.id, "12345");
        assert_eq!(recipe.calories, Some(390.0));
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.instructions, vec!["Chop.", "Roast."]);
        assert_eq!(recipe.diets, vec!["vegan"]);
    }

    #[test]
    fn test_endpoint_appends_api_key() {
        let config = CatalogConfig {
            base_url: "https://api.example.com".into(),
            api_key: Some("k-123".into()),
            search_limit: 20,
        };
        let catalog = RemoteCatalog::new(&config).unwrap();
        let url = catalog.endpoint(&["recipes", "complexSearch"]).unwrap();
        assert!(url.as_str().contains("apiKey=k-123"));
    }
}
