//! Recipe catalog and own-recipe endpoints
//!
//! The random/info/search endpoints proxy the external catalog and are
//! unauthenticated; the `myRecipes` endpoints ride on the session cookie.
//! A 402 from the proxy means the catalog quota is exhausted and maps to
//! `LadleError::QuotaExceeded` so callers can render the specific fallback
//! instead of a generic failure.

use super::client::{ApiClient, GET_TIMEOUT, SEARCH_TIMEOUT, WRITE_TIMEOUT};
use crate::recipe::{NewRecipe, Recipe, RecipeDetails, RecipeId, SearchQuery};
use crate::session::RecipeFeed;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct CreateRecipeRequest<'a> {
    recipe: &'a NewRecipe,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRecipeResponse {
    recipe_id: RecipeId,
}

impl ApiClient {
    /// Fetch `number` random recipes for the landing page.
    pub async fn random_recipes(&self, number: u32) -> Result<Vec<Recipe>> {
        let response = self
            .http()
            .get(self.url("/recipes/random"))
            .query(&[("number", number)])
            .timeout(GET_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Fetch full details for one recipe.
    pub async fn recipe_info(&self, id: &RecipeId) -> Result<RecipeDetails> {
        let response = self
            .http()
            .get(self.url("/recipes/info"))
            .query(&[("recipeId", id.as_str())])
            .timeout(GET_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Search the catalog.
    pub async fn search_recipes(&self, query: &SearchQuery) -> Result<Vec<Recipe>> {
        let response = self
            .http()
            .post(self.url("/recipes/Search"))
            .timeout(SEARCH_TIMEOUT)
            .json(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Personal recipes created by the current user.
    pub async fn my_recipes(&self) -> Result<Vec<Recipe>> {
        self.get_own_recipes("/users/myRecipes").await
    }

    /// Family recipes created by the current user.
    pub async fn my_family_recipes(&self) -> Result<Vec<Recipe>> {
        self.get_own_recipes("/users/myFamilyRecipes").await
    }

    async fn get_own_recipes(&self, path: &str) -> Result<Vec<Recipe>> {
        let response = self
            .http()
            .get(self.url(path))
            .timeout(GET_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Create a recipe; the backend files it as personal or family based on
    /// the `is_family_recipe` flag. Returns the new recipe's id.
    pub async fn create_recipe(&self, recipe: &NewRecipe) -> Result<RecipeId> {
        let response = self
            .http()
            .post(self.url("/users/myRecipes"))
            .timeout(WRITE_TIMEOUT)
            .json(&CreateRecipeRequest { recipe })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }

        let created: CreateRecipeResponse = response.json().await?;
        Ok(created.recipe_id)
    }
}

#[async_trait]
impl RecipeFeed for ApiClient {
    async fn random_recipes(&self, number: u32) -> Result<Vec<Recipe>> {
        ApiClient::random_recipes(self, number).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>> {
        self.search_recipes(query).await
    }
}
