//! User list endpoints
//!
//! `/users/favorites`, `/users/likes`, and `/users/watched` share one
//! shape: GET returns an array of recipe ids (numeric or prefixed string),
//! POST and DELETE take `{"recipeId": "<canonical id>"}` and ride on the
//! session cookie.

use super::client::{ApiClient, GET_TIMEOUT, WRITE_TIMEOUT};
use crate::aggregator::ListSource;
use crate::recipe::RecipeId;
use crate::session::{ListKind, ListStore};
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;

fn list_path(list: ListKind) -> &'static str {
    match list {
        ListKind::Favorites => "/users/favorites",
        ListKind::Liked => "/users/likes",
        ListKind::Watched => "/users/watched",
    }
}

/// Mutation body; the id is always sent in canonical string form so
/// prefixed ids survive.
#[derive(Debug, Serialize)]
struct ListMutation<'a> {
    #[serde(rename = "recipeId")]
    recipe_id: &'a str,
}

impl ApiClient {
    /// Fetch the ids in one user list.
    pub async fn user_list_ids(&self, list: ListKind) -> Result<Vec<RecipeId>> {
        let response = self
            .http()
            .get(self.url(list_path(list)))
            .timeout(GET_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }

        let ids: Vec<RecipeId> = response.json().await?;
        tracing::debug!(list = %list, count = ids.len(), "fetched user list");
        Ok(ids)
    }

    /// Add a recipe to one user list.
    pub async fn add_list_entry(&self, list: ListKind, id: &RecipeId) -> Result<()> {
        let response = self
            .http()
            .post(self.url(list_path(list)))
            .timeout(WRITE_TIMEOUT)
            .json(&ListMutation {
                recipe_id: id.as_str(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        Ok(())
    }

    /// Remove a recipe from one user list.
    pub async fn remove_list_entry(&self, list: ListKind, id: &RecipeId) -> Result<()> {
        let response = self
            .http()
            .delete(self.url(list_path(list)))
            .timeout(WRITE_TIMEOUT)
            .json(&ListMutation {
                recipe_id: id.as_str(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        Ok(())
    }

    /// Most recently watched recipe ids.
    ///
    /// There is no dedicated "recent" endpoint; the backend returns the
    /// watched list most-recent-first, so this takes the first `count` ids.
    pub async fn recent_watched_ids(&self, count: usize) -> Result<Vec<RecipeId>> {
        let mut ids = self.user_list_ids(ListKind::Watched).await?;
        ids.truncate(count);
        Ok(ids)
    }
}

#[async_trait]
impl ListSource for ApiClient {
    async fn watched_ids(&self) -> Result<Vec<RecipeId>> {
        self.user_list_ids(ListKind::Watched).await
    }

    async fn favorite_ids(&self) -> Result<Vec<RecipeId>> {
        self.user_list_ids(ListKind::Favorites).await
    }

    async fn liked_ids(&self) -> Result<Vec<RecipeId>> {
        self.user_list_ids(ListKind::Liked).await
    }
}

#[async_trait]
impl ListStore for ApiClient {
    async fn add_to_list(&self, list: ListKind, id: &RecipeId) -> Result<()> {
        self.add_list_entry(list, id).await
    }

    async fn remove_from_list(&self, list: ListKind, id: &RecipeId) -> Result<()> {
        self.remove_list_entry(list, id).await
    }
}
