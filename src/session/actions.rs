//! Optimistic session actions
//!
//! State-changing interactions apply the local mutation first, fire the
//! remote call, and undo the local mutation if the remote call fails. The
//! rollback is an explicit compensating action; the alternative (waiting
//! for the server before updating) would make every toggle feel like a
//! network round-trip.

use crate::error::{LadleError, Result};
use crate::recipe::{Recipe, RecipeId, SearchQuery};
use crate::session::interactions::ListKind;
use crate::session::lifecycle::Session;
use async_trait::async_trait;

/// Remote mutation endpoint for one user list.
#[async_trait]
pub trait ListStore {
    async fn add_to_list(&self, list: ListKind, id: &RecipeId) -> Result<()>;
    async fn remove_from_list(&self, list: ListKind, id: &RecipeId) -> Result<()>;
}

/// Read side of the recipe catalog, used to fill the landing and search
/// caches.
#[async_trait]
pub trait RecipeFeed {
    async fn random_recipes(&self, number: u32) -> Result<Vec<Recipe>>;
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>>;
}

/// Toggle membership of `id` in `list`, optimistically.
///
/// The local set flips immediately and the landing cache is invalidated
/// (it embeds per-recipe interaction flags). If the remote call fails, the
/// toggle is reversed and the error propagates to the caller, leaving
/// membership as it was before the call.
pub async fn toggle_list_entry(
    session: &mut Session,
    store: &(impl ListStore + Sync),
    list: ListKind,
    id: impl Into<RecipeId>,
) -> Result<bool> {
    let id = id.into();
    if id.is_empty() {
        return Err(LadleError::Validation("recipe id is required".to_string()));
    }

    let now_member = session.interactions.toggle(list, &id);
    session.note_interaction();

    let remote = if now_member {
        store.add_to_list(list, &id).await
    } else {
        store.remove_from_list(list, &id).await
    };

    if let Err(e) = remote {
        tracing::warn!(list = %list, id = %id, error = %e, "remote toggle failed, rolling back");
        session.interactions.toggle(list, &id);
        return Err(e);
    }
    Ok(now_member)
}

/// Record that the user viewed `recipe`: watched set, recently-viewed ring,
/// and the backend's watched list.
///
/// The watched-set insert is rolled back on remote failure only if the
/// recipe was not already a member. The ring keeps the entry either way;
/// the local view happened whether or not the server recorded it.
pub async fn mark_watched(
    session: &mut Session,
    store: &(impl ListStore + Sync),
    recipe: Recipe,
) -> Result<()> {
    let id = recipe.id.clone();
    if id.is_empty() {
        return Err(LadleError::Validation("recipe id is required".to_string()));
    }

    let was_member = session.interactions.contains(ListKind::Watched, &id);
    session.interactions.add(ListKind::Watched, &id);
    session.identity.push_viewed(recipe);
    session.note_interaction();

    if let Err(e) = store.add_to_list(ListKind::Watched, &id).await {
        if !was_member {
            session.interactions.remove(ListKind::Watched, &id);
        }
        return Err(e);
    }
    Ok(())
}

/// Landing-page recipes: served from the cache slot while it is valid,
/// otherwise fetched fresh and written back.
pub async fn landing_recipes(
    session: &mut Session,
    feed: &(impl RecipeFeed + Sync),
    number: u32,
) -> Result<Vec<Recipe>> {
    if let Some(cached) = session.landing_cache.read() {
        tracing::debug!(count = cached.len(), "serving landing page from cache");
        return Ok(cached.clone());
    }

    let recipes = feed.random_recipes(number).await?;
    session.landing_cache.write(recipes.clone());
    Ok(recipes)
}

/// Run a search and overwrite the search cache with the results. The cache
/// lets back-navigation re-render the last result set without a refetch.
pub async fn run_search(
    session: &mut Session,
    feed: &(impl RecipeFeed + Sync),
    query: SearchQuery,
) -> Result<Vec<Recipe>> {
    let results = feed.search(&query).await?;
    session.search_cache.write(query, results.clone());
    Ok(results)
}
