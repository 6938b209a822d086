//! Authenticated principal and recently-viewed ring

use crate::recipe::Recipe;

/// How many recently viewed recipes are kept.
const RECENT_CAP: usize = 3;

/// Current authenticated principal (if any) and the small ring of recently
/// viewed recipes shown on the landing page.
#[derive(Debug, Default)]
pub struct IdentityState {
    principal: Option<String>,
    recently_viewed: Vec<Recipe>,
}

impl IdentityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub(crate) fn set_principal(&mut self, username: impl Into<String>) {
        self.principal = Some(username.into());
    }

    pub(crate) fn clear_principal(&mut self) {
        self.principal = None;
    }

    /// Record a recipe view, most-recent-first.
    ///
    /// A recipe already in the ring is moved to the front rather than
    /// duplicated; the ring is capped at three entries.
    pub fn push_viewed(&mut self, recipe: Recipe) {
        self.recently_viewed.retain(|r| r.id != recipe.id);
        self.recently_viewed.insert(0, recipe);
        self.recently_viewed.truncate(RECENT_CAP);
    }

    /// Recently viewed recipes, most recent first.
    pub fn recently_viewed(&self) -> &[Recipe] {
        &self.recently_viewed
    }

    pub(crate) fn clear_recently_viewed(&mut self) {
        self.recently_viewed.clear();
    }
}
