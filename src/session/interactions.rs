//! Per-user interaction sets
//!
//! Three disjoint-purpose sets of canonical recipe ids: favorites, liked,
//! and watched. All inputs pass through `RecipeId` canonicalization, so a
//! numeric `7` and the string `"7"` are the same member.

use crate::recipe::RecipeId;
use std::collections::HashSet;
use std::fmt;

/// The three user lists tracked per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Favorites,
    Liked,
    Watched,
}

impl ListKind {
    pub const ALL: [ListKind; 3] = [ListKind::Favorites, ListKind::Liked, ListKind::Watched];
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListKind::Favorites => "favorites",
            ListKind::Liked => "liked",
            ListKind::Watched => "watched",
        };
        f.write_str(name)
    }
}

/// Interaction flags for one recipe, as rendered on recipe cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeBadges {
    pub id: RecipeId,
    pub favorited: bool,
    pub liked: bool,
    pub watched: bool,
}

/// The session's mutable interaction state.
///
/// Owned exclusively by the session: reset on logout, never shared across
/// sessions. Consumers read through the membership queries and mutate only
/// through the operations below.
#[derive(Debug, Default)]
pub struct InteractionSets {
    favorites: HashSet<String>,
    liked: HashSet<String>,
    watched: HashSet<String>,
}

impl InteractionSets {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, list: ListKind) -> &HashSet<String> {
        match list {
            ListKind::Favorites => &self.favorites,
            ListKind::Liked => &self.liked,
            ListKind::Watched => &self.watched,
        }
    }

    fn set_mut(&mut self, list: ListKind) -> &mut HashSet<String> {
        match list {
            ListKind::Favorites => &mut self.favorites,
            ListKind::Liked => &mut self.liked,
            ListKind::Watched => &mut self.watched,
        }
    }

    /// Install `ids` as the new content of `list`, discarding the previous
    /// content. This is the reconciliation point after a fetch from the
    /// backend.
    pub fn replace_all<I>(&mut self, list: ListKind, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<RecipeId>,
    {
        let canonical: HashSet<String> = ids
            .into_iter()
            .map(|id| id.into().as_str().to_string())
            .collect();
        tracing::debug!(list = %list, count = canonical.len(), "replacing interaction set");
        *self.set_mut(list) = canonical;
    }

    pub fn contains(&self, list: ListKind, id: impl Into<RecipeId>) -> bool {
        self.set(list).contains(id.into().as_str())
    }

    /// Insert `id`; a no-op if already present.
    pub fn add(&mut self, list: ListKind, id: impl Into<RecipeId>) {
        self.set_mut(list).insert(id.into().as_str().to_string());
    }

    /// Delete `id`; a no-op if absent.
    pub fn remove(&mut self, list: ListKind, id: impl Into<RecipeId>) {
        self.set_mut(list).remove(id.into().as_str());
    }

    /// Flip membership of `id` and return the resulting state: `true` means
    /// "now present". Synchronous, so it appears atomic to the single
    /// logical caller.
    pub fn toggle(&mut self, list: ListKind, id: impl Into<RecipeId>) -> bool {
        let canonical = id.into().as_str().to_string();
        let set = self.set_mut(list);
        if set.remove(&canonical) {
            false
        } else {
            set.insert(canonical);
            true
        }
    }

    pub fn len(&self, list: ListKind) -> usize {
        self.set(list).len()
    }

    pub fn is_empty(&self, list: ListKind) -> bool {
        self.set(list).is_empty()
    }

    /// Empty one set.
    pub fn clear(&mut self, list: ListKind) {
        self.set_mut(list).clear();
    }

    /// Empty all three sets (logout).
    pub fn clear_all(&mut self) {
        for list in ListKind::ALL {
            self.clear(list);
        }
    }

    /// Interaction flags for a list of recipes in one pass, for badge
    /// rendering.
    pub fn badges_for<I>(&self, ids: I) -> Vec<RecipeBadges>
    where
        I: IntoIterator,
        I::Item: Into<RecipeId>,
    {
        ids.into_iter()
            .map(|id| {
                let id = id.into();
                RecipeBadges {
                    favorited: self.favorites.contains(id.as_str()),
                    liked: self.liked.contains(id.as_str()),
                    watched: self.watched.contains(id.as_str()),
                    id,
                }
            })
            .collect()
    }
}
