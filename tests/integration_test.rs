//! Integration tests for Ladle
//!
//! These tests drive a full session against in-process fakes: startup
//! probe, aggregate fetch, optimistic mutations, and logout.

use async_trait::async_trait;
use ladle::aggregator::{FetchScope, ListSource};
use ladle::recipe::{Recipe, RecipeId, SearchQuery};
use ladle::session::{
    landing_recipes, mark_watched, run_search, toggle_list_entry, IdentityProbe, ListKind,
    ListStore, RecipeFeed, Session,
};
use ladle::{LadleError, Result};
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

/// Helper to create a test recipe
fn test_recipe(id: &str, title: &str) -> Recipe {
    Recipe {
        id: RecipeId::from(id),
        title: title.to_string(),
        image: None,
        ready_in_minutes: Some(25),
        popularity: Some(10),
        vegan: false,
        vegetarian: true,
        gluten_free: false,
    }
}

/// In-process stand-in for the backend: a principal, three id lists, and
/// per-list health switches.
struct FakeBackend {
    principal: Option<String>,
    watched: Vec<RecipeId>,
    favorites: Vec<RecipeId>,
    liked: Vec<RecipeId>,
    broken: HashSet<&'static str>,
    mutations: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn logged_in(username: &str) -> Self {
        Self {
            principal: Some(username.to_string()),
            watched: vec![RecipeId::from(1i64), RecipeId::from(2i64)],
            favorites: vec![RecipeId::from(2i64), RecipeId::from("S-7")],
            liked: vec![RecipeId::from(3i64)],
            broken: HashSet::new(),
            mutations: Mutex::new(Vec::new()),
        }
    }

    fn anonymous() -> Self {
        Self {
            principal: None,
            watched: Vec::new(),
            favorites: Vec::new(),
            liked: Vec::new(),
            broken: HashSet::new(),
            mutations: Mutex::new(Vec::new()),
        }
    }

    fn break_list(mut self, name: &'static str) -> Self {
        self.broken.insert(name);
        self
    }

    fn list(&self, name: &'static str, ids: &[RecipeId]) -> Result<Vec<RecipeId>> {
        if self.broken.contains(name) {
            Err(LadleError::Network(format!("{} endpoint down", name)))
        } else {
            Ok(ids.to_vec())
        }
    }
}

#[async_trait]
impl IdentityProbe for FakeBackend {
    async fn current_principal(&self) -> Option<String> {
        self.principal.clone()
    }
}

#[async_trait]
impl ListSource for FakeBackend {
    async fn watched_ids(&self) -> Result<Vec<RecipeId>> {
        self.list("watched", &self.watched)
    }

    async fn favorite_ids(&self) -> Result<Vec<RecipeId>> {
        self.list("favorites", &self.favorites)
    }

    async fn liked_ids(&self) -> Result<Vec<RecipeId>> {
        self.list("liked", &self.liked)
    }
}

#[async_trait]
impl ListStore for FakeBackend {
    async fn add_to_list(&self, list: ListKind, id: &RecipeId) -> Result<()> {
        if self.broken.contains("mutations") {
            return Err(LadleError::Network("backend unreachable".to_string()));
        }
        self.mutations
            .lock()
            .unwrap()
            .push(format!("add {} {}", list, id));
        Ok(())
    }

    async fn remove_from_list(&self, list: ListKind, id: &RecipeId) -> Result<()> {
        if self.broken.contains("mutations") {
            return Err(LadleError::Network("backend unreachable".to_string()));
        }
        self.mutations
            .lock()
            .unwrap()
            .push(format!("remove {} {}", list, id));
        Ok(())
    }
}

struct FakeCatalog {
    recipes: Vec<Recipe>,
}

#[async_trait]
impl RecipeFeed for FakeCatalog {
    async fn random_recipes(&self, number: u32) -> Result<Vec<Recipe>> {
        Ok(self.recipes.iter().take(number as usize).cloned().collect())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>> {
        Ok(self
            .recipes
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&query.query.to_lowercase()))
            .cloned()
            .collect())
    }
}

mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn test_startup_probe_then_populate() {
        let backend = FakeBackend::logged_in("alice");
        let mut session = Session::new();

        session.startup_probe(&backend).await;
        assert!(session.is_authenticated());

        let report = session.refresh_user_lists(&backend, FetchScope::All).await;
        assert!(report.is_complete());

        assert!(session.interactions.contains(ListKind::Watched, 1u64));
        assert!(session.interactions.contains(ListKind::Favorites, "S-7"));
        assert!(session.interactions.contains(ListKind::Liked, "3"));
    }

    #[tokio::test]
    async fn test_anonymous_refresh_is_local_and_empty() {
        let backend = FakeBackend::anonymous();
        let mut session = Session::new();

        session.startup_probe(&backend).await;
        assert!(!session.is_authenticated());

        let report = session.refresh_user_lists(&backend, FetchScope::All).await;
        assert!(report.is_complete());
        for list in ListKind::ALL {
            assert!(session.interactions.is_empty(list));
        }
    }

    #[tokio::test]
    async fn test_logout_clears_all_session_state() {
        let backend = FakeBackend::logged_in("alice");
        let catalog = FakeCatalog {
            recipes: vec![test_recipe("1", "Penne"), test_recipe("2", "Minestrone")],
        };
        let mut session = Session::new();

        session.startup_probe(&backend).await;
        session.refresh_user_lists(&backend, FetchScope::All).await;
        landing_recipes(&mut session, &catalog, 2).await.unwrap();
        run_search(&mut session, &catalog, SearchQuery::new("penne"))
            .await
            .unwrap();
        session.identity.push_viewed(test_recipe("1", "Penne"));

        session.on_logout();

        assert!(session.identity.principal().is_none());
        for list in ListKind::ALL {
            assert!(session.interactions.is_empty(list));
        }
        assert!(session.landing_cache.read().is_none());
        assert!(session.search_cache.results().is_none());
        assert!(session.identity.recently_viewed().is_empty());
    }
}

mod aggregator_tests {
    use super::*;

    #[tokio::test]
    async fn test_partial_failure_keeps_healthy_sources() {
        let backend = FakeBackend::logged_in("alice").break_list("liked");
        let mut session = Session::new();
        session.startup_probe(&backend).await;

        let report = session.refresh_user_lists(&backend, FetchScope::All).await;

        assert!(!report.is_complete());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.succeeded.len(), 2);
        assert!(session.interactions.is_empty(ListKind::Liked));
        assert!(!session.interactions.is_empty(ListKind::Watched));
        assert!(!session.interactions.is_empty(ListKind::Favorites));
    }

    #[tokio::test]
    async fn test_preferences_only_skips_viewing_history() {
        let backend = FakeBackend::logged_in("alice").break_list("watched");
        let mut session = Session::new();
        session.startup_probe(&backend).await;

        // The watched endpoint is broken, but a preferences-only fetch
        // never touches it.
        let report = session
            .refresh_user_lists(&backend, FetchScope::PreferencesOnly)
            .await;
        assert!(report.is_complete());
    }
}

mod optimistic_action_tests {
    use super::*;

    #[tokio::test]
    async fn test_toggle_confirms_against_backend() {
        let backend = FakeBackend::logged_in("alice");
        let mut session = Session::new();
        session.startup_probe(&backend).await;

        let now_member = toggle_list_entry(&mut session, &backend, ListKind::Favorites, 42u64)
            .await
            .unwrap();
        assert!(now_member);
        assert_eq!(
            backend.mutations.lock().unwrap().as_slice(),
            ["add favorites 42"]
        );
    }

    #[tokio::test]
    async fn test_failed_toggle_restores_membership() {
        let backend = FakeBackend::logged_in("alice").break_list("mutations");
        let mut session = Session::new();
        session.startup_probe(&backend).await;
        session.interactions.add(ListKind::Favorites, "42");

        let result = toggle_list_entry(&mut session, &backend, ListKind::Favorites, "42").await;

        assert!(result.is_err());
        assert!(session.interactions.contains(ListKind::Favorites, "42"));
    }

    #[tokio::test]
    async fn test_mark_watched_updates_ring_and_set() {
        let backend = FakeBackend::logged_in("alice");
        let mut session = Session::new();
        session.startup_probe(&backend).await;

        for (id, title) in [("A", "Arrabbiata"), ("B", "Bolognese"), ("A", "Arrabbiata"),
                            ("C", "Carbonara"), ("D", "Dal")] {
            mark_watched(&mut session, &backend, test_recipe(id, title))
                .await
                .unwrap();
        }

        let ids: Vec<&str> = session
            .identity
            .recently_viewed()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["D", "C", "A"]);
        assert!(session.interactions.contains(ListKind::Watched, "B"));
    }
}

mod cache_tests {
    use super::*;

    #[tokio::test]
    async fn test_landing_cache_window() {
        let catalog = FakeCatalog {
            recipes: vec![test_recipe("1", "Penne")],
        };
        // Scaled-down landing window.
        let mut session = Session::with_landing_ttl(Duration::from_millis(80));

        landing_recipes(&mut session, &catalog, 1).await.unwrap();
        assert!(session.landing_cache.is_valid());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(session.landing_cache.read().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(session.landing_cache.read().is_none());
    }

    #[tokio::test]
    async fn test_toggle_busts_landing_cache_but_not_search() {
        let backend = FakeBackend::logged_in("alice");
        let catalog = FakeCatalog {
            recipes: vec![test_recipe("1", "Penne")],
        };
        let mut session = Session::new();
        session.startup_probe(&backend).await;

        landing_recipes(&mut session, &catalog, 1).await.unwrap();
        run_search(&mut session, &catalog, SearchQuery::new("penne"))
            .await
            .unwrap();

        toggle_list_entry(&mut session, &backend, ListKind::Liked, "1")
            .await
            .unwrap();

        assert!(session.landing_cache.read().is_none());
        assert!(session.search_cache.results().is_some());
    }

    #[tokio::test]
    async fn test_badges_after_full_flow() {
        let backend = FakeBackend::logged_in("alice");
        let mut session = Session::new();
        session.startup_probe(&backend).await;
        session.refresh_user_lists(&backend, FetchScope::All).await;

        let badges = session.interactions.badges_for(vec!["2", "3", "99"]);
        // Recipe 2 is both watched and favorited upstream.
        assert!(badges[0].watched && badges[0].favorited && !badges[0].liked);
        assert!(badges[1].liked);
        assert!(!badges[2].favorited && !badges[2].liked && !badges[2].watched);
    }
}
