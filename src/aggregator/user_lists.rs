//! User-list aggregation implementation

use crate::error::Result;
use crate::recipe::RecipeId;
use crate::session::{InteractionSets, ListKind};
use async_trait::async_trait;

/// Remote read endpoints for the three user lists.
#[async_trait]
pub trait ListSource {
    async fn watched_ids(&self) -> Result<Vec<RecipeId>>;
    async fn favorite_ids(&self) -> Result<Vec<RecipeId>>;
    async fn liked_ids(&self) -> Result<Vec<RecipeId>>;
}

/// Which lists an aggregate fetch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchScope {
    /// Watched, favorites, and liked.
    All,

    /// Favorites and liked only; viewing history is left untouched.
    PreferencesOnly,
}

/// One failed source in an aggregate fetch.
#[derive(Debug, Clone)]
pub struct SourceFailure {
    pub list: ListKind,
    pub reason: String,
}

/// Outcome of an aggregate fetch: which sources landed and which failed.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub succeeded: Vec<ListKind>,
    pub failures: Vec<SourceFailure>,
}

impl FetchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure_for(&self, list: ListKind) -> Option<&SourceFailure> {
        self.failures.iter().find(|f| f.list == list)
    }
}

/// Fetch the user lists covered by `scope` and reconcile `sets` with the
/// result.
///
/// All fetches are issued concurrently and all are awaited to settle; the
/// completion order among them is unspecified and nothing may depend on
/// it. Per source: a success replaces the matching set wholesale, a
/// failure empties it and is recorded in the report. An individual source
/// failure never aborts the batch and never surfaces as an error — the
/// function is infallible so the contract is visible in the signature.
pub async fn fetch_user_lists(
    source: &(impl ListSource + Sync),
    sets: &mut InteractionSets,
    scope: FetchScope,
) -> FetchReport {
    let mut report = FetchReport::default();

    // The join is a barrier, not a race: sets are only written after every
    // fetch has settled, so no consumer can observe a half-reconciled state.
    match scope {
        FetchScope::All => {
            let (watched, favorites, liked) = futures::join!(
                source.watched_ids(),
                source.favorite_ids(),
                source.liked_ids()
            );
            apply(sets, ListKind::Watched, watched, &mut report);
            apply(sets, ListKind::Favorites, favorites, &mut report);
            apply(sets, ListKind::Liked, liked, &mut report);
        }
        FetchScope::PreferencesOnly => {
            let (favorites, liked) = futures::join!(source.favorite_ids(), source.liked_ids());
            apply(sets, ListKind::Favorites, favorites, &mut report);
            apply(sets, ListKind::Liked, liked, &mut report);
        }
    }

    tracing::debug!(
        succeeded = report.succeeded.len(),
        failed = report.failures.len(),
        "user list fetch settled"
    );
    report
}

fn apply(
    sets: &mut InteractionSets,
    list: ListKind,
    result: Result<Vec<RecipeId>>,
    report: &mut FetchReport,
) {
    match result {
        Ok(ids) => {
            sets.replace_all(list, ids);
            report.succeeded.push(list);
        }
        Err(e) => {
            // Degrade rather than abort: the consumer renders without this
            // list's badges while the other two stay intact.
            tracing::warn!(list = %list, error = %e, "user list fetch failed");
            sets.clear(list);
            report.failures.push(SourceFailure {
                list,
                reason: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LadleError;

    /// Source fake with an independent outcome per list.
    struct FakeSource {
        watched: Result<Vec<RecipeId>>,
        favorites: Result<Vec<RecipeId>>,
        liked: Result<Vec<RecipeId>>,
    }

    impl FakeSource {
        fn all_ok() -> Self {
            Self {
                watched: Ok(vec![RecipeId::from(1i64)]),
                favorites: Ok(vec![RecipeId::from(2i64), RecipeId::from("S-9")]),
                liked: Ok(vec![RecipeId::from(3i64)]),
            }
        }
    }

    fn clone_result(r: &Result<Vec<RecipeId>>) -> Result<Vec<RecipeId>> {
        match r {
            Ok(ids) => Ok(ids.clone()),
            Err(e) => Err(LadleError::Network(e.to_string())),
        }
    }

    #[async_trait]
    impl ListSource for FakeSource {
        async fn watched_ids(&self) -> Result<Vec<RecipeId>> {
            clone_result(&self.watched)
        }

        async fn favorite_ids(&self) -> Result<Vec<RecipeId>> {
            clone_result(&self.favorites)
        }

        async fn liked_ids(&self) -> Result<Vec<RecipeId>> {
            clone_result(&self.liked)
        }
    }

    #[tokio::test]
    async fn test_all_sources_succeed() {
        let mut sets = InteractionSets::new();
        let report = fetch_user_lists(&FakeSource::all_ok(), &mut sets, FetchScope::All).await;

        assert!(report.is_complete());
        assert_eq!(report.succeeded.len(), 3);
        assert!(sets.contains(ListKind::Watched, "1"));
        assert!(sets.contains(ListKind::Favorites, "S-9"));
        assert!(sets.contains(ListKind::Liked, "3"));
    }

    #[tokio::test]
    async fn test_one_failing_source_degrades_not_aborts() {
        let mut source = FakeSource::all_ok();
        source.favorites = Err(LadleError::Network("favorites endpoint down".to_string()));

        let mut sets = InteractionSets::new();
        sets.add(ListKind::Favorites, "stale");

        let report = fetch_user_lists(&source, &mut sets, FetchScope::All).await;

        assert!(!report.is_complete());
        assert_eq!(report.failures.len(), 1);
        assert!(report
            .failure_for(ListKind::Favorites)
            .unwrap()
            .reason
            .contains("favorites endpoint down"));

        // The failing list is emptied, the other two are populated.
        assert!(sets.is_empty(ListKind::Favorites));
        assert!(sets.contains(ListKind::Watched, "1"));
        assert!(sets.contains(ListKind::Liked, "3"));
    }

    #[tokio::test]
    async fn test_all_sources_failing_still_settles() {
        let source = FakeSource {
            watched: Err(LadleError::Network("down".to_string())),
            favorites: Err(LadleError::Network("down".to_string())),
            liked: Err(LadleError::Network("down".to_string())),
        };
        let mut sets = InteractionSets::new();

        let report = fetch_user_lists(&source, &mut sets, FetchScope::All).await;

        assert_eq!(report.failures.len(), 3);
        assert!(report.succeeded.is_empty());
        for list in ListKind::ALL {
            assert!(sets.is_empty(list));
        }
    }

    #[tokio::test]
    async fn test_preferences_only_leaves_watched_untouched() {
        let mut sets = InteractionSets::new();
        sets.add(ListKind::Watched, "keep-me");

        let report =
            fetch_user_lists(&FakeSource::all_ok(), &mut sets, FetchScope::PreferencesOnly).await;

        assert_eq!(report.succeeded.len(), 2);
        assert!(sets.contains(ListKind::Watched, "keep-me"));
        assert!(sets.contains(ListKind::Favorites, "2"));
    }

    #[tokio::test]
    async fn test_ids_are_canonicalized_on_install() {
        let source = FakeSource {
            watched: Ok(vec![RecipeId::from(" 7 ")]),
            favorites: Ok(vec![]),
            liked: Ok(vec![]),
        };
        let mut sets = InteractionSets::new();
        fetch_user_lists(&source, &mut sets, FetchScope::All).await;
        assert!(sets.contains(ListKind::Watched, 7u64));
    }
}
