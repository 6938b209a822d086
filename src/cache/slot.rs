//! Generic expiring cache slot

use crate::recipe::{Recipe, SearchQuery};
use std::time::{Duration, Instant};

/// A single in-memory cache slot holding one value of type `T`.
///
/// Expiration is lazy: it is observed at read time, never enforced by a
/// background timer. Reads are driven by navigation, so the staleness check
/// costs one clock read per access.
#[derive(Debug)]
pub struct CacheSlot<T> {
    value: Option<T>,
    created_at: Option<Instant>,
    /// `None` means the slot never expires and only explicit invalidation
    /// empties it.
    ttl: Option<Duration>,
}

impl<T> CacheSlot<T> {
    /// Create an empty slot whose entries expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            value: None,
            created_at: None,
            ttl: Some(ttl),
        }
    }

    /// Create an empty slot that never expires.
    pub fn unbounded() -> Self {
        Self {
            value: None,
            created_at: None,
            ttl: None,
        }
    }

    /// Return the stored value if the slot is valid.
    ///
    /// A non-empty but expired slot is invalidated before returning `None`.
    pub fn read(&mut self) -> Option<&T> {
        if self.value.is_some() && !self.is_valid() {
            tracing::debug!("cache slot expired, invalidating");
            self.invalidate();
        }
        self.value.as_ref()
    }

    /// Store `value` and stamp the creation time. Overwrites unconditionally.
    pub fn write(&mut self, value: T) {
        self.value = Some(value);
        self.created_at = Some(Instant::now());
    }

    /// Force the slot to empty regardless of age.
    pub fn invalidate(&mut self) {
        self.value = None;
        self.created_at = None;
    }

    /// Freshness check with the same rule as `read`, without the side
    /// effect of clearing an expired entry.
    pub fn is_valid(&self) -> bool {
        match (&self.value, self.created_at) {
            (Some(_), Some(created_at)) => match self.ttl {
                Some(ttl) => created_at.elapsed() <= ttl,
                None => true,
            },
            _ => false,
        }
    }

    /// Age of the current entry, if any.
    pub fn age(&self) -> Option<Duration> {
        self.created_at.map(|t| t.elapsed())
    }
}

/// Cache slot for search results, remembering the query that produced them.
///
/// Search results never expire on their own; a new search always overwrites
/// and logout invalidates. The recorded query is informational (e.g. to
/// re-render the search form after back-navigation), not a lookup key.
#[derive(Debug)]
pub struct SearchCache {
    slot: CacheSlot<Vec<Recipe>>,
    query: Option<SearchQuery>,
}

impl SearchCache {
    pub fn new() -> Self {
        Self {
            slot: CacheSlot::unbounded(),
            query: None,
        }
    }

    /// Store the results of a search along with the query that produced them.
    pub fn write(&mut self, query: SearchQuery, results: Vec<Recipe>) {
        tracing::debug!(query = %query.query, results = results.len(), "caching search results");
        self.slot.write(results);
        self.query = Some(query);
    }

    /// The most recent search results, if any.
    pub fn results(&mut self) -> Option<&[Recipe]> {
        self.slot.read().map(|r| r.as_slice())
    }

    /// The query that produced the cached results.
    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.slot.is_valid()
    }

    pub fn invalidate(&mut self) {
        self.slot.invalidate();
        self.query = None;
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeId;
    use std::thread::sleep;

    fn recipe(id: &str, title: &str) -> Recipe {
        Recipe {
            id: RecipeId::from(id),
            title: title.to_string(),
            image: None,
            ready_in_minutes: None,
            popularity: None,
            vegan: false,
            vegetarian: false,
            gluten_free: false,
        }
    }

    #[test]
    fn test_read_within_ttl() {
        let mut slot = CacheSlot::with_ttl(Duration::from_secs(300));
        assert!(slot.read().is_none());

        slot.write("landing page".to_string());
        assert!(slot.is_valid());
        assert_eq!(slot.read(), Some(&"landing page".to_string()));
    }

    #[test]
    fn test_read_past_ttl_invalidates() {
        // Scaled-down version of the 5-minute landing window: write, read
        // inside the window, read again after it closes.
        let mut slot = CacheSlot::with_ttl(Duration::from_millis(80));
        slot.write(1u32);

        sleep(Duration::from_millis(20));
        assert_eq!(slot.read(), Some(&1));

        sleep(Duration::from_millis(100));
        assert!(slot.read().is_none());
        assert!(!slot.is_valid());
        assert!(slot.age().is_none());
    }

    #[test]
    fn test_is_valid_has_no_side_effect() {
        let mut slot = CacheSlot::with_ttl(Duration::from_millis(10));
        slot.write(1u32);
        sleep(Duration::from_millis(30));

        assert!(!slot.is_valid());
        // The expired value is still present until a read observes it.
        assert!(slot.value.is_some());
        assert!(slot.read().is_none());
        assert!(slot.value.is_none());
    }

    #[test]
    fn test_invalidate_beats_freshness() {
        let mut slot = CacheSlot::with_ttl(Duration::from_secs(300));
        slot.write(1u32);
        slot.invalidate();
        assert!(slot.read().is_none());
    }

    #[test]
    fn test_write_overwrites() {
        let mut slot = CacheSlot::with_ttl(Duration::from_secs(300));
        slot.write(1u32);
        slot.write(2u32);
        assert_eq!(slot.read(), Some(&2));
    }

    #[test]
    fn test_unbounded_slot_never_expires() {
        let mut slot = CacheSlot::unbounded();
        slot.write(1u32);
        sleep(Duration::from_millis(30));
        assert!(slot.is_valid());
        assert_eq!(slot.read(), Some(&1));
    }

    #[test]
    fn test_search_cache_overwrites() {
        let mut cache = SearchCache::new();
        assert!(cache.results().is_none());

        cache.write(SearchQuery::new("pasta"), vec![recipe("1", "Penne")]);
        cache.write(SearchQuery::new("soup"), vec![recipe("2", "Minestrone")]);

        assert_eq!(cache.query().unwrap().query, "soup");
        let results = cache.results().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Minestrone");
    }

    #[test]
    fn test_search_cache_invalidate_clears_query() {
        let mut cache = SearchCache::new();
        cache.write(SearchQuery::new("pasta"), vec![]);
        cache.invalidate();
        assert!(cache.results().is_none());
        assert!(cache.query().is_none());
    }
}
