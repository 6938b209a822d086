//! Session-scoped caches
//!
//! Provides the in-memory cache slots that sit between page requests and
//! the REST layer: a TTL-bounded slot for the landing page and an
//! unbounded, explicitly-invalidated slot for search results.

mod slot;

pub use slot::{CacheSlot, SearchCache};

use std::time::Duration;

/// Landing-page content is reusable for a few minutes; it embeds per-recipe
/// interaction flags, so any state-changing action must invalidate it
/// explicitly before the window closes.
pub const LANDING_TTL: Duration = Duration::from_secs(300);
