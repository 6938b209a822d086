//! Multi-source user-list aggregator
//!
//! Fetches the watched, favorites, and liked lists concurrently, tolerates
//! any subset failing, and installs the merged best-effort result into the
//! session's interaction sets.

mod user_lists;

pub use user_lists::{fetch_user_lists, FetchReport, FetchScope, ListSource, SourceFailure};
