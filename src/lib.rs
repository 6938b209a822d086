//! Ladle - Session-scoped client for the Ladle recipe service
//!
//! Ladle sits between a consumer (the bundled CLI, or any UI) and the
//! recipe backend's REST API. Most of the value is in the session core: it
//! decides when cached data may be served instead of a network call,
//! combines independent fetches that may partially fail, and keeps
//! locally-known user state consistent with optimistic updates.
//!
//! # Architecture
//!
//! - **recipe**: Core data structures (RecipeId, Recipe, SearchQuery)
//! - **cache**: In-memory cache slots (TTL landing slot, search slot)
//! - **session**: Identity, interaction sets, lifecycle state machine,
//!   optimistic actions
//! - **aggregator**: Concurrent settle-all fetch of the user lists
//! - **api**: REST wrappers over the backend endpoints
//! - **config**: YAML configuration under ~/.config/ladle

// Core modules
pub mod cache;
pub mod config;
pub mod error;
pub mod recipe;
pub mod session;

// Components
pub mod aggregator;
pub mod api;
pub mod logging;

// Re-exports
pub use error::{LadleError, Result};
