//! REST wrappers for the recipe backend
//!
//! Thin adapters over the backend endpoints. Identity rides on a session
//! cookie, so one `ApiClient` (with its cookie store) backs the whole
//! session. The client implements the `IdentityProbe`, `ListSource`,
//! `ListStore`, and `RecipeFeed` seams the core consumes, keeping the core
//! free of transport types.

mod client;
mod recipes;
mod user_lists;

pub use client::{ApiClient, NewUser};
