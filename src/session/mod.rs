//! Session state and lifecycle
//!
//! All mutable per-session state lives here: the authenticated principal,
//! the recently-viewed ring, the three interaction sets, and the two cache
//! slots, orchestrated by the `Session` state machine. The session is a
//! single owned value passed explicitly to whatever needs it; there is no
//! hidden global.

mod actions;
mod identity;
mod interactions;
mod lifecycle;

pub use actions::{
    landing_recipes, mark_watched, run_search, toggle_list_entry, ListStore, RecipeFeed,
};
pub use identity::IdentityState;
pub use interactions::{InteractionSets, ListKind, RecipeBadges};
pub use lifecycle::{AuthPhase, IdentityProbe, Session};
