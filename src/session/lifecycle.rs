//! Session state machine
//!
//! Orchestrates identity, interaction sets, and cache slots across
//! login/logout boundaries. Transitions:
//!
//! - `Anonymous -> Authenticating` when a login attempt is issued
//! - `Authenticating -> Authenticated` on login success
//! - `Authenticating -> Anonymous` on login failure
//! - `Authenticated -> Anonymous` on logout or a failed validity probe
//!
//! The startup probe transitions straight to `Authenticated` on success and
//! never propagates an error: anonymous usage is a valid state, not a
//! failure to surface.

use crate::aggregator::{fetch_user_lists, FetchReport, FetchScope, ListSource};
use crate::cache::{CacheSlot, SearchCache, LANDING_TTL};
use crate::recipe::Recipe;
use crate::session::identity::IdentityState;
use crate::session::interactions::InteractionSets;
use async_trait::async_trait;
use std::time::Duration;

/// Authentication phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Identity check against the backend (`GET /me`).
///
/// Implementations must treat every failure mode as "no session" rather
/// than an error.
#[async_trait]
pub trait IdentityProbe {
    /// The current principal, or `None` when no valid session exists.
    async fn current_principal(&self) -> Option<String>;
}

/// All mutable state for one logical session, with a single-writer model:
/// exactly one session is active at a time and only the operations here and
/// in the component modules mutate it. Constructed once and passed `&mut`
/// to whatever needs it.
#[derive(Debug)]
pub struct Session {
    pub identity: IdentityState,
    pub interactions: InteractionSets,
    pub landing_cache: CacheSlot<Vec<Recipe>>,
    pub search_cache: SearchCache,
    phase: AuthPhase,
}

impl Session {
    pub fn new() -> Self {
        Self::with_landing_ttl(LANDING_TTL)
    }

    pub fn with_landing_ttl(ttl: Duration) -> Self {
        Self {
            identity: IdentityState::new(),
            interactions: InteractionSets::new(),
            landing_cache: CacheSlot::with_ttl(ttl),
            search_cache: SearchCache::new(),
            phase: AuthPhase::Anonymous,
        }
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    /// A login attempt has been issued.
    pub fn begin_login(&mut self) {
        self.phase = AuthPhase::Authenticating;
    }

    /// Login succeeded. The landing cache may hold anonymous-view content
    /// and is invalidated; interaction sets stay empty until the next
    /// aggregate fetch populates them.
    pub fn on_login_success(&mut self, username: impl Into<String>) {
        let username = username.into();
        tracing::info!(user = %username, "login");
        self.identity.set_principal(username);
        self.landing_cache.invalidate();
        self.phase = AuthPhase::Authenticated;
    }

    /// Login failed; nothing besides the phase is touched.
    pub fn on_login_failure(&mut self) {
        self.identity.clear_principal();
        self.phase = AuthPhase::Anonymous;
    }

    /// Logout, or a validity probe that came back negative. Clears the
    /// principal, all three interaction sets, both cache slots, and the
    /// recently-viewed ring.
    pub fn on_logout(&mut self) {
        tracing::info!("logout");
        self.identity.clear_principal();
        self.identity.clear_recently_viewed();
        self.interactions.clear_all();
        self.landing_cache.invalidate();
        self.search_cache.invalidate();
        self.phase = AuthPhase::Anonymous;
    }

    /// Feed a probe result into the state machine.
    pub fn apply_probe(&mut self, principal: Option<String>) {
        match principal {
            Some(username) => {
                tracing::debug!(user = %username, "session probe: authenticated");
                self.identity.set_principal(username);
                self.phase = AuthPhase::Authenticated;
            }
            None => {
                tracing::debug!("session probe: no session");
                if self.phase == AuthPhase::Authenticated {
                    // An expired server session invalidates everything the
                    // session accumulated, same as an explicit logout.
                    self.on_logout();
                } else {
                    self.identity.clear_principal();
                    self.phase = AuthPhase::Anonymous;
                }
            }
        }
    }

    /// One identity check on process start. Success transitions directly to
    /// `Authenticated`; failure leaves the session anonymous.
    pub async fn startup_probe(&mut self, probe: &(impl IdentityProbe + Sync)) {
        let principal = probe.current_principal().await;
        self.apply_probe(principal);
    }

    /// A state-changing interaction happened (toggle favorite/like, mark
    /// watched). The landing cache embeds per-recipe interaction flags, so
    /// it cannot outlive the mutation.
    pub fn note_interaction(&mut self) {
        self.landing_cache.invalidate();
    }

    /// Populate the interaction sets from the backend. Anonymous sessions
    /// get empty sets without any network traffic.
    pub async fn refresh_user_lists(
        &mut self,
        source: &(impl ListSource + Sync),
        scope: FetchScope,
    ) -> FetchReport {
        if !self.is_authenticated() {
            self.interactions.clear_all();
            return FetchReport::default();
        }
        fetch_user_lists(source, &mut self.interactions, scope).await
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
