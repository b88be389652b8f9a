//! Bootstrap orchestrator.
//!
//! ARCHITECTURE
//! ============
//! Activation sequences the side-effecting init steps without blocking the
//! initial mount: the synchronous phase (session marker, app init, flag init)
//! runs inline, then four independently-scheduled subscription branches react
//! to the store's signal stream:
//! - team bootstrap:      first profile fetch, authenticated → profile init
//! - logout propagation:  every profile deletion → logged out
//! - route activation:    first profile fetch → route table init
//! - realtime activation: first authenticated fetch → channel open
//! The branches plus the profile fetch come back as one merged
//! `SubscriptionSet` scoped to this activation.
//!
//! ERROR HANDLING
//! ==============
//! Branches are fail-silent: a collaborator failure is logged and surfaced as
//! an error-shaped signal for unrelated subscribers. No branch failure stops
//! the other branches, and the orchestrator never retries.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::profile::ProfileService;
use crate::realtime::RealtimeService;
use crate::router::RouteInit;
use crate::signal::{self, Signal};
use crate::store::Store;
use crate::subscription::{Latch, SubscriptionSet};

// =============================================================================
// ORCHESTRATOR
// =============================================================================

pub struct Orchestrator {
    store: Arc<Store>,
    profiles: Arc<dyn ProfileService>,
    router: Arc<dyn RouteInit>,
    realtime: Arc<dyn RealtimeService>,
}

impl Orchestrator {
    #[must_use]
    pub fn new(
        store: Arc<Store>,
        profiles: Arc<dyn ProfileService>,
        router: Arc<dyn RouteInit>,
        realtime: Arc<dyn RealtimeService>,
    ) -> Self {
        Self { store, profiles, router, realtime }
    }

    /// Run one bootstrap activation. Returns the merged effect set; dropping
    /// it cancels every branch.
    pub fn activate(&self) -> SubscriptionSet {
        let marker = Uuid::new_v4();

        // Receivers exist before any emission so no branch can miss an event.
        let rx_team = self.store.subscribe();
        let rx_logout = self.store.subscribe();
        let rx_routes = self.store.subscribe();
        let rx_realtime = self.store.subscribe();

        // Synchronous phase: marker assignment and the two init signals are
        // observable before any branch gets a scheduling tick.
        self.store.emit([
            Signal::SessionStarted { marker },
            Signal::AppInit,
            Signal::FlagsInit,
        ]);
        info!(%marker, "bootstrap: activated");

        let mut effects = SubscriptionSet::new();

        // BRANCH: team bootstrap. One shot on the first fetch; an anonymous
        // first fetch consumes the shot and emits nothing.
        {
            let store = self.store.clone();
            let mut rx = rx_team;
            effects.spawn(async move {
                let latch = Latch::new();
                while let Some(sig) = rx.recv().await {
                    let Signal::ProfileFetched { profile } = sig else { continue };
                    if latch.acquire() && profile.is_authenticated() {
                        store.emit([Signal::ProfileInit { profile }]);
                    }
                    break;
                }
            });
        }

        // BRANCH: logout propagation. Unbounded repeats.
        {
            let store = self.store.clone();
            let mut rx = rx_logout;
            effects.spawn(async move {
                while let Some(sig) = rx.recv().await {
                    if matches!(sig, Signal::ProfileDeleted) {
                        store.emit([Signal::LoggedOut]);
                    }
                }
            });
        }

        // BRANCH: route activation. One shot on the first fetch, regardless
        // of authentication outcome.
        {
            let store = self.store.clone();
            let router = self.router.clone();
            let mut rx = rx_routes;
            effects.spawn(async move {
                let latch = Latch::new();
                while let Some(sig) = rx.recv().await {
                    if !matches!(sig, Signal::ProfileFetched { .. }) {
                        continue;
                    }
                    if latch.acquire() {
                        if let Err(e) = router.init_routes() {
                            warn!(error = %e, "bootstrap: route init failed");
                            store.emit([Signal::error(signal::SCOPE_ROUTER_INIT, e.to_string())]);
                        }
                    }
                    break;
                }
            });
        }

        // BRANCH: realtime activation. One shot on the first AUTHENTICATED
        // fetch; an anonymous fetch leaves the shot unclaimed.
        {
            let store = self.store.clone();
            let realtime = self.realtime.clone();
            let mut rx = rx_realtime;
            effects.spawn(async move {
                let latch = Latch::new();
                while let Some(sig) = rx.recv().await {
                    let Signal::ProfileFetched { profile } = sig else { continue };
                    if !profile.is_authenticated() {
                        continue;
                    }
                    if latch.acquire() {
                        if let Err(e) = realtime.initialize().await {
                            warn!(error = %e, "bootstrap: realtime init failed");
                            store.emit([Signal::error(signal::SCOPE_REALTIME_INIT, e.to_string())]);
                        }
                    }
                    break;
                }
            });
        }

        // The fetch itself. Completion is observed as a signal, never awaited
        // serially; failure surfaces as an error-shaped signal, no retry.
        {
            let store = self.store.clone();
            let profiles = self.profiles.clone();
            effects.spawn(async move {
                match profiles.fetch().await {
                    Ok(profile) => store.emit([Signal::ProfileFetched { profile }]),
                    Err(e) => {
                        warn!(error = %e, "bootstrap: profile fetch failed");
                        store.emit([Signal::error(signal::SCOPE_PROFILE_FETCH, e.to_string())]);
                    }
                }
            });
        }

        effects
    }
}

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod tests;
