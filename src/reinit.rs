//! Reinit — refresh the rendered UI without a full page reload.
//!
//! DESIGN
//! ======
//! Soft mode re-emits the generic init signal and re-renders into the
//! EXISTING root: same identity, idempotent. Hard mode first unmounts and
//! attaches a brand-new root to the same anchor, then proceeds as soft; used
//! when component identity must be fully discarded.
//!
//! Locale changes and hot-reload notifications both drive the soft form.
//! Hard mode is available to callers but deliberately has no automatic
//! trigger.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{mpsc, watch};
use tracing::info;

use crate::render::{self, DomAnchor, RenderRoot};
use crate::signal::Signal;
use crate::store::Store;
use crate::subscription::SubscriptionSet;

// =============================================================================
// MODES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReinitMode {
    /// Re-render into the existing root.
    Soft,
    /// Discard the root and attach a new one before rendering.
    Hard,
}

// =============================================================================
// RENDER HOST
// =============================================================================

/// Owns the anchor and the current render root.
pub struct RenderHost {
    store: Arc<Store>,
    anchor: DomAnchor,
    root: RenderRoot,
}

impl RenderHost {
    /// Attach a root to the anchor and perform the initial mount.
    #[must_use]
    pub fn new(store: Arc<Store>, anchor: DomAnchor) -> Self {
        let mut root = RenderRoot::attach(&anchor);
        root.mount(render::view(&store.model()));
        Self { store, anchor, root }
    }

    /// The no-argument (soft) form wired to the automatic triggers.
    pub fn reinit(&mut self) {
        self.reinit_with(ReinitMode::Soft);
    }

    pub fn reinit_with(&mut self, mode: ReinitMode) {
        if mode == ReinitMode::Hard {
            self.root.unmount();
            self.root = RenderRoot::attach(&self.anchor);
        }
        self.store.emit([Signal::AppInit]);
        self.root.mount(render::view(&self.store.model()));
        info!(?mode, root = %self.root.id(), "reinit complete");
    }

    #[must_use]
    pub fn root(&self) -> &RenderRoot {
        &self.root
    }
}

// =============================================================================
// WATCHERS
// =============================================================================

/// Spawn the automatic reinit triggers: locale changes and hot-reload
/// notifications. Both call the soft form.
pub fn spawn_reinit_watchers(
    store: Arc<Store>,
    host: Arc<Mutex<RenderHost>>,
    mut locale_rx: watch::Receiver<String>,
    mut reload_rx: mpsc::Receiver<()>,
) -> SubscriptionSet {
    let mut watchers = SubscriptionSet::new();

    {
        let host = host.clone();
        watchers.spawn(async move {
            while locale_rx.changed().await.is_ok() {
                let locale = locale_rx.borrow_and_update().clone();
                info!(%locale, "reinit: locale changed");
                store.emit([Signal::LocaleChanged { locale }]);
                host.lock().unwrap_or_else(PoisonError::into_inner).reinit();
            }
        });
    }

    watchers.spawn(async move {
        while reload_rx.recv().await.is_some() {
            info!("reinit: hot reload notification");
            host.lock().unwrap_or_else(PoisonError::into_inner).reinit();
        }
    });

    watchers
}

#[cfg(test)]
#[path = "reinit_test.rs"]
mod tests;
