//! Owned application state: a dispatch/reducer pair plus subscriber fan-out.
//!
//! DESIGN
//! ======
//! The store is passed around by `Arc`; there is no ambient global. `emit`
//! is synchronous and non-blocking: each signal first runs through the pure
//! reducer against the owned model, then fans out to every subscriber over a
//! bounded mpsc sender with `try_send`. A full subscriber queue drops the
//! signal with a warning; a closed subscriber is pruned.
//!
//! TRADE-OFFS
//! ==========
//! Drop-on-full favors emitter latency over delivery guarantees. The queue
//! depth makes drops unreachable in normal operation, and the model itself is
//! always current — only stream observers can fall behind.

use std::sync::{Mutex, PoisonError, RwLock};

use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::profile::Profile;
use crate::signal::Signal;

/// Bounded queue depth for each subscriber.
const SUBSCRIBER_QUEUE_CAPACITY: usize = 256;

// =============================================================================
// APP MODEL
// =============================================================================

/// The shell's shared state. Mutated only by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub struct AppModel {
    /// Marker minted once per bootstrap activation; superseded on re-bootstrap.
    pub session_marker: Option<Uuid>,
    /// Current profile, present once fetched and until logout.
    pub profile: Option<Profile>,
    /// Set by the generic init signal.
    pub app_ready: bool,
    /// Set by the feature-flag init signal.
    pub flags_ready: bool,
    /// Active locale.
    pub locale: String,
}

impl Default for AppModel {
    fn default() -> Self {
        Self {
            session_marker: None,
            profile: None,
            app_ready: false,
            flags_ready: false,
            locale: "en".into(),
        }
    }
}

/// Pure state transition. Signals without a model effect fall through.
fn reduce(model: &mut AppModel, signal: &Signal) {
    match signal {
        Signal::SessionStarted { marker } => model.session_marker = Some(*marker),
        Signal::AppInit => model.app_ready = true,
        Signal::FlagsInit => model.flags_ready = true,
        Signal::ProfileFetched { profile } => model.profile = Some(profile.clone()),
        Signal::ProfileDeleted | Signal::LoggedOut => model.profile = None,
        Signal::LocaleChanged { locale } => model.locale = locale.clone(),
        Signal::ProfileInit { .. } | Signal::ChannelMessage { .. } | Signal::Error { .. } => {}
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Owned model plus the subscriber registry.
pub struct Store {
    model: RwLock<AppModel>,
    subscribers: Mutex<Vec<mpsc::Sender<Signal>>>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self { model: RwLock::new(AppModel::default()), subscribers: Mutex::new(Vec::new()) }
    }

    /// Register a new subscriber observing all subsequent emissions.
    pub fn subscribe(&self) -> mpsc::Receiver<Signal> {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_QUEUE_CAPACITY);
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Apply and broadcast signals, in order. Synchronous and non-blocking.
    pub fn emit<I>(&self, signals: I)
    where
        I: IntoIterator<Item = Signal>,
    {
        for signal in signals {
            {
                let mut model = self.model.write().unwrap_or_else(PoisonError::into_inner);
                reduce(&mut model, &signal);
            }
            debug!(signal = signal.name(), "store: emit");

            let mut subs = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
            subs.retain(|tx| match tx.try_send(signal.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(signal = signal.name(), "store: subscriber queue full; dropping signal");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            });
        }
    }

    /// Snapshot of the current model.
    #[must_use]
    pub fn model(&self) -> AppModel {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of live subscribers (closed ones are pruned lazily on emit).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
