//! Realtime channel — websocket connection supervisor.
//!
//! DESIGN
//! ======
//! `initialize` is called at most once by the bootstrap orchestrator and is
//! internally latched besides. It spawns a supervisor task that connects to
//! the channel URL, forwards inbound text payloads to the store as
//! `ChannelMessage` signals, and reconnects after any disconnect with capped,
//! jittered exponential backoff.
//!
//! LIFECYCLE
//! =========
//! Teardown is the channel's own concern: dropping the channel aborts the
//! supervisor, and a server-side close simply triggers the reconnect path.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

use crate::signal::Signal;
use crate::store::Store;
use crate::subscription::Latch;

const DEFAULT_BACKOFF_BASE_MS: u64 = 250;
const DEFAULT_BACKOFF_CAP_MS: u64 = 15_000;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RealtimeError {
    #[error("realtime channel already initialized")]
    AlreadyInitialized,
    #[error("invalid channel url: {0}")]
    InvalidUrl(String),
}

// =============================================================================
// SERVICE SEAM
// =============================================================================

/// Opens the live collaboration connection. At most one open per bootstrap
/// cycle; reconnection is internal.
#[async_trait]
pub trait RealtimeService: Send + Sync {
    async fn initialize(&self) -> Result<(), RealtimeError>;
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone)]
pub struct ChannelConfig {
    pub url: String,
    pub backoff_base: Duration,
    pub backoff_cap: Duration,
}

impl ChannelConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
            backoff_cap: Duration::from_millis(DEFAULT_BACKOFF_CAP_MS),
        }
    }
}

// =============================================================================
// WEBSOCKET CHANNEL
// =============================================================================

/// Websocket-backed realtime channel.
pub struct WsChannel {
    config: ChannelConfig,
    store: Arc<Store>,
    started: Latch,
    supervisor: Mutex<Option<JoinHandle<()>>>,
}

impl WsChannel {
    #[must_use]
    pub fn new(config: ChannelConfig, store: Arc<Store>) -> Self {
        Self { config, store, started: Latch::new(), supervisor: Mutex::new(None) }
    }
}

#[async_trait]
impl RealtimeService for WsChannel {
    async fn initialize(&self) -> Result<(), RealtimeError> {
        if !self.config.url.starts_with("ws://") && !self.config.url.starts_with("wss://") {
            return Err(RealtimeError::InvalidUrl(self.config.url.clone()));
        }
        if !self.started.acquire() {
            return Err(RealtimeError::AlreadyInitialized);
        }

        let url = self.config.url.clone();
        let store = self.store.clone();
        let base = self.config.backoff_base;
        let cap = self.config.backoff_cap;
        let handle = tokio::spawn(async move {
            run_channel(&url, &store, base, cap).await;
        });
        *self
            .supervisor
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(handle);
        Ok(())
    }
}

impl Drop for WsChannel {
    fn drop(&mut self) {
        let handle = self
            .supervisor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

// =============================================================================
// SUPERVISOR
// =============================================================================

async fn run_channel(url: &str, store: &Arc<Store>, base: Duration, cap: Duration) {
    let mut attempt: u32 = 0;
    loop {
        match connect_async(url).await {
            Ok((mut socket, _resp)) => {
                info!(%url, "realtime: channel connected");
                attempt = 0;

                while let Some(msg) = socket.next().await {
                    match msg {
                        Ok(Message::Text(text)) => {
                            if let Some(payload) = parse_channel_message(&text) {
                                store.emit([Signal::ChannelMessage { payload }]);
                            } else {
                                warn!("realtime: discarding malformed payload");
                            }
                        }
                        Ok(Message::Close(_)) => break,
                        Ok(_) => {}
                        Err(e) => {
                            warn!(error = %e, "realtime: socket error");
                            break;
                        }
                    }
                }
                warn!(%url, "realtime: channel disconnected");
            }
            Err(e) => {
                warn!(error = %e, %url, "realtime: connect failed");
            }
        }

        let delay = backoff_delay(attempt, base, cap);
        attempt = attempt.saturating_add(1);
        tokio::time::sleep(delay).await;
    }
}

/// Parse an inbound text payload. Only JSON objects are forwarded.
fn parse_channel_message(text: &str) -> Option<serde_json::Value> {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .filter(serde_json::Value::is_object)
}

/// Exponential backoff with a cap plus up to 25% additive jitter.
fn backoff_delay(attempt: u32, base: Duration, cap: Duration) -> Duration {
    let exp = base.saturating_mul(2u32.saturating_pow(attempt.min(16)));
    let capped = exp.min(cap);
    let jitter_ceiling = u64::try_from(capped.as_millis()).unwrap_or(u64::MAX) / 4;
    if jitter_ceiling == 0 {
        return capped;
    }
    capped + Duration::from_millis(rand::rng().random_range(0..=jitter_ceiling))
}

#[cfg(test)]
#[path = "realtime_test.rs"]
mod tests;
