//! Signal — the typed event vocabulary of the client shell.
//!
//! ARCHITECTURE
//! ============
//! Every state change and cross-module notification in the shell is a Signal
//! emitted through the store. Bootstrap branches, the realtime channel, and
//! the reinit watchers all communicate exclusively through this enum; nothing
//! mutates shared state directly.
//!
//! DESIGN
//! ======
//! - Signals are serde-tagged so dev tooling can log and replay a session.
//! - Failures travel as `Error` signals with a grepable scope string; the
//!   emitting side never handles them itself.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::Profile;

// =============================================================================
// ERROR SCOPES
// =============================================================================

/// Scope for a failed profile fetch.
pub const SCOPE_PROFILE_FETCH: &str = "profile:fetch";

/// Scope for a failed route-table initialization.
pub const SCOPE_ROUTER_INIT: &str = "router:init";

/// Scope for a failed realtime-channel initialization.
pub const SCOPE_REALTIME_INIT: &str = "realtime:init";

// =============================================================================
// SIGNAL
// =============================================================================

/// The shell's event vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    /// Bootstrap mutation phase: a fresh session marker enters shared state.
    SessionStarted { marker: Uuid },
    /// Generic "app initialize". Emitted at activation and on soft reinit.
    AppInit,
    /// Feature-flag initialization. Emitted once at activation.
    FlagsInit,
    /// Profile fetch completed, authenticated or not. An anonymous profile
    /// still counts as fetched.
    ProfileFetched { profile: Profile },
    /// Team/profile follow-up bootstrap, only for an authenticated first fetch.
    ProfileInit { profile: Profile },
    /// A collaborator destroyed the current profile (logout trigger).
    ProfileDeleted,
    /// Propagated once per `ProfileDeleted`.
    LoggedOut,
    /// Active locale changed; precedes the soft reinit.
    LocaleChanged { locale: String },
    /// Inbound realtime payload, forwarded opaquely to store subscribers.
    ChannelMessage { payload: serde_json::Value },
    /// Error-shaped event. Handled by error-reporting subscribers, never by
    /// the emitter.
    Error { scope: String, message: String },
}

impl Signal {
    /// Build an error-shaped signal for the given scope.
    #[must_use]
    pub fn error(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Signal::Error { scope: scope.into(), message: message.into() }
    }

    /// Stable name for structured logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Signal::SessionStarted { .. } => "session_started",
            Signal::AppInit => "app_init",
            Signal::FlagsInit => "flags_init",
            Signal::ProfileFetched { .. } => "profile_fetched",
            Signal::ProfileInit { .. } => "profile_init",
            Signal::ProfileDeleted => "profile_deleted",
            Signal::LoggedOut => "logged_out",
            Signal::LocaleChanged { .. } => "locale_changed",
            Signal::ChannelMessage { .. } => "channel_message",
            Signal::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
#[path = "signal_test.rs"]
mod tests;
