//! Profile identity and the profile-fetch service.
//!
//! DESIGN
//! ======
//! A fetched profile always exists: unauthenticated sessions carry the
//! anonymous profile (nil UUID) instead of an absent one. "Fetched" and
//! "authenticated" stay independent conditions, which the bootstrap branches
//! depend on — route init gates on the former, realtime init on both.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("profile endpoint returned status {0}")]
    Status(u16),
}

// =============================================================================
// PROFILE
// =============================================================================

/// The current user's identity and authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Identity reference. The nil UUID denotes the anonymous profile.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Account email, absent for anonymous sessions.
    #[serde(default)]
    pub email: Option<String>,
}

impl Profile {
    /// The profile of an unauthenticated session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { id: Uuid::nil(), name: "Anonymous".into(), email: None }
    }

    /// Whether this profile belongs to an authenticated user.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.id.is_nil()
    }
}

// =============================================================================
// SERVICE SEAM
// =============================================================================

/// Fetches the current session's profile. The bootstrap orchestrator treats
/// this as opaque; tests substitute counting fakes.
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn fetch(&self) -> Result<Profile, ProfileError>;
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

/// Profile service backed by the `/api/auth/me` endpoint.
pub struct HttpProfileService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProfileService {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }
}

#[async_trait]
impl ProfileService for HttpProfileService {
    async fn fetch(&self) -> Result<Profile, ProfileError> {
        let url = format!("{}/api/auth/me", self.base_url.trim_end_matches('/'));
        let resp = self.client.get(&url).send().await?;

        // EDGE: 401 is a completed fetch with no identity, not a failure.
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(Profile::anonymous());
        }
        if !resp.status().is_success() {
            return Err(ProfileError::Status(resp.status().as_u16()));
        }
        Ok(resp.json::<Profile>().await?)
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
