//! Signed-in state as seen by the client.

use serde::{Deserialize, Serialize};

/// Bearer token issued by the web login flow.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Manual Debug impl to prevent leaking the token in logs.
impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

/// The stored user profile. Only `username` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Explicit login status handed to the app at startup and at refresh points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionContext {
    #[default]
    Anonymous,
    SignedIn {
        token: AuthToken,
        profile: UserProfile,
    },
}

impl SessionContext {
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionContext::SignedIn { .. })
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            SessionContext::SignedIn { profile, .. } => Some(profile.username.as_str()),
            SessionContext::Anonymous => None,
        }
    }
}
