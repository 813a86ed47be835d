use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::UserId;

//
// ─── AUTH TOKEN ────────────────────────────────────────────────────────────────
//

/// Opaque credential issued by the host platform.
///
/// The client never inspects the contents; it is only forwarded with each
/// request. An empty token is a valid (degraded) value: the backend decides
/// whether to reject it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("AuthToken(<empty>)")
        } else {
            write!(f, "AuthToken(<{} bytes>)", self.0.len())
        }
    }
}

//
// ─── TOKEN VALIDATION ──────────────────────────────────────────────────────────
//

/// User record echoed back by `POST /api/auth/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedUser {
    pub status: String,
    pub user: AuthenticatedUser,
}
