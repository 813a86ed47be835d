use practice_core::model::{AuthToken, UserId};
use tracing::{info, warn};

use crate::error::BootstrapError;
use crate::host::HostContext;

/// Identity and credential for the lifetime of the process. Write-once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    token: AuthToken,
}

impl Session {
    #[must_use]
    pub fn new(user_id: UserId, token: AuthToken) -> Self {
        Self { user_id, token }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn token(&self) -> &AuthToken {
        &self.token
    }
}

/// Validate the host context and extract the session.
///
/// Signals readiness and requests the expanded layout once, as soon as a host
/// is known to exist. An empty `initData` is accepted: requests are still
/// attempted and the backend decides whether to reject them.
///
/// # Errors
///
/// Returns `BootstrapError::NoHostContext` when `host` is `None` and
/// `BootstrapError::NoIdentity` when the host supplies no user id.
pub fn bootstrap(host: Option<&dyn HostContext>) -> Result<Session, BootstrapError> {
    let Some(host) = host else {
        warn!("no host context; app opened outside the messenger");
        return Err(BootstrapError::NoHostContext);
    };

    host.ready();
    host.expand();

    let Some(user_id) = host.init_data_unsafe().user_id() else {
        warn!("host context has no user identity");
        return Err(BootstrapError::NoIdentity);
    };

    let token = AuthToken::new(host.init_data());
    if token.is_empty() {
        warn!(%user_id, "host supplied no init data; continuing without auth header");
    }

    info!(%user_id, "session bootstrapped");
    Ok(Session::new(user_id, token))
}
