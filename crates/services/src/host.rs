//! Narrow contract with the embedding messenger.
//!
//! The host is injected, never looked up as a global, so the rest of the crate
//! can be driven by [`RecordingHost`] in tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use practice_core::model::UserId;
use serde::Deserialize;

/// Capabilities the host platform exposes to the embedded app.
pub trait HostContext: Send + Sync {
    /// Tell the host the app has finished loading.
    fn ready(&self);

    /// Ask the host for the full-height layout.
    fn expand(&self);

    fn show_alert(&self, message: &str);

    /// Opaque signed launch payload, forwarded as the auth token. May be empty.
    fn init_data(&self) -> String;

    /// Unverified decoded view of the launch payload.
    fn init_data_unsafe(&self) -> InitDataUnsafe;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InitDataUnsafe {
    #[serde(default)]
    pub user: Option<HostUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostUser {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl InitDataUnsafe {
    #[must_use]
    pub fn for_user(id: UserId) -> Self {
        Self {
            user: Some(HostUser {
                id: Some(id),
                ..HostUser::default()
            }),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().and_then(|user| user.id)
    }
}

//
// ─── RECORDING HOST ────────────────────────────────────────────────────────────
//

/// In-memory host that records every call made against it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    init_data: String,
    unsafe_data: InitDataUnsafe,
    ready_calls: AtomicUsize,
    expand_calls: AtomicUsize,
    alerts: Mutex<Vec<String>>,
}

impl RecordingHost {
    #[must_use]
    pub fn new(init_data: impl Into<String>, unsafe_data: InitDataUnsafe) -> Self {
        Self {
            init_data: init_data.into(),
            unsafe_data,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_user(id: UserId, init_data: impl Into<String>) -> Self {
        Self::new(init_data, InitDataUnsafe::for_user(id))
    }

    #[must_use]
    pub fn ready_calls(&self) -> usize {
        self.ready_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn expand_calls(&self) -> usize {
        self.expand_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|alerts| alerts.clone())
            .unwrap_or_default()
    }
}

impl HostContext for RecordingHost {
    fn ready(&self) {
        self.ready_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn expand(&self) {
        self.expand_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn show_alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }

    fn init_data(&self) -> String {
        self.init_data.clone()
    }

    fn init_data_unsafe(&self) -> InitDataUnsafe {
        self.unsafe_data.clone()
    }
}
