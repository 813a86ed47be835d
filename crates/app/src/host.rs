//! Host stand-in for running the client outside the messenger.

use practice_core::model::UserId;
use serde_json::Value;
use services::{HostContext, HostUser, InitDataUnsafe};
use tracing::debug;

/// Host backed by command-line/environment values; alerts go to stderr.
#[derive(Debug, Clone)]
pub struct EnvHost {
    init_data: String,
    user_id: Option<UserId>,
}

impl EnvHost {
    /// `None` when there is nothing to launch with, which mirrors opening the
    /// app outside the messenger.
    #[must_use]
    pub fn from_args(init_data: Option<String>, user_id: Option<UserId>) -> Option<Self> {
        if init_data.is_none() && user_id.is_none() {
            return None;
        }
        Some(Self {
            init_data: init_data.unwrap_or_default(),
            user_id,
        })
    }
}

impl HostContext for EnvHost {
    fn ready(&self) {
        debug!("host ready");
    }

    fn expand(&self) {
        debug!("host expand");
    }

    fn show_alert(&self, message: &str) {
        eprintln!("! {message}");
    }

    fn init_data(&self) -> String {
        self.init_data.clone()
    }

    fn init_data_unsafe(&self) -> InitDataUnsafe {
        let mut decoded = decode_user(&self.init_data).unwrap_or_default();
        if let Some(id) = self.user_id {
            decoded.id = Some(id);
        }
        InitDataUnsafe {
            user: Some(decoded),
        }
    }
}

/// Pull the `user` JSON object out of a form-encoded launch payload.
fn decode_user(init_data: &str) -> Option<HostUser> {
    let (_, raw) = url::form_urlencoded::parse(init_data.as_bytes()).find(|(key, _)| key == "user")?;
    let value: Value = serde_json::from_str(&raw).ok()?;
    serde_json::from_value(value).ok()
}
