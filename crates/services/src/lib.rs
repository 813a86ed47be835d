#![forbid(unsafe_code)]

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod host;
pub mod review;
pub mod views;

pub use practice_core::Clock;

pub use api::{ApiClient, Endpoint, fetch_all, fetch_pair};
pub use bootstrap::{Session, bootstrap};
pub use config::ApiConfig;
pub use error::{BootstrapError, ConfigError, FetchError, GradeError, StartError};
pub use host::{HostContext, HostUser, InitDataUnsafe, RecordingHost};
pub use review::{GradeOutcome, ReviewController, ReviewStart};
pub use views::{
    DashboardData, DashboardView, VocabularyData, VocabularyView, ViewScope, ViewState,
};
