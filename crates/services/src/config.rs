use std::env;

use tracing::warn;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHART_DAYS: u32 = 7;
pub const DEFAULT_DUE_LIMIT: u32 = 5;

/// Inclusive range of `days` the charts endpoint accepts.
pub const CHART_DAYS_RANGE: std::ops::RangeInclusive<u32> = 1..=30;

/// Where the analytics service lives and how much to ask it for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    pub chart_days: u32,
    pub due_limit: u32,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not an absolute http(s)-style url.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
            raw: base_url.to_string(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::NotABase(base_url.to_string()));
        }
        Ok(Self {
            base_url: parsed,
            chart_days: DEFAULT_CHART_DAYS,
            due_limit: DEFAULT_DUE_LIMIT,
        })
    }

    /// Reads `PRACTICE_API_URL`, `PRACTICE_CHART_DAYS` and `PRACTICE_DUE_LIMIT`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `PRACTICE_API_URL` is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("PRACTICE_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let mut config = Self::new(&base_url)?;
        if let Some(days) = env_u32("PRACTICE_CHART_DAYS") {
            config.chart_days = days;
        }
        if let Some(limit) = env_u32("PRACTICE_DUE_LIMIT") {
            config.due_limit = limit;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_chart_days(mut self, days: u32) -> Self {
        self.chart_days = days;
        self
    }

    #[must_use]
    pub fn with_due_limit(mut self, limit: u32) -> Self {
        self.due_limit = limit;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn env_u32(key: &str) -> Option<u32> {
    parse_u32(key, env::var(key).ok())
}

/// Unset or blank means "use the default"; anything unparseable is reported.
fn parse_u32(key: &str, raw: Option<String>) -> Option<u32> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, value = trimmed, error = %err, "ignoring unparseable setting; using default");
            None
        }
    }
}
