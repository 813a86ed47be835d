use reqwest::Method;
use url::Url;

use practice_core::model::{UserId, WordStatus};

use crate::config::CHART_DAYS_RANGE;
use crate::error::FetchError;

/// Every remote operation the client knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Analytics(UserId),
    Charts { user_id: UserId, days: u32 },
    Vocabulary { user_id: UserId, status: Option<WordStatus> },
    DueWords { user_id: UserId, limit: u32 },
    AddWord(UserId),
    ReviewWord(UserId),
    DeleteWord { user_id: UserId, word: String },
    VocabularyStats(UserId),
    SummaryStats,
    ValidateAuth,
    Health,
}

impl Endpoint {
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Endpoint::AddWord(_) | Endpoint::ReviewWord(_) | Endpoint::ValidateAuth => Method::POST,
            Endpoint::DeleteWord { .. } => Method::DELETE,
            _ => Method::GET,
        }
    }

    /// Path segments below the base url, unescaped.
    #[must_use]
    pub fn segments(&self) -> Vec<String> {
        let user = |prefix: &str, id: &UserId| vec!["api".into(), prefix.into(), id.to_string()];
        match self {
            Endpoint::Analytics(id) => user("analytics", id),
            Endpoint::Charts { user_id, .. } => user("charts", user_id),
            Endpoint::Vocabulary { user_id, .. } => user("vocabulary", user_id),
            Endpoint::DueWords { user_id, .. } => with(user("vocabulary", user_id), "due"),
            Endpoint::AddWord(id) => with(user("vocabulary", id), "add"),
            Endpoint::ReviewWord(id) => with(user("vocabulary", id), "review"),
            Endpoint::DeleteWord { user_id, word } => with(user("vocabulary", user_id), word),
            Endpoint::VocabularyStats(id) => with(user("vocabulary", id), "stats"),
            Endpoint::SummaryStats => vec!["api".into(), "stats".into(), "summary".into()],
            Endpoint::ValidateAuth => vec!["api".into(), "auth".into(), "validate".into()],
            Endpoint::Health => vec!["health".into()],
        }
    }

    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Charts { days, .. } => vec![("days", days.to_string())],
            Endpoint::Vocabulary {
                status: Some(status),
                ..
            } => vec![("status", status.as_str().to_string())],
            Endpoint::DueWords { limit, .. } => vec![("limit", limit.to_string())],
            _ => Vec::new(),
        }
    }

    /// Reject requests the backend is known to refuse.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidRequest` for out-of-range `days`, a zero
    /// `limit`, or a blank word.
    pub fn validate(&self) -> Result<(), FetchError> {
        match self {
            Endpoint::Charts { days, .. } if !CHART_DAYS_RANGE.contains(days) => {
                Err(FetchError::InvalidRequest(format!(
                    "days must be between {} and {}, got {days}",
                    CHART_DAYS_RANGE.start(),
                    CHART_DAYS_RANGE.end()
                )))
            }
            Endpoint::DueWords { limit: 0, .. } => Err(FetchError::InvalidRequest(
                "limit must be at least 1".into(),
            )),
            Endpoint::DeleteWord { word, .. } if word.trim().is_empty() => {
                Err(FetchError::InvalidRequest("word must not be empty".into()))
            }
            _ => Ok(()),
        }
    }

    /// Absolute url for this endpoint under `base`; segments are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidRequest` if `base` cannot carry a path.
    pub fn url(&self, base: &Url) -> Result<Url, FetchError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidRequest(format!("{base} cannot carry a path")))?
            .pop_if_empty()
            .extend(self.segments());
        let query = self.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

fn with(mut segments: Vec<String>, last: &str) -> Vec<String> {
    segments.push(last.to_string());
    segments
}
