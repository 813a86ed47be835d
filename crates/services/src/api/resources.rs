//! Typed wrappers around each remote endpoint.

use serde::Serialize;

use practice_core::model::{
    Acknowledgement, AddedWord, AnalyticsSnapshot, AuthToken, ChartData, DueWords, HealthStatus,
    SummaryStats, ValidatedUser, VocabularyList, VocabularyStats, WordStatus,
};

use crate::api::{ApiClient, Endpoint};
use crate::bootstrap::Session;
use crate::error::FetchError;

#[derive(Debug, Serialize)]
struct AddWordRequest<'a> {
    word: &'a str,
}

#[derive(Debug, Serialize)]
struct ReviewWordRequest<'a> {
    word: &'a str,
    correct: bool,
}

fn require_word(word: &str) -> Result<&str, FetchError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(FetchError::InvalidRequest("word must not be empty".into()));
    }
    Ok(word)
}

impl ApiClient {
    pub async fn analytics(&self, session: &Session) -> Result<AnalyticsSnapshot, FetchError> {
        self.request(&Endpoint::Analytics(session.user_id()), session.token())
            .await
    }

    pub async fn charts(&self, session: &Session, days: u32) -> Result<ChartData, FetchError> {
        let endpoint = Endpoint::Charts {
            user_id: session.user_id(),
            days,
        };
        self.request(&endpoint, session.token()).await
    }

    pub async fn vocabulary(
        &self,
        session: &Session,
        status: Option<WordStatus>,
    ) -> Result<VocabularyList, FetchError> {
        let endpoint = Endpoint::Vocabulary {
            user_id: session.user_id(),
            status,
        };
        self.request(&endpoint, session.token()).await
    }

    pub async fn due_words(&self, session: &Session, limit: u32) -> Result<DueWords, FetchError> {
        let endpoint = Endpoint::DueWords {
            user_id: session.user_id(),
            limit,
        };
        self.request(&endpoint, session.token()).await
    }

    pub async fn vocabulary_stats(&self, session: &Session) -> Result<VocabularyStats, FetchError> {
        self.request(&Endpoint::VocabularyStats(session.user_id()), session.token())
            .await
    }

    pub async fn add_word(&self, session: &Session, word: &str) -> Result<AddedWord, FetchError> {
        let word = require_word(word)?;
        self.request_with_body(
            &Endpoint::AddWord(session.user_id()),
            session.token(),
            &AddWordRequest { word },
        )
        .await
    }

    pub async fn review_word(
        &self,
        session: &Session,
        word: &str,
        correct: bool,
    ) -> Result<Acknowledgement, FetchError> {
        self.request_with_body(
            &Endpoint::ReviewWord(session.user_id()),
            session.token(),
            &ReviewWordRequest { word, correct },
        )
        .await
    }

    pub async fn delete_word(&self, session: &Session, word: &str) -> Result<Acknowledgement, FetchError> {
        let endpoint = Endpoint::DeleteWord {
            user_id: session.user_id(),
            word: require_word(word)?.to_string(),
        };
        self.request(&endpoint, session.token()).await
    }

    pub async fn summary_stats(&self, session: &Session) -> Result<SummaryStats, FetchError> {
        self.request(&Endpoint::SummaryStats, session.token()).await
    }

    /// Ask the backend whether `token` is acceptable.
    pub async fn validate_token(&self, token: &AuthToken) -> Result<ValidatedUser, FetchError> {
        self.request(&Endpoint::ValidateAuth, token).await
    }

    pub async fn health(&self) -> Result<HealthStatus, FetchError> {
        self.request(&Endpoint::Health, &AuthToken::default()).await
    }
}
