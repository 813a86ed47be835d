use tracing::{debug, info};

use practice_core::model::{DueWords, VocabularyEntry, VocabularyList, WordStatus};

use super::state::{ViewScope, ViewState};
use crate::api::{ApiClient, fetch_pair};
use crate::bootstrap::Session;
use crate::error::FetchError;

/// Word list (optionally filtered) plus the current due queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyData {
    pub list: VocabularyList,
    pub due: DueWords,
}

impl VocabularyData {
    #[must_use]
    pub fn due_words(&self) -> &[VocabularyEntry] {
        &self.due.due_words
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.list
            .words
            .iter()
            .any(|entry| entry.word.eq_ignore_ascii_case(word))
    }
}

/// Fetch the vocabulary list and the due queue concurrently.
///
/// # Errors
///
/// Returns the first `FetchError` from either request; no partial data.
pub async fn fetch_vocabulary(
    api: &ApiClient,
    session: &Session,
    filter: Option<WordStatus>,
    due_limit: u32,
) -> Result<VocabularyData, FetchError> {
    let (list, due) = fetch_pair(
        api.vocabulary(session, filter),
        api.due_words(session, due_limit),
    )
    .await?;
    Ok(VocabularyData { list, due })
}

/// Vocabulary screen: browse, filter, add and remove words.
#[derive(Debug)]
pub struct VocabularyView {
    api: ApiClient,
    session: Session,
    scope: ViewScope,
    filter: Option<WordStatus>,
    state: ViewState<VocabularyData>,
}

impl VocabularyView {
    #[must_use]
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            scope: ViewScope::new(),
            filter: None,
            state: ViewState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState<VocabularyData> {
        &self.state
    }

    #[must_use]
    pub fn filter(&self) -> Option<WordStatus> {
        self.filter
    }

    #[must_use]
    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    /// Full (re)fetch of the list and due queue.
    ///
    /// Returns `false` if the result was discarded because the view was torn
    /// down meanwhile.
    pub async fn load(&mut self) -> bool {
        let ticket = self.scope.begin();
        self.state = ViewState::Loading;

        let result = fetch_vocabulary(
            &self.api,
            &self.session,
            self.filter,
            self.api.config().due_limit,
        )
        .await;
        if !self.scope.is_current(ticket) {
            debug!("vocabulary result discarded; view no longer mounted");
            return false;
        }

        self.state = result.into();
        true
    }

    /// Change the status filter and refetch.
    pub async fn set_filter(&mut self, filter: Option<WordStatus>) -> bool {
        self.filter = filter;
        self.load().await
    }

    /// Add a word, then refetch on success.
    ///
    /// The new word only shows up in the due queue once the backend schedules it.
    ///
    /// # Errors
    ///
    /// Returns the mutation's `FetchError`; the current state is left untouched.
    pub async fn add_word(&mut self, word: &str) -> Result<VocabularyEntry, FetchError> {
        let added = self.api.add_word(&self.session, word).await?;
        info!(word = %added.word.word, "word added");
        self.load().await;
        Ok(added.word)
    }

    /// Remove a word, then refetch on success.
    ///
    /// # Errors
    ///
    /// Returns the mutation's `FetchError` (e.g. 404 for an unknown word).
    pub async fn remove_word(&mut self, word: &str) -> Result<(), FetchError> {
        self.api.delete_word(&self.session, word).await?;
        info!(word, "word removed");
        self.load().await;
        Ok(())
    }
}
