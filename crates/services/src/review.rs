use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use practice_core::Clock;
use practice_core::model::VocabularyEntry;
use practice_core::session::{GradeStep, ReviewError, ReviewSession};

use crate::api::ApiClient;
use crate::bootstrap::Session;
use crate::error::{FetchError, GradeError, StartError};
use crate::host::HostContext;
use crate::views::{VocabularyData, fetch_vocabulary};

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStart {
    /// Empty due queue: render "nothing to review", the engine stays idle.
    NothingDue,
    Started { total: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GradeOutcome {
    Advanced {
        step: GradeStep,
        save_error: Option<GradeError>,
    },
    Completed {
        step: GradeStep,
        save_error: Option<GradeError>,
        /// Vocabulary refetched after the last grade, so counts and the due
        /// list reflect the session.
        refreshed: Result<VocabularyData, FetchError>,
    },
}

impl GradeOutcome {
    #[must_use]
    pub fn step(&self) -> &GradeStep {
        match self {
            GradeOutcome::Advanced { step, .. } | GradeOutcome::Completed { step, .. } => step,
        }
    }

    #[must_use]
    pub fn save_error(&self) -> Option<&GradeError> {
        match self {
            GradeOutcome::Advanced { save_error, .. }
            | GradeOutcome::Completed { save_error, .. } => save_error.as_ref(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, GradeOutcome::Completed { .. })
    }
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives a [`ReviewSession`] against the backend.
///
/// Each grade is persisted before the engine advances, but a failed save only
/// produces an alert: progression never waits on the network and nothing is
/// retried or rolled back.
pub struct ReviewController {
    api: ApiClient,
    session: Session,
    host: Arc<dyn HostContext>,
    clock: Clock,
    engine: ReviewSession,
}

impl ReviewController {
    #[must_use]
    pub fn new(api: ApiClient, session: Session, host: Arc<dyn HostContext>) -> Self {
        Self {
            api,
            session,
            host,
            clock: Clock::default(),
            engine: ReviewSession::new(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &ReviewSession {
        &self.engine
    }

    #[must_use]
    pub fn current(&self) -> Option<&VocabularyEntry> {
        self.engine.current()
    }

    /// Start a fresh session over `due`, discarding any previous one.
    ///
    /// An empty `due` list is not an error: the engine stays idle and the
    /// caller renders "nothing to review".
    ///
    /// # Errors
    ///
    /// Returns any other `ReviewError` the engine reports on start.
    pub fn begin(&mut self, due: Vec<VocabularyEntry>) -> Result<ReviewStart, ReviewError> {
        self.engine.reset();
        let total = due.len();
        match self.engine.start(due, self.clock.now()) {
            Ok(()) => {
                info!(total, "review session started");
                Ok(ReviewStart::Started { total })
            }
            Err(ReviewError::EmptyQueue) => Ok(ReviewStart::NothingDue),
            Err(
                err @ (ReviewError::AlreadyStarted
                | ReviewError::NotStarted
                | ReviewError::Completed),
            ) => Err(err),
        }
    }

    /// Request a fresh due list from the backend and start over with it.
    ///
    /// # Errors
    ///
    /// Returns `StartError::Fetch` if the due list cannot be fetched; the
    /// session is left idle in that case.
    pub async fn restart(&mut self) -> Result<ReviewStart, StartError> {
        self.engine.reset();
        let due = self
            .api
            .due_words(&self.session, self.api.config().due_limit)
            .await?;
        Ok(self.begin(due.due_words)?)
    }

    /// Grade the current word.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError` if no session is active; nothing is sent then.
    pub async fn grade(&mut self, correct: bool) -> Result<GradeOutcome, ReviewError> {
        let word = self.engine.gradable()?.word.clone();

        let save_error = match self.api.review_word(&self.session, &word, correct).await {
            Ok(_) => None,
            Err(source) => {
                let err = GradeError { word, source };
                warn!(error = %err, "review not saved; continuing");
                self.host.show_alert(&err.to_string());
                Some(err)
            }
        };

        let step = self.engine.grade(correct, self.clock.now())?;
        if !step.completed {
            return Ok(GradeOutcome::Advanced { step, save_error });
        }

        let progress = self.engine.progress();
        info!(total = progress.total, correct = progress.correct, "review session completed");
        self.host.show_alert(&completion_message(progress.correct, progress.total));

        let refreshed = fetch_vocabulary(
            &self.api,
            &self.session,
            None,
            self.api.config().due_limit,
        )
        .await;
        if let Err(err) = &refreshed {
            warn!(error = %err, "vocabulary refresh after review failed");
        }

        Ok(GradeOutcome::Completed {
            step,
            save_error,
            refreshed,
        })
    }

    /// Back to idle; the queue is dropped.
    pub fn reset(&mut self) {
        self.engine.reset();
    }
}

impl fmt::Debug for ReviewController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewController")
            .field("session", &self.session)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

#[must_use]
pub fn completion_message(correct: usize, total: usize) -> String {
    format!("Review complete! You knew {correct} of {total} words.")
}
