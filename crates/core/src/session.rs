use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::VocabularyEntry;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Calls that are invalid for the current review phase.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReviewError {
    #[error("no words are due for review")]
    EmptyQueue,
    #[error("review session already started")]
    AlreadyStarted,
    #[error("review session has not been started")]
    NotStarted,
    #[error("review session already completed")]
    Completed,
}

//
// ─── PHASE & PROGRESS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewPhase {
    #[default]
    Idle,
    Active,
    Completed,
}

/// Aggregated view of review progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub correct: usize,
    pub is_complete: bool,
}

/// What a single `grade` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeStep {
    pub word: String,
    pub correct: bool,
    /// Position after the step was applied.
    pub position: usize,
    pub completed: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one pass over a due-word queue.
///
/// `Idle -> Active -> Completed`, with `reset` returning to `Idle` from any
/// phase. The queue is fixed at `start` and consumed front to back; grading
/// only moves `position`, so `0 <= position <= queue.len()` and the phase is
/// `Completed` exactly when `position == queue.len()`.
#[derive(Clone, Default)]
pub struct ReviewSession {
    queue: Vec<VocabularyEntry>,
    position: usize,
    phase: ReviewPhase,
    correct: usize,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl ReviewSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> ReviewPhase {
        self.phase
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn queue(&self) -> &[VocabularyEntry] {
        &self.queue
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == ReviewPhase::Completed
    }

    /// The word awaiting a grade, if the session is active.
    #[must_use]
    pub fn current(&self) -> Option<&VocabularyEntry> {
        if self.phase == ReviewPhase::Active {
            self.queue.get(self.position)
        } else {
            None
        }
    }

    #[must_use]
    pub fn progress(&self) -> ReviewProgress {
        ReviewProgress {
            total: self.queue.len(),
            answered: self.position,
            remaining: self.queue.len() - self.position,
            correct: self.correct,
            is_complete: self.is_complete(),
        }
    }

    /// Begin reviewing `queue` from the first entry.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::EmptyQueue` for an empty queue (the session stays
    /// `Idle`; callers render a "nothing due" state instead).
    /// Returns `ReviewError::AlreadyStarted` unless the session is `Idle`.
    pub fn start(&mut self, queue: Vec<VocabularyEntry>, now: DateTime<Utc>) -> Result<(), ReviewError> {
        if self.phase != ReviewPhase::Idle {
            return Err(ReviewError::AlreadyStarted);
        }
        if queue.is_empty() {
            return Err(ReviewError::EmptyQueue);
        }

        self.queue = queue;
        self.position = 0;
        self.correct = 0;
        self.phase = ReviewPhase::Active;
        self.started_at = Some(now);
        self.completed_at = None;
        Ok(())
    }

    /// Check that a grade may be applied and return the word it applies to.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::NotStarted` when `Idle` and
    /// `ReviewError::Completed` when already finished.
    pub fn gradable(&self) -> Result<&VocabularyEntry, ReviewError> {
        match self.phase {
            ReviewPhase::Idle => Err(ReviewError::NotStarted),
            ReviewPhase::Completed => Err(ReviewError::Completed),
            ReviewPhase::Active => self.queue.get(self.position).ok_or(ReviewError::Completed),
        }
    }

    /// Record a grade for the current word and advance.
    ///
    /// Leaves the session untouched when the call is invalid.
    ///
    /// # Errors
    ///
    /// See [`ReviewSession::gradable`].
    pub fn grade(&mut self, correct: bool, now: DateTime<Utc>) -> Result<GradeStep, ReviewError> {
        let word = self.gradable()?.word.clone();

        self.position += 1;
        if correct {
            self.correct += 1;
        }
        let completed = self.position == self.queue.len();
        if completed {
            self.phase = ReviewPhase::Completed;
            self.completed_at = Some(now);
        }

        Ok(GradeStep {
            word,
            correct,
            position: self.position,
            completed,
        })
    }

    /// Return to `Idle`, discarding the queue.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for ReviewSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewSession")
            .field("phase", &self.phase)
            .field("queue_len", &self.queue.len())
            .field("position", &self.position)
            .field("correct", &self.correct)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WordStatus;
    use crate::time::fixed_now;
    use chrono::{Duration, NaiveDate};

    fn entry(word: &str) -> VocabularyEntry {
        VocabularyEntry {
            word: word.to_string(),
            translation: String::new(),
            example: String::new(),
            status: WordStatus::New,
            next_review: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            interval_days: 1,
            added_date: None,
            reviews_count: 0,
            correct_count: 0,
        }
    }

    fn queue(words: &[&str]) -> Vec<VocabularyEntry> {
        words.iter().map(|w| entry(w)).collect()
    }

    #[test]
    fn three_grades_walk_through_every_position() {
        let mut session = ReviewSession::new();
        session.start(queue(&["a", "b", "c"]), fixed_now()).unwrap();

        let mut phases = vec![session.phase()];
        let mut positions = vec![session.position()];
        for correct in [true, false, true] {
            session.grade(correct, fixed_now()).unwrap();
            phases.push(session.phase());
            positions.push(session.position());
        }

        assert_eq!(
            phases,
            [
                ReviewPhase::Active,
                ReviewPhase::Active,
                ReviewPhase::Active,
                ReviewPhase::Completed
            ]
        );
        assert_eq!(positions, [0, 1, 2, 3]);
        assert_eq!(session.progress().correct, 2);
    }

    #[test]
    fn grading_after_completion_is_rejected_without_change() {
        let mut session = ReviewSession::new();
        session.start(queue(&["only"]), fixed_now()).unwrap();
        let step = session.grade(true, fixed_now()).unwrap();
        assert!(step.completed);

        let err = session.grade(true, fixed_now()).unwrap_err();
        assert_eq!(err, ReviewError::Completed);
        assert_eq!(session.position(), 1);
        assert_eq!(session.phase(), ReviewPhase::Completed);
        assert!(session.current().is_none());
    }

    #[test]
    fn grading_while_idle_is_rejected() {
        let mut session = ReviewSession::new();
        assert_eq!(session.grade(true, fixed_now()), Err(ReviewError::NotStarted));
        assert_eq!(session.phase(), ReviewPhase::Idle);
    }

    #[test]
    fn empty_queue_never_becomes_active() {
        let mut session = ReviewSession::new();
        assert_eq!(session.start(Vec::new(), fixed_now()), Err(ReviewError::EmptyQueue));
        assert_eq!(session.phase(), ReviewPhase::Idle);
    }

    #[test]
    fn start_requires_idle() {
        let mut session = ReviewSession::new();
        session.start(queue(&["a"]), fixed_now()).unwrap();
        assert_eq!(
            session.start(queue(&["b"]), fixed_now()),
            Err(ReviewError::AlreadyStarted)
        );
        assert_eq!(session.current().unwrap().word, "a");
    }

    #[test]
    fn reset_from_any_phase_clears_queue() {
        let mut idle = ReviewSession::new();
        idle.reset();

        let mut active = ReviewSession::new();
        active.start(queue(&["a", "b"]), fixed_now()).unwrap();
        active.grade(true, fixed_now()).unwrap();
        active.reset();

        let mut done = ReviewSession::new();
        done.start(queue(&["a"]), fixed_now()).unwrap();
        done.grade(false, fixed_now()).unwrap();
        done.reset();

        for session in [idle, active, done] {
            assert_eq!(session.phase(), ReviewPhase::Idle);
            assert!(session.queue().is_empty());
            assert_eq!(session.position(), 0);
            assert!(session.started_at().is_none());
        }
    }

    #[test]
    fn two_word_scenario_records_timestamps() {
        let mut session = ReviewSession::new();
        let start = fixed_now();
        session.start(queue(&["A", "B"]), start).unwrap();
        assert_eq!((session.phase(), session.position()), (ReviewPhase::Active, 0));

        let first = session.grade(true, start + Duration::seconds(5)).unwrap();
        assert_eq!(first.word, "A");
        assert_eq!((session.phase(), session.position()), (ReviewPhase::Active, 1));
        assert!(session.completed_at().is_none());

        let finish = start + Duration::seconds(9);
        let second = session.grade(false, finish).unwrap();
        assert_eq!(second.word, "B");
        assert!(second.completed);
        assert_eq!(session.completed_at(), Some(finish));
        assert_eq!(
            session.progress(),
            ReviewProgress {
                total: 2,
                answered: 2,
                remaining: 0,
                correct: 1,
                is_complete: true,
            }
        );
    }

    #[test]
    fn queue_is_not_mutated_by_grading() {
        let mut session = ReviewSession::new();
        let words = queue(&["x", "y"]);
        session.start(words.clone(), fixed_now()).unwrap();
        session.grade(true, fixed_now()).unwrap();
        assert_eq!(session.queue(), words.as_slice());
    }
}
