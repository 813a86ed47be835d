use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::UserId;

//
// ─── WORD STATUS ───────────────────────────────────────────────────────────────
//

/// Learning stage assigned to a word by the backend scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    #[default]
    New,
    Learning,
    Mastered,
}

impl WordStatus {
    /// Wire value, also used for the `?status=` filter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WordStatus::New => "new",
            WordStatus::Learning => "learning",
            WordStatus::Mastered => "mastered",
        }
    }

    #[must_use]
    pub fn all() -> [WordStatus; 3] {
        [WordStatus::New, WordStatus::Learning, WordStatus::Mastered]
    }
}

impl fmt::Display for WordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── VOCABULARY ENTRY ──────────────────────────────────────────────────────────
//

fn default_interval() -> u32 {
    1
}

/// A read-only copy of one word from the learner's vocabulary.
///
/// The backend owns these records; the client never edits them locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub status: WordStatus,
    /// Day the backend scheduled the next review for.
    pub next_review: NaiveDate,
    #[serde(default = "default_interval")]
    pub interval_days: u32,
    #[serde(default)]
    pub added_date: Option<NaiveDate>,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub correct_count: u32,
}

impl VocabularyEntry {
    /// Share of reviews answered correctly, or `None` before the first review.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        if self.reviews_count == 0 {
            return None;
        }
        Some(f64::from(self.correct_count) / f64::from(self.reviews_count))
    }
}

//
// ─── LIST RESPONSES ────────────────────────────────────────────────────────────
//

/// Per-status word counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyStats {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub new: u32,
    #[serde(default)]
    pub learning: u32,
    #[serde(default)]
    pub mastered: u32,
    #[serde(default)]
    pub due_today: u32,
}

impl VocabularyStats {
    #[must_use]
    pub fn count_for(&self, status: WordStatus) -> u32 {
        match status {
            WordStatus::New => self.new,
            WordStatus::Learning => self.learning,
            WordStatus::Mastered => self.mastered,
        }
    }
}

/// Body of `GET /api/vocabulary/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyList {
    pub user_id: UserId,
    #[serde(default)]
    pub words: Vec<VocabularyEntry>,
    #[serde(default)]
    pub stats: VocabularyStats,
}

/// Body of `GET /api/vocabulary/{userId}/due`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueWords {
    pub user_id: UserId,
    #[serde(default)]
    pub due_words: Vec<VocabularyEntry>,
    #[serde(default)]
    pub count: u32,
}

/// Body of `POST /api/vocabulary/{userId}/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedWord {
    pub status: String,
    pub word: VocabularyEntry,
}

/// Generic `{status, message}` acknowledgement returned by mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
