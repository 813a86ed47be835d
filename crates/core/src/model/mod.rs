mod analytics;
mod auth;
mod ids;
mod vocabulary;

pub use ids::{ParseIdError, UserId};

pub use analytics::{
    AnalyticsSnapshot, ChartData, DailyBucket, ErrorCounts, HealthStatus, SummaryBlock,
    SummaryStats,
};
pub use auth::{AuthToken, AuthenticatedUser, ValidatedUser};
pub use vocabulary::{
    Acknowledgement, AddedWord, DueWords, VocabularyEntry, VocabularyList, VocabularyStats,
    WordStatus,
};
