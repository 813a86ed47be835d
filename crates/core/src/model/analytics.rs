use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::model::ids::UserId;

//
// ─── ERROR COUNTS ──────────────────────────────────────────────────────────────
//

/// Error-category occurrence counts, in the order the backend listed them.
///
/// Serialized as a JSON object. Iteration order is the document order, which
/// is what the breakdown chart displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorCounts(Vec<(String, u32)>);

impl ErrorCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count for `category`, keeping its original position if present.
    pub fn insert(&mut self, category: impl Into<String>, count: u32) {
        let category = category.into();
        match self.0.iter_mut().find(|(name, _)| *name == category) {
            Some(slot) => slot.1 = count,
            None => self.0.push((category, count)),
        }
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|(_, count)| count).sum()
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for ErrorCounts {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (category, count) in iter {
            counts.insert(category, count);
        }
        counts
    }
}

impl Serialize for ErrorCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, count) in &self.0 {
            map.serialize_entry(category, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ErrorCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = ErrorCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of error category to count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut counts = ErrorCounts::new();
                while let Some((category, count)) = access.next_entry::<String, u32>()? {
                    counts.insert(category, count);
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

//
// ─── ANALYTICS SNAPSHOT ────────────────────────────────────────────────────────
//

/// Aggregate practice statistics computed by the backend.
///
/// Every field defaults, since the backend answers with a zeroed snapshot for
/// users it has no data for. Replaced wholesale on refetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSnapshot {
    pub total_messages: u32,
    pub voice_messages: u32,
    pub text_messages: u32,
    pub total_errors: u32,
    pub error_types: ErrorCounts,
    pub practice_days: Vec<String>,
    pub streak: u32,
    /// Errors per hundred messages, rounded to one decimal by the backend.
    pub error_rate: f64,
    pub messages_this_week: u32,
}

impl AnalyticsSnapshot {
    /// Share of messages that were voice messages, as a percentage.
    #[must_use]
    pub fn voice_share(&self) -> f64 {
        if self.total_messages == 0 {
            return 0.0;
        }
        f64::from(self.voice_messages) * 100.0 / f64::from(self.total_messages)
    }
}

//
// ─── CHART SOURCE DATA ─────────────────────────────────────────────────────────
//

/// Activity counts for a single calendar day (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    pub date: String,
    #[serde(default)]
    pub messages: u32,
    #[serde(default)]
    pub errors: u32,
}

/// Body of `GET /api/charts/{userId}?days=N`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub daily: Vec<DailyBucket>,
    #[serde(default)]
    pub error_types: ErrorCounts,
}

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryBlock {
    pub total_messages: u32,
    pub messages_this_week: u32,
    pub total_errors: u32,
    pub error_rate: f64,
    pub streak: u32,
}

/// Body of `GET /api/stats/summary`: headline numbers plus the last week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub user_id: UserId,
    #[serde(default)]
    pub summary: SummaryBlock,
    #[serde(default)]
    pub recent_activity: Vec<DailyBucket>,
    #[serde(default)]
    pub error_breakdown: ErrorCounts,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
