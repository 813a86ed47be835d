//! Pure conversions from backend analytics payloads to chart-ready series.
//!
//! Nothing here performs I/O. The presentation layer hands the resulting
//! `ChartSeries` to whatever charting library it uses.

use chrono::NaiveDate;

use crate::model::{DailyBucket, ErrorCounts};

/// Parallel label/value vectors, one entry per data point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
}

impl ChartSeries {
    /// An empty series means "no data, no chart".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, u32)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Messages per day, one point per bucket, input order preserved.
#[must_use]
pub fn to_activity_series(buckets: &[DailyBucket]) -> ChartSeries {
    series_from_buckets(buckets, |bucket| bucket.messages)
}

/// Errors per day, aligned with [`to_activity_series`].
#[must_use]
pub fn to_error_series(buckets: &[DailyBucket]) -> ChartSeries {
    series_from_buckets(buckets, |bucket| bucket.errors)
}

/// One point per error category, in the order the categories were given.
#[must_use]
pub fn to_error_breakdown(counts: &ErrorCounts) -> ChartSeries {
    let (labels, values) = counts
        .iter()
        .map(|(category, count)| (title_case(category), count))
        .unzip();
    ChartSeries { labels, values }
}

fn series_from_buckets(buckets: &[DailyBucket], value: impl Fn(&DailyBucket) -> u32) -> ChartSeries {
    let (labels, values) = buckets
        .iter()
        .map(|bucket| (short_date_label(&bucket.date), value(bucket)))
        .unzip();
    ChartSeries { labels, values }
}

/// Formats `2024-05-06` as `May 6`.
///
/// Unparseable input is returned verbatim so labels stay aligned with buckets.
#[must_use]
pub fn short_date_label(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|date| date.format("%b %-d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// `grammar_error` -> `Grammar Error`.
#[must_use]
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
