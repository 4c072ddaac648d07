pub mod derive;
pub mod time;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use derive::derive_metrics;
pub use time::{minutes_between, parse_timestamp};

/// Placeholder written in place of review fields when a PR was never reviewed
pub const NO_REVIEW: &str = "-";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("Malformed timestamp in {field}: {value:?} ({reason})")]
    MalformedTimestamp {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("{} is missing {field}", pr_label(.number))]
    MissingField {
        number: Option<u64>, // None when the number itself is absent
        field: &'static str,
    },
}

fn pr_label(number: &Option<u64>) -> String {
    match number {
        Some(n) => format!("PR #{}", n),
        None => "Search result".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FirstReview {
    pub reviewed_at: DateTime<Utc>,
    pub reviewed_by: String,
}

/// Derived review metrics for one merged pull request.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub title: String,
    pub number: u64,
    pub url: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub merged_at: DateTime<Utc>,
    pub first_review: Option<FirstReview>,
    pub cycle_time_minutes: f64, // created -> merged, may be negative
    pub lead_time_minutes: f64,  // created -> first review, 0 when unreviewed
    pub lines_changed: u64,
    pub comments_added: u64,
}

impl MetricRecord {
    pub fn is_reviewed(&self) -> bool {
        self.first_review.is_some()
    }

    pub fn first_reviewed_at_display(&self) -> String {
        match &self.first_review {
            Some(review) => format_timestamp(&review.reviewed_at),
            None => NO_REVIEW.to_string(),
        }
    }

    pub fn first_reviewed_by_display(&self) -> String {
        match &self.first_review {
            Some(review) => review.reviewed_by.clone(),
            None => NO_REVIEW.to_string(),
        }
    }
}

/// RFC 3339 in UTC with a `Z` suffix, matching what GitHub returns.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
}
