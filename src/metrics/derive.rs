use tracing::debug;

use super::time::{minutes_between, parse_timestamp};
use super::{FirstReview, MetricRecord, MetricsError};
use crate::github::types::RawPullRequest;

/// Derive the review metrics for one pull request.
///
/// Only the first review in API order counts toward lead time. An
/// unreviewed PR gets a lead time of 0.
pub fn derive_metrics(pr: &RawPullRequest) -> Result<MetricRecord, MetricsError> {
    let missing = |field: &'static str| MetricsError::MissingField {
        number: pr.number,
        field,
    };
    let require = |value: Option<u64>, field: &'static str| value.ok_or_else(|| missing(field));

    let number = require(pr.number, "number")?;
    let title = pr.title.clone().ok_or_else(|| missing("title"))?;
    let url = pr.url.clone().ok_or_else(|| missing("url"))?;
    let created_by = pr.created_by.clone().ok_or_else(|| missing("createdBy"))?;
    let created_at = parse_timestamp(
        "createdAt",
        pr.created_at.as_deref().ok_or_else(|| missing("createdAt"))?,
    )?;
    let merged_at = parse_timestamp(
        "mergedAt",
        pr.merged_at.as_deref().ok_or_else(|| missing("mergedAt"))?,
    )?;
    let additions = require(pr.additions, "additions")?;
    let deletions = require(pr.deletions, "deletions")?;
    let comments_added = require(pr.total_comment_count, "comments")?;

    let cycle_time_minutes = minutes_between(created_at, merged_at);
    let lines_changed = additions + deletions;

    let mut first_review = None;
    let mut lead_time_minutes = 0.0;
    if let Some(review) = pr.reviews.first() {
        let reviewed_at = parse_timestamp(
            "reviewedAt",
            review.reviewed_at.as_deref().ok_or_else(|| missing("reviewedAt"))?,
        )?;
        let reviewed_by = review.reviewed_by.clone().ok_or_else(|| missing("reviewedBy"))?;

        lead_time_minutes = minutes_between(created_at, reviewed_at);
        first_review = Some(FirstReview {
            reviewed_at,
            reviewed_by,
        });
    }

    debug!(
        pr = %pr.short_ref(),
        cycle_time_minutes,
        lead_time_minutes,
        lines_changed,
        "derived metrics"
    );

    Ok(MetricRecord {
        title,
        number,
        url,
        created_by,
        created_at,
        merged_at,
        first_review,
        cycle_time_minutes,
        lead_time_minutes,
        lines_changed,
        comments_added,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::Review;

    fn pr() -> RawPullRequest {
        RawPullRequest {
            title: Some("Add retries".to_string()),
            number: Some(7),
            repository: Some("acme/widgets".to_string()),
            total_comment_count: Some(2),
            reviews: vec![],
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            created_by: Some("bob".to_string()),
            merged_at: Some("2024-01-01T01:30:00Z".to_string()),
            url: Some("https://github.com/acme/widgets/pull/7".to_string()),
            additions: Some(10),
            deletions: Some(5),
        }
    }

    fn review(at: &str, by: &str) -> Review {
        Review {
            reviewed_at: Some(at.to_string()),
            reviewed_by: Some(by.to_string()),
        }
    }

    #[test]
    fn test_unreviewed_pr() {
        let rec = derive_metrics(&pr()).unwrap();
        assert_eq!(rec.cycle_time_minutes, 90.0);
        assert_eq!(rec.lines_changed, 15);
        assert_eq!(rec.lead_time_minutes, 0.0);
        assert_eq!(rec.first_review, None);
        assert_eq!(rec.first_reviewed_at_display(), "-");
        assert_eq!(rec.first_reviewed_by_display(), "-");
        assert_eq!(rec.comments_added, 2);
        assert_eq!(rec.created_by, "bob");
        assert_eq!(rec.number, 7);
    }

    #[test]
    fn test_reviewed_pr() {
        let mut raw = pr();
        raw.reviews = vec![review("2024-01-01T00:45:00Z", "alice")];

        let rec = derive_metrics(&raw).unwrap();
        assert_eq!(rec.lead_time_minutes, 45.0);
        assert_eq!(rec.cycle_time_minutes, 90.0);
        assert_eq!(rec.first_reviewed_by_display(), "alice");
        assert_eq!(rec.first_reviewed_at_display(), "2024-01-01T00:45:00Z");
    }

    #[test]
    fn test_later_reviews_ignored() {
        let mut raw = pr();
        raw.reviews = vec![
            review("2024-01-01T00:45:00Z", "alice"),
            review("2024-01-01T00:05:00Z", "carol"),
        ];

        let rec = derive_metrics(&raw).unwrap();
        assert_eq!(rec.lead_time_minutes, 45.0);
        assert_eq!(rec.first_reviewed_by_display(), "alice");
    }

    #[test]
    fn test_lines_changed_sum() {
        for (add, del) in [(0, 0), (0, 7), (1234, 0), (u32::MAX as u64, 1)] {
            let mut raw = pr();
            raw.additions = Some(add);
            raw.deletions = Some(del);
            assert_eq!(derive_metrics(&raw).unwrap().lines_changed, add + del);
        }
    }

    #[test]
    fn test_negative_cycle_time_kept() {
        let mut raw = pr();
        raw.merged_at = Some("2023-12-31T23:00:00Z".to_string());
        let rec = derive_metrics(&raw).unwrap();
        assert_eq!(rec.cycle_time_minutes, -60.0);
    }

    #[test]
    fn test_missing_author() {
        let mut raw = pr();
        raw.created_by = None;
        assert_eq!(
            derive_metrics(&raw).unwrap_err(),
            MetricsError::MissingField {
                number: Some(7),
                field: "createdBy"
            }
        );
    }

    #[test]
    fn test_missing_pull_request_fields() {
        let cases: [(&str, fn(&mut RawPullRequest)); 7] = [
            ("title", |pr| pr.title = None),
            ("url", |pr| pr.url = None),
            ("createdAt", |pr| pr.created_at = None),
            ("additions", |pr| pr.additions = None),
            ("deletions", |pr| pr.deletions = None),
            ("comments", |pr| pr.total_comment_count = None),
            ("number", |pr| pr.number = None),
        ];

        for (field, clear) in cases {
            let mut raw = pr();
            clear(&mut raw);
            let expected_number = raw.number;
            assert_eq!(
                derive_metrics(&raw).unwrap_err(),
                MetricsError::MissingField {
                    number: expected_number,
                    field
                },
                "clearing {}",
                field
            );
        }
    }

    #[test]
    fn test_issue_node_is_missing_number() {
        assert_eq!(
            derive_metrics(&RawPullRequest::default()).unwrap_err(),
            MetricsError::MissingField {
                number: None,
                field: "number"
            }
        );
    }

    #[test]
    fn test_missing_merged_at() {
        let mut raw = pr();
        raw.merged_at = None;
        assert!(matches!(
            derive_metrics(&raw),
            Err(MetricsError::MissingField { field: "mergedAt", .. })
        ));
    }

    #[test]
    fn test_review_without_timestamp() {
        let mut raw = pr();
        raw.reviews = vec![Review {
            reviewed_at: None,
            reviewed_by: Some("alice".to_string()),
        }];
        assert!(matches!(
            derive_metrics(&raw),
            Err(MetricsError::MissingField { field: "reviewedAt", .. })
        ));
    }

    #[test]
    fn test_review_without_author() {
        let mut raw = pr();
        raw.reviews = vec![Review {
            reviewed_at: Some("2024-01-01T00:45:00Z".to_string()),
            reviewed_by: None,
        }];
        assert!(matches!(
            derive_metrics(&raw),
            Err(MetricsError::MissingField { field: "reviewedBy", .. })
        ));
    }

    #[test]
    fn test_malformed_created_at() {
        let mut raw = pr();
        raw.created_at = Some("01/01/2024".to_string());
        assert!(matches!(
            derive_metrics(&raw),
            Err(MetricsError::MalformedTimestamp { field: "createdAt", .. })
        ));
    }
}
