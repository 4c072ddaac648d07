use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::metrics::{format_timestamp, parse_timestamp, FirstReview, MetricRecord, NO_REVIEW};

/// Default output file, relative to the working directory
pub const DEFAULT_CSV_PATH: &str = "code_review_metrics.csv";

/// One CSV row. Field order is the column order.
#[derive(Debug, Serialize, Deserialize)]
struct MetricRow {
    title: String,
    number: u64,
    url: String,
    created_by: String,
    created_at: String,
    first_reviewed_at: String,
    first_reviewed_by: String,
    merged_at: String,
    cycle_time_minutes: f64,
    lead_time_minutes: f64,
    lines_changed: u64,
    comments_added: u64,
}

impl From<&MetricRecord> for MetricRow {
    fn from(rec: &MetricRecord) -> Self {
        MetricRow {
            title: rec.title.clone(),
            number: rec.number,
            url: rec.url.clone(),
            created_by: rec.created_by.clone(),
            created_at: format_timestamp(&rec.created_at),
            first_reviewed_at: rec.first_reviewed_at_display(),
            first_reviewed_by: rec.first_reviewed_by_display(),
            merged_at: format_timestamp(&rec.merged_at),
            cycle_time_minutes: rec.cycle_time_minutes,
            lead_time_minutes: rec.lead_time_minutes,
            lines_changed: rec.lines_changed,
            comments_added: rec.comments_added,
        }
    }
}

impl MetricRow {
    fn into_record(self) -> Result<MetricRecord> {
        let first_review = match (
            self.first_reviewed_at.as_str(),
            self.first_reviewed_by.as_str(),
        ) {
            (NO_REVIEW, NO_REVIEW) => None,
            (NO_REVIEW, _) | (_, NO_REVIEW) => anyhow::bail!(
                "PR #{} has only one of first_reviewed_at/first_reviewed_by set",
                self.number
            ),
            (at, by) => Some(FirstReview {
                reviewed_at: parse_timestamp("first_reviewed_at", at)?,
                reviewed_by: by.to_string(),
            }),
        };

        Ok(MetricRecord {
            created_at: parse_timestamp("created_at", &self.created_at)?,
            merged_at: parse_timestamp("merged_at", &self.merged_at)?,
            title: self.title,
            number: self.number,
            url: self.url,
            created_by: self.created_by,
            first_review,
            cycle_time_minutes: self.cycle_time_minutes,
            lead_time_minutes: self.lead_time_minutes,
            lines_changed: self.lines_changed,
            comments_added: self.comments_added,
        })
    }
}

/// Write records to a CSV file atomically, replacing any existing file.
///
/// The header is always written, even for an empty record set.
/// Missing parent directories are created.
pub fn write_records(path: &Path, records: &[MetricRecord]) -> Result<()> {
    // A bare file name has an empty parent; anchor it to the working directory
    let target = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            path.to_path_buf()
        }
        _ => Path::new(".").join(path),
    };

    let file = AtomicWriteFile::open(&target)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    // serde only emits a header with the first row
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(HEADER)?;
    for record in records {
        writer
            .serialize(MetricRow::from(record))
            .with_context(|| format!("Failed to serialize PR #{}", record.number))?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}

/// Read records back from a CSV file written by `write_records`.
pub fn read_records(path: &Path) -> Result<Vec<MetricRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    reader
        .deserialize::<MetricRow>()
        .enumerate()
        .map(|(idx, row)| {
            // +2: one for the header, one for 1-based line numbers
            let line = idx + 2;
            let row = row.with_context(|| format!("{}:{}: invalid row", path.display(), line))?;
            row.into_record()
                .with_context(|| format!("{}:{}: invalid row", path.display(), line))
        })
        .collect()
}

const HEADER: [&str; 12] = [
    "title",
    "number",
    "url",
    "created_by",
    "created_at",
    "first_reviewed_at",
    "first_reviewed_by",
    "merged_at",
    "cycle_time_minutes",
    "lead_time_minutes",
    "lines_changed",
    "comments_added",
];
