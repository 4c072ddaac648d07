use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::github::types::RawPullRequest;
use crate::github::{FetchError, GitHubClient};
use crate::metrics::{derive_metrics, MetricRecord, MetricsError};
use crate::output::write_records;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Failed to derive metrics: {0}")]
    Derive(#[from] MetricsError),
    #[error("Failed to write CSV: {0:#}")]
    Export(anyhow::Error),
}

/// Derive metrics for every pull request, keeping order and count.
/// The first failure aborts the run.
pub fn derive_all(prs: &[RawPullRequest]) -> Result<Vec<MetricRecord>, MetricsError> {
    prs.iter().map(derive_metrics).collect()
}

/// Fetch merged pull requests matching `search` and derive their metrics.
pub async fn fetch_metrics(
    client: &GitHubClient,
    search: &str,
) -> Result<Vec<MetricRecord>, PipelineError> {
    info!("Searching: {}", search);
    let prs = client.search_merged_prs(search).await?;
    let records = derive_all(&prs)?;
    info!("Derived metrics for {} pull requests", records.len());
    Ok(records)
}

/// Fetch, derive and write the CSV. Returns the records that were written.
///
/// Nothing touches `path` unless every record derived successfully.
pub async fn export_metrics(
    client: &GitHubClient,
    search: &str,
    path: &Path,
) -> Result<Vec<MetricRecord>, PipelineError> {
    let records = fetch_metrics(client, search).await?;
    write_records(path, &records).map_err(PipelineError::Export)?;
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(records)
}
