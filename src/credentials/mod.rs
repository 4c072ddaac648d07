use thiserror::Error;
use tracing::debug;

/// Environment variable checked first for a GitHub token
pub const ENV_TOKEN_VAR: &str = "REVIEW_METRICS_GH_TOKEN";

/// Fallback environment variable, as set by GitHub Actions and `gh`
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialError {
    #[error("No GitHub token found. Pass --token or set REVIEW_METRICS_GH_TOKEN or GITHUB_TOKEN")]
    TokenNotFound,
}

/// Read a token from an environment variable.
/// Returns Some(token) if the variable is set and non-blank, None otherwise.
fn token_from_env(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(val) => non_blank(&val),
        Err(_) => None,
    }
}

fn non_blank(val: &str) -> Option<String> {
    let trimmed = val.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Resolve the GitHub token: the `--token` value first, then
/// `REVIEW_METRICS_GH_TOKEN`, then `GITHUB_TOKEN`. Blank values are skipped.
pub fn resolve_token(flag: Option<&str>) -> Result<String, CredentialError> {
    if let Some(token) = flag.and_then(non_blank) {
        debug!("Using token from --token");
        return Ok(token);
    }

    for var in [ENV_TOKEN_VAR, GITHUB_TOKEN_VAR] {
        if let Some(token) = token_from_env(var) {
            debug!("Using token from {}", var);
            return Ok(token);
        }
    }

    Err(CredentialError::TokenNotFound)
}
