mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the config directory path (~/.config/review-metrics/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("review-metrics"))
}

/// Get the default config file path (~/.config/review-metrics/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// With no explicit path the default location is used, and a missing
/// default file yields an empty config.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed or has unknown keys
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => match get_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    parse_config_file(&config_path)
}

fn parse_config_file(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::theme::Theme;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            "repo: acme/widgets\norg: acme\napi_url: https://ghe.example.com/api/graphql\noutput: out/metrics.csv\ntheme: light\n",
        );
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.repo.as_deref(), Some("acme/widgets"));
        assert_eq!(config.org.as_deref(), Some("acme"));
        assert_eq!(config.query, None);
        assert_eq!(
            config.api_url.as_deref(),
            Some("https://ghe.example.com/api/graphql")
        );
        assert_eq!(config.output, Some(PathBuf::from("out/metrics.csv")));
        assert_eq!(config.theme, Some(Theme::Light));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let (_dir, path) = write_config("repo: acme/widgets\ntoken: secret\n");
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = Config {
            repo: Some("acme/widgets".to_string()),
            org: Some("acme".to_string()),
            output: Some(PathBuf::from("file.csv")),
            ..Default::default()
        };
        let cli = Config {
            repo: Some("acme/gadgets".to_string()),
            theme: Some(Theme::Dark),
            ..Default::default()
        };

        let merged = file.merge(cli);
        assert_eq!(merged.repo.as_deref(), Some("acme/gadgets"));
        assert_eq!(merged.org.as_deref(), Some("acme"));
        assert_eq!(merged.output, Some(PathBuf::from("file.csv")));
        assert_eq!(merged.theme, Some(Theme::Dark));
    }

    #[test]
    fn test_query_options() {
        let config = Config {
            repo: Some("acme/widgets".to_string()),
            query: Some("is:pr author:bob".to_string()),
            ..Default::default()
        };
        let options = config.query_options();
        assert_eq!(options.repository.as_deref(), Some("acme/widgets"));
        assert_eq!(options.organization, None);
        assert_eq!(options.raw.as_deref(), Some("is:pr author:bob"));
    }
}
