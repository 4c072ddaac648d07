use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::chart::theme::Theme;
use crate::github::QueryOptions;

/// Settings from the YAML config file. Every key is optional; command-line
/// values take precedence field by field.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Repository to search, "owner/name"
    pub repo: Option<String>,
    /// Organization to search
    pub org: Option<String>,
    /// Full search string, replaces repo/org
    pub query: Option<String>,
    /// GraphQL endpoint, e.g. for GitHub Enterprise
    pub api_url: Option<String>,
    /// CSV output path
    pub output: Option<PathBuf>,
    pub theme: Option<Theme>,
}

impl Config {
    /// Layer `overrides` on top of `self`: any field set in `overrides` wins.
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            repo: overrides.repo.or(self.repo),
            org: overrides.org.or(self.org),
            query: overrides.query.or(self.query),
            api_url: overrides.api_url.or(self.api_url),
            output: overrides.output.or(self.output),
            theme: overrides.theme.or(self.theme),
        }
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            repository: self.repo.clone(),
            organization: self.org.clone(),
            raw: self.query.clone(),
        }
    }
}
