pub mod client;
pub mod query;
pub mod types;

pub use client::{FetchError, GitHubClient, DEFAULT_API_URL};
pub use query::{build_search_query, QueryOptions};
pub use types::{RawPullRequest, Review};
