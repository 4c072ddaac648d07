/// Maximum number of pull requests requested from the search (newest first).
/// The search is a single request; results beyond this are not fetched.
pub const SEARCH_LIMIT: u32 = 100;

const MERGED_PRS: &str = "is:merged is:pr";

/// GraphQL document for the merged pull request search.
///
/// The search string and limit are passed as variables so caller input is
/// never spliced into the document.
pub const SEARCH_DOCUMENT: &str = r#"query($searchQuery: String!, $limit: Int!) {
  search(query: $searchQuery, type: ISSUE, last: $limit) {
    issueCount
    edges {
      node {
        ... on PullRequest {
          number
          title
          repository {
            nameWithOwner
          }
          comments {
            totalCount
          }
          reviews(first: 1) {
            edges {
              node {
                ... on PullRequestReview {
                  reviewedAt: publishedAt
                  reviewedBy: author {
                    login
                  }
                }
              }
            }
          }
          createdAt
          createdBy: author {
            login
          }
          mergedAt
          url
          changedFiles
          additions
          deletions
        }
      }
    }
  }
}"#;

/// Which merged pull requests to search for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Repository in "owner/name" form
    pub repository: Option<String>,
    /// Organization or user login
    pub organization: Option<String>,
    /// Complete search string; replaces the repository/organization scoping
    pub raw: Option<String>,
}

/// Build the GitHub search string for the given options.
///
/// A non-blank raw query is used as-is. Otherwise the merged pull request
/// qualifiers are followed by `repo:` and `org:` when set.
pub fn build_search_query(options: &QueryOptions) -> String {
    if let Some(raw) = non_blank(&options.raw) {
        return raw.to_string();
    }

    let mut parts = vec![MERGED_PRS.to_string()];
    if let Some(repo) = non_blank(&options.repository) {
        parts.push(format!("repo:{}", repo));
    }
    if let Some(org) = non_blank(&options.organization) {
        parts.push(format!("org:{}", org));
    }
    parts.join(" ")
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
