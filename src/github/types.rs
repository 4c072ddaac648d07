use serde::Deserialize;

/// A merged pull request as returned by the search, flattened out of the
/// GraphQL edge/node envelope.
///
/// Every field is optional: the search also returns issues, whose node
/// carries none of the pull request fields. Timestamps are kept as the text
/// the API sent. Missing fields and bad timestamps surface during metric
/// derivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPullRequest {
    pub title: Option<String>,
    pub number: Option<u64>,
    pub repository: Option<String>, // "owner/repo" format
    pub total_comment_count: Option<u64>,
    pub reviews: Vec<Review>,       // At most one, in API order
    pub created_at: Option<String>,
    pub created_by: Option<String>, // None when the author account is gone
    pub merged_at: Option<String>,
    pub url: Option<String>,
    pub additions: Option<u64>,
    pub deletions: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub reviewed_at: Option<String>, // None for pending reviews
    pub reviewed_by: Option<String>,
}

impl RawPullRequest {
    /// Return a short reference in the format "owner/repo#123"
    pub fn short_ref(&self) -> String {
        let number = self
            .number
            .map_or_else(|| "?".to_string(), |n| n.to_string());
        format!("{}#{}", self.repository.as_deref().unwrap_or("?"), number)
    }
}

/// Top-level GraphQL response body
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: SearchConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConnection {
    pub issue_count: u64,
    #[serde(default)]
    pub edges: Vec<Edge<PullRequestNode>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

/// Search result node. Issue matches deserialize as an empty object, so
/// nothing here is required.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullRequestNode {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub repository: Option<RepositoryRef>,
    pub comments: Option<TotalCount>,
    pub reviews: Option<Connection<ReviewNode>>,
    pub created_at: Option<String>,
    pub created_by: Option<Actor>,
    pub merged_at: Option<String>,
    pub url: Option<String>,
    pub additions: Option<u64>,
    pub deletions: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRef {
    pub name_with_owner: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewNode {
    pub reviewed_at: Option<String>,
    pub reviewed_by: Option<Actor>,
}

#[derive(Debug, Deserialize)]
pub struct Actor {
    pub login: String,
}

impl From<PullRequestNode> for RawPullRequest {
    fn from(node: PullRequestNode) -> Self {
        let reviews = node
            .reviews
            .map(|conn| {
                conn.edges
                    .into_iter()
                    .map(|edge| Review {
                        reviewed_at: edge.node.reviewed_at,
                        reviewed_by: edge.node.reviewed_by.map(|a| a.login),
                    })
                    .collect()
            })
            .unwrap_or_default();

        RawPullRequest {
            title: node.title,
            number: node.number,
            repository: node.repository.map(|r| r.name_with_owner),
            total_comment_count: node.comments.map(|c| c.total_count),
            reviews,
            created_at: node.created_at,
            created_by: node.created_by.map(|a| a.login),
            merged_at: node.merged_at,
            url: node.url,
            additions: node.additions,
            deletions: node.deletions,
        }
    }
}

impl SearchConnection {
    /// Unwrap the edge/node envelope, keeping API order
    pub fn into_pull_requests(self) -> Vec<RawPullRequest> {
        self.edges
            .into_iter()
            .map(|edge| RawPullRequest::from(edge.node))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
      "data": {
        "search": {
          "issueCount": 2,
          "edges": [
            {
              "node": {
                "number": 7,
                "title": "Add retries",
                "repository": { "nameWithOwner": "acme/widgets" },
                "comments": { "totalCount": 3 },
                "reviews": {
                  "edges": [
                    { "node": { "reviewedAt": "2024-01-01T00:45:00Z", "reviewedBy": { "login": "alice" } } }
                  ]
                },
                "createdAt": "2024-01-01T00:00:00Z",
                "createdBy": { "login": "bob" },
                "mergedAt": "2024-01-01T01:30:00Z",
                "url": "https://github.com/acme/widgets/pull/7",
                "changedFiles": 2,
                "additions": 10,
                "deletions": 5
              }
            },
            {
              "node": {
                "number": 8,
                "title": "Bump deps",
                "repository": { "nameWithOwner": "acme/widgets" },
                "comments": { "totalCount": 0 },
                "reviews": { "edges": [] },
                "createdAt": "2024-01-02T00:00:00Z",
                "createdBy": null,
                "mergedAt": "2024-01-02T00:10:00Z",
                "url": "https://github.com/acme/widgets/pull/8",
                "changedFiles": 1,
                "additions": 1,
                "deletions": 1
              }
            }
          ]
        }
      }
    }"#;

    #[test]
    fn test_unwrap_envelope() {
        let response: GraphQlResponse<SearchData> = serde_json::from_str(SAMPLE).unwrap();
        assert!(response.errors.is_empty());

        let search = response.data.unwrap().search;
        assert_eq!(search.issue_count, 2);

        let prs = search.into_pull_requests();
        assert_eq!(prs.len(), 2);

        let first = &prs[0];
        assert_eq!(first.number, Some(7));
        assert_eq!(first.repository.as_deref(), Some("acme/widgets"));
        assert_eq!(first.total_comment_count, Some(3));
        assert_eq!(first.created_by.as_deref(), Some("bob"));
        assert_eq!(
            first.reviews,
            vec![Review {
                reviewed_at: Some("2024-01-01T00:45:00Z".to_string()),
                reviewed_by: Some("alice".to_string()),
            }]
        );
        assert_eq!(first.short_ref(), "acme/widgets#7");
    }

    #[test]
    fn test_null_author_and_empty_reviews() {
        let response: GraphQlResponse<SearchData> = serde_json::from_str(SAMPLE).unwrap();
        let prs = response.data.unwrap().search.into_pull_requests();

        let second = &prs[1];
        assert_eq!(second.created_by, None);
        assert!(second.reviews.is_empty());
    }

    #[test]
    fn test_missing_reviews_connection() {
        let json = r#"{
            "number": 1,
            "title": "t",
            "repository": { "nameWithOwner": "o/r" },
            "comments": { "totalCount": 0 },
            "createdAt": "2024-01-01T00:00:00Z",
            "createdBy": { "login": "x" },
            "mergedAt": null,
            "url": "u",
            "additions": 0,
            "deletions": 0
        }"#;
        let node: PullRequestNode = serde_json::from_str(json).unwrap();
        let pr = RawPullRequest::from(node);
        assert!(pr.reviews.is_empty());
        assert_eq!(pr.merged_at, None);
    }

    #[test]
    fn test_issue_node_deserializes_empty() {
        let json = r#"{ "issueCount": 1, "edges": [ { "node": {} } ] }"#;
        let search: SearchConnection = serde_json::from_str(json).unwrap();
        let prs = search.into_pull_requests();

        assert_eq!(prs, vec![RawPullRequest::default()]);
        assert_eq!(prs[0].short_ref(), "?#?");
    }

    #[test]
    fn test_review_connection_without_edges() {
        let json = r#"{ "reviews": {} }"#;
        let node: PullRequestNode = serde_json::from_str(json).unwrap();
        assert!(RawPullRequest::from(node).reviews.is_empty());
    }

    #[test]
    fn test_errors_without_data() {
        let json = r#"{ "data": null, "errors": [ { "message": "Something went wrong" } ] }"#;
        let response: GraphQlResponse<SearchData> = serde_json::from_str(json).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "Something went wrong");
    }
}
