#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("GitHub API request to {url} failed")]
    Api {
        url: String,
        #[source]
        source: octocrab::Error,
    },
    #[error("GitHub API request to {url} returned {status}: {body}")]
    HttpStatus {
        url: String,
        status: http::StatusCode,
        body: String,
    },
    #[error("malformed response from {url}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{owner}/{repo} has no published releases")]
    NoReleases { owner: String, repo: String },
    #[error("request cancelled")]
    Cancelled,
}
