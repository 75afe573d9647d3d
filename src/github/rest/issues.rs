use crate::github::{Client, Error, Issue};

/// Closed issues and pull requests alike; GitHub's issue listing includes both.
pub(crate) async fn query_closed_issues(
    client: &Client,
    owner: &str,
    repo: &str,
) -> Result<Vec<Issue>, Error> {
    let path = format!("/repos/{owner}/{repo}/issues");
    let issues: Vec<Issue> = client
        .fetch_paginated(&path, &[("state", "closed")])
        .await?;
    tracing::debug!(owner, repo, count = issues.len(), "fetched closed issues");
    Ok(issues)
}
