use crate::github::{Client, Error, IssueEvent};

pub(crate) async fn query_issue_events(
    client: &Client,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<Vec<IssueEvent>, Error> {
    let path = format!("/repos/{owner}/{repo}/issues/{number}/events");
    client.fetch_paginated(&path, &[]).await
}
