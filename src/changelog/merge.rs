use crate::github::prelude::*;

/// Decides whether a pull request that GitHub reports as closed was merged.
pub(crate) trait MergeCheck {
    async fn is_merged(&self, number: u64) -> Result<bool, Error>;
}

pub(crate) struct MergeVerifier<'a> {
    client: &'a Client,
    owner: &'a str,
    repo: &'a str,
}

impl<'a> MergeVerifier<'a> {
    pub(crate) fn new(client: &'a Client, owner: &'a str, repo: &'a str) -> Self {
        Self {
            client,
            owner,
            repo,
        }
    }
}

impl MergeCheck for MergeVerifier<'_> {
    async fn is_merged(&self, number: u64) -> Result<bool, Error> {
        let events = query_issue_events(self.client, self.owner, self.repo, number).await?;
        let merged = events.iter().any(|event| event.is_merge_evidence());
        tracing::debug!(number, events = events.len(), merged, "checked merge events");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn verifier_with_events(number: u64, events: &str) -> (MockServer, Client) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/repos/o/r/issues/{number}/events")))
            .respond_with(ResponseTemplate::new(200).set_body_string(events))
            .mount(&server)
            .await;
        let client = Client::with_base_uri(&server.uri(), None).unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn merged_event_with_commit_counts() {
        let (_server, client) = verifier_with_events(
            12,
            r#"[{"event": "labeled"}, {"event": "merged", "commit_id": "9f2c1e"}, {"event": "closed", "commit_id": null}]"#,
        )
        .await;

        let verifier = MergeVerifier::new(&client, "o", "r");
        assert!(verifier.is_merged(12).await.unwrap());
    }

    #[tokio::test]
    async fn referenced_event_without_commit_does_not_count() {
        let (_server, client) = verifier_with_events(
            13,
            r#"[{"event": "referenced", "commit_id": null}, {"event": "closed"}]"#,
        )
        .await;

        let verifier = MergeVerifier::new(&client, "o", "r");
        assert!(!verifier.is_merged(13).await.unwrap());
    }

    #[tokio::test]
    async fn no_events_means_not_merged() {
        let (_server, client) = verifier_with_events(14, "[]").await;

        let verifier = MergeVerifier::new(&client, "o", "r");
        assert!(!verifier.is_merged(14).await.unwrap());
    }

    #[tokio::test]
    async fn cancelled_client_stops_before_fetching_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&server)
            .await;
        let cancel = CancellationToken::new();
        cancel.cancel();
        let client = Client::with_base_uri(&server.uri(), None)
            .unwrap()
            .with_cancellation(cancel);

        let verifier = MergeVerifier::new(&client, "o", "r");
        let err = verifier.is_merged(12).await.unwrap_err();

        assert!(matches!(err, Error::Cancelled));
    }
}
