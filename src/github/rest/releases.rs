use crate::github::{Client, Error, Release};

/// Newest first, in the order GitHub returns them.
pub(crate) async fn query_releases(
    client: &Client,
    owner: &str,
    repo: &str,
) -> Result<Vec<Release>, Error> {
    let path = format!("/repos/{owner}/{repo}/releases");
    let releases: Vec<Release> = client.fetch_paginated(&path, &[]).await?;
    tracing::debug!(owner, repo, count = releases.len(), "fetched releases");
    Ok(releases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn query_releases_keeps_source_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/releases"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"tag_name": "v2.0", "html_url": "https://github.com/o/r/releases/v2.0", "published_at": "2024-03-01T00:00:00Z"},
                    {"tag_name": "v1.0", "html_url": "https://github.com/o/r/releases/v1.0", "published_at": "2024-01-01T00:00:00Z"}
                ]"#,
            ))
            .mount(&server)
            .await;

        let client = Client::with_base_uri(&server.uri(), None).unwrap();
        let releases = query_releases(&client, "o", "r").await.unwrap();

        let tags: Vec<&str> = releases.iter().map(|r| r.tag_name.as_str()).collect();
        assert_eq!(tags, vec!["v2.0", "v1.0"]);
    }
}
