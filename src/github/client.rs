use anyhow::Context;
use tokio_util::sync::CancellationToken;

use super::error::Error;

const MAX_PAGES: usize = 1000;
const PER_PAGE: &str = "100";

pub struct Client {
    octocrab: octocrab::Octocrab,
    cancel: CancellationToken,
    max_pages: usize,
}

struct Page {
    body: String,
    next: Option<String>,
}

impl Client {
    pub fn new(host: &str, token: Option<String>) -> anyhow::Result<Self> {
        Self::with_base_uri(&api_base_url(host), token)
    }

    pub fn with_base_uri(base_uri: &str, token: Option<String>) -> anyhow::Result<Self> {
        let octocrab = build_github_client(base_uri, token)?;
        Ok(Self {
            octocrab,
            cancel: CancellationToken::new(),
            max_pages: MAX_PAGES,
        })
    }

    /// Every page request checks `cancel` first and is abandoned if it fires
    /// while the request is in flight.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[cfg(test)]
    fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// GETs `path` starting at page 1 and keeps following the `Link: rel="next"`
    /// header, returning the records of all pages in order.
    pub(crate) async fn fetch_paginated<T>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut url = first_page_url(path, params);
        let mut out = Vec::new();

        for _ in 0..self.max_pages {
            let page = self.fetch_page(&url).await?;
            out.extend(decode_page::<T>(&url, &page.body)?);

            match page.next {
                Some(next) => url = next,
                None => return Ok(out),
            }
        }

        tracing::warn!(path, pages = self.max_pages, "page limit reached, stopping pagination");
        Ok(out)
    }

    async fn fetch_page(&self, url: &str) -> Result<Page, Error> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        tracing::debug!(url, "GET");

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(Error::Cancelled),
            page = self.get(url) => page,
        }
    }

    async fn get(&self, url: &str) -> Result<Page, Error> {
        let api_error = |source| Error::Api {
            url: url.to_string(),
            source,
        };

        let response = self.octocrab._get(url).await.map_err(api_error)?;
        let status = response.status();
        let next = next_page_url(response.headers());
        let body = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(api_error)?;

        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status,
                body,
            });
        }

        Ok(Page { body, next })
    }
}

fn build_github_client(
    base_uri: &str,
    token: Option<String>,
) -> anyhow::Result<octocrab::Octocrab> {
    // Failed requests abort the run instead of being retried.
    let mut builder = octocrab::Octocrab::builder()
        .add_retry_config(octocrab::service::middleware::retry::RetryConfig::None)
        .base_uri(base_uri)
        .context("failed to set base URI")?;
    if let Some(token) = token {
        builder = builder.personal_token(token);
    }
    let client = builder.build().context("failed to build GitHub client")?;
    Ok(client)
}

fn api_base_url(host: &str) -> String {
    if host.eq_ignore_ascii_case("github.com") {
        "https://api.github.com".to_string()
    } else {
        format!("https://{host}/api/v3")
    }
}

fn first_page_url(path: &str, params: &[(&str, &str)]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("page", "1");
    query.append_pair("per_page", PER_PAGE);
    query.extend_pairs(params);
    format!("{path}?{}", query.finish())
}

fn next_page_url(headers: &http::HeaderMap) -> Option<String> {
    let link = headers.get(http::header::LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let (target, params) = entry.trim().split_once(';')?;
        let is_next = params
            .split(';')
            .any(|param| matches!(param.trim(), "rel=\"next\"" | "rel=next"));
        is_next.then(|| {
            target
                .trim()
                .trim_start_matches('<')
                .trim_end_matches('>')
                .to_string()
        })
    })
}

/// An empty body is an empty page; anything else must be a JSON array of `T`.
fn decode_page<T>(url: &str, body: &str) -> Result<Vec<T>, Error>
where
    T: serde::de::DeserializeOwned,
{
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).map_err(|source| Error::MalformedResponse {
        url: url.to_string(),
        source,
    })
}
