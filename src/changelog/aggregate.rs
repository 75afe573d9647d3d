use crate::github::prelude::*;

use super::classify::LabelPolicy;
use super::collect::{CategorizedIssues, Interval, IssuePool, collect_issues};
use super::merge::{MergeCheck, MergeVerifier};

/// One release heading of the changelog and the issues filed under it.
/// `interval.end` is informational: issues are selected by `interval.start`
/// only, so the newest release also holds anything closed after it shipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNotes {
    pub tag_name: String,
    pub html_url: String,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub interval: Interval,
    pub issues: CategorizedIssues,
}

impl ReleaseNotes {
    pub fn is_empty(&self) -> bool {
        self.issues.values().all(Vec::is_empty)
    }
}

#[derive(Debug, Clone)]
pub struct ChangelogRequest {
    pub owner: String,
    pub repo: String,
    /// Only releases published strictly after this instant get notes.
    pub since: Option<chrono::DateTime<chrono::Utc>>,
}

/// Builds release notes for every published release, newest first.
pub async fn aggregate(
    client: &Client,
    request: &ChangelogRequest,
    policy: &LabelPolicy,
) -> Result<Vec<ReleaseNotes>, Error> {
    let ChangelogRequest { owner, repo, since } = request;

    let releases = published_releases(query_releases(client, owner, repo).await?);
    if releases.is_empty() {
        return Err(Error::NoReleases {
            owner: owner.clone(),
            repo: repo.clone(),
        });
    }

    let mut pool = IssuePool::new(query_closed_issues(client, owner, repo).await?);
    let merges = MergeVerifier::new(client, owner, repo);
    build_notes(&releases, &mut pool, *since, policy, &merges).await
}

/// Drafts have no publish date and cannot bound an interval.
fn published_releases(releases: Vec<Release>) -> Vec<(Release, chrono::DateTime<chrono::Utc>)> {
    releases
        .into_iter()
        .filter_map(|release| match release.published_at {
            Some(published_at) if !release.draft => Some((release, published_at)),
            _ => {
                tracing::debug!(tag = %release.tag_name, "skipping unpublished release");
                None
            }
        })
        .collect()
}

/// Walks `releases` newest first. Each release's interval starts at the next
/// (older) entry's publish time; releases filtered out by `since` still serve
/// as boundaries for their newer neighbour.
async fn build_notes(
    releases: &[(Release, chrono::DateTime<chrono::Utc>)],
    pool: &mut IssuePool,
    since: Option<chrono::DateTime<chrono::Utc>>,
    policy: &LabelPolicy,
    merges: &impl MergeCheck,
) -> Result<Vec<ReleaseNotes>, Error> {
    let mut notes = Vec::new();

    for (index, (release, published_at)) in releases.iter().enumerate() {
        let start = releases
            .get(index + 1)
            .map(|(_, previous_published_at)| *previous_published_at);

        if let Some(since) = since
            && *published_at <= since
        {
            tracing::debug!(tag = %release.tag_name, %since, "release predates --since");
            continue;
        }

        let interval = Interval {
            start,
            end: *published_at,
        };
        let issues = collect_issues(pool, interval, policy, merges).await?;
        tracing::info!(
            tag = %release.tag_name,
            issues = issues.values().map(Vec::len).sum::<usize>(),
            "collected release"
        );

        notes.push(ReleaseNotes {
            tag_name: release.tag_name.clone(),
            html_url: release.html_url.clone(),
            published_at: *published_at,
            interval,
            issues,
        });
    }

    Ok(notes)
}
