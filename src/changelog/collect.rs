use std::collections::BTreeMap;

use crate::github::prelude::*;

use super::classify::{Category, LabelPolicy};
use super::merge::MergeCheck;

pub type CategorizedIssues = BTreeMap<Category, Vec<Issue>>;

/// The stretch of history a release covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Publish time of the previous release; `None` for the oldest one.
    pub start: Option<chrono::DateTime<chrono::Utc>>,
    /// Publish time of the release itself. Not used to filter issues: anything
    /// closed after the newest release still lands in it.
    pub end: chrono::DateTime<chrono::Utc>,
}

impl Interval {
    fn admits(&self, issue: &Issue) -> bool {
        match self.start {
            None => true,
            Some(start) => issue.closed_at.is_some_and(|closed_at| closed_at > start),
        }
    }
}

/// Closed issues that no release has claimed yet.
#[derive(Debug, Default)]
pub(crate) struct IssuePool {
    issues: Vec<Issue>,
}

impl IssuePool {
    pub(crate) fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub(crate) fn len(&self) -> usize {
        self.issues.len()
    }

    /// Moves every issue the interval admits out of the pool, keeping order.
    fn take_within(&mut self, interval: &Interval) -> Vec<Issue> {
        self.issues
            .extract_if(.., |issue| interval.admits(issue))
            .collect()
    }
}

/// Claims the pool's issues for one release. Claimed issues never return to the
/// pool, including the ones dropped for lacking a category or a merge. Every
/// pull request must be merged to stay, whichever category its labels give it.
pub(crate) async fn collect_issues(
    pool: &mut IssuePool,
    interval: Interval,
    policy: &LabelPolicy,
    merges: &impl MergeCheck,
) -> Result<CategorizedIssues, Error> {
    let candidates = pool.take_within(&interval);
    tracing::debug!(
        start = ?interval.start,
        end = %interval.end,
        candidates = candidates.len(),
        remaining = pool.len(),
        "collecting issues"
    );

    let mut groups = CategorizedIssues::new();
    for issue in candidates {
        let Some(category) = policy.categorize(&issue) else {
            tracing::debug!(number = issue.number, "dropping issue without category");
            continue;
        };
        let needs_merge = issue.is_pull_request() || category == Category::PullRequest;
        if needs_merge && !merges.is_merged(issue.number).await? {
            tracing::debug!(number = issue.number, "dropping unmerged pull request");
            continue;
        }
        groups.entry(category).or_default().push(issue);
    }

    Ok(groups)
}
