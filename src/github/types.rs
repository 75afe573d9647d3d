#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub html_url: String,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub draft: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub closed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Present only when the tracker reports the issue as a pull request.
    pub pull_request: Option<PullRequestRef>,
}

impl Issue {
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|label| label.name.as_str())
    }

    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize)]
pub struct PullRequestRef {}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct IssueEvent {
    pub event: String,
    #[serde(default)]
    pub commit_id: Option<String>,
}

impl IssueEvent {
    /// GitHub closes pull requests and merges them through the same state, so
    /// only a merge-like event that points at a commit counts as a merge.
    pub fn is_merge_evidence(&self) -> bool {
        matches!(self.event.as_str(), "merged" | "referenced")
            && self
                .commit_id
                .as_deref()
                .is_some_and(|commit| !commit.trim().is_empty())
    }
}
