use std::collections::BTreeMap;

use crate::github::Issue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Bug,
    Feature,
    #[serde(alias = "pull_request", alias = "pr")]
    PullRequest,
}

impl Category {
    pub fn section_label(self) -> &'static str {
        match self {
            Category::Bug => "Fixed bugs",
            Category::Feature => "Implemented enhancements",
            Category::PullRequest => "Merged pull requests",
        }
    }
}

/// Label names accepted for a category. Leaves are aliases; lists and tables
/// nest to any depth and are searched depth first. Table keys only name a
/// group and never match a label themselves.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum LabelRule {
    Alias(String),
    AnyOf(Vec<LabelRule>),
    Group(BTreeMap<String, LabelRule>),
}

impl LabelRule {
    fn matches(&self, label: &str) -> bool {
        match self {
            LabelRule::Alias(alias) => alias.to_lowercase() == label,
            LabelRule::AnyOf(rules) => rules.iter().any(|rule| rule.matches(label)),
            LabelRule::Group(rules) => rules.values().any(|rule| rule.matches(label)),
        }
    }
}

impl From<&str> for LabelRule {
    fn from(alias: &str) -> Self {
        LabelRule::Alias(alias.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPolicy {
    rules: BTreeMap<Category, LabelRule>,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self::new(BTreeMap::from([
            (Category::Bug, LabelRule::AnyOf(vec!["bug".into()])),
            (
                Category::Feature,
                LabelRule::AnyOf(vec!["enhancement".into(), "feature".into()]),
            ),
        ]))
    }
}

impl LabelPolicy {
    pub fn new(rules: BTreeMap<Category, LabelRule>) -> Self {
        Self { rules }
    }

    /// The first label (in the issue's order) that any category accepts
    /// decides; within one label, categories are tried bug, feature, pull
    /// request. Comparison ignores case.
    pub fn classify<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Option<Category> {
        labels.into_iter().find_map(|label| {
            let label = label.to_lowercase();
            self.rules
                .iter()
                .find(|(_, rule)| rule.matches(&label))
                .map(|(category, _)| *category)
        })
    }

    /// Falls back to the pull request category when no label matches but
    /// GitHub marks the issue as a pull request.
    pub(crate) fn categorize(&self, issue: &Issue) -> Option<Category> {
        self.classify(issue.label_names())
            .or_else(|| issue.is_pull_request().then_some(Category::PullRequest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{Label, PullRequestRef};

    fn issue(labels: &[&str], pull_request: bool) -> Issue {
        Issue {
            number: 1,
            title: "t".to_string(),
            html_url: "https://example.test/1".to_string(),
            labels: labels
                .iter()
                .map(|name| Label {
                    name: name.to_string(),
                })
                .collect(),
            closed_at: None,
            pull_request: pull_request.then(PullRequestRef::default),
        }
    }

    #[test]
    fn default_policy_maps_bug_and_feature_labels() {
        let policy = LabelPolicy::default();
        assert_eq!(policy.classify(["bug"]), Some(Category::Bug));
        assert_eq!(policy.classify(["enhancement"]), Some(Category::Feature));
        assert_eq!(policy.classify(["feature"]), Some(Category::Feature));
        assert_eq!(policy.classify(["question"]), None);
        assert_eq!(policy.classify([] as [&str; 0]), None);
    }

    #[test]
    fn classification_ignores_case() {
        let policy = LabelPolicy::default();
        for label in ["Bug", "bug", "BUG"] {
            assert_eq!(policy.classify([label]), Some(Category::Bug), "{label}");
        }

        let shouting = LabelPolicy::new(BTreeMap::from([(Category::Feature, "FEAT".into())]));
        assert_eq!(shouting.classify(["feat"]), Some(Category::Feature));
    }

    #[test]
    fn first_listed_label_wins() {
        let policy = LabelPolicy::default();
        assert_eq!(policy.classify(["feature", "bug"]), Some(Category::Feature));
        assert_eq!(policy.classify(["bug", "feature"]), Some(Category::Bug));
        assert_eq!(policy.classify(["wontfix", "feature"]), Some(Category::Feature));
    }

    #[test]
    fn nested_groups_resolve_at_any_depth() {
        let policy: BTreeMap<Category, LabelRule> = toml::from_str(
            r#"
            bug = ["bug", { crash = "crash", regressions = { old = ["regression", { deep = "REGRESSED" }] } }]
            feature = "enhancement"
            "#,
        )
        .unwrap();
        let policy = LabelPolicy::new(policy);

        assert_eq!(policy.classify(["crash"]), Some(Category::Bug));
        assert_eq!(policy.classify(["regression"]), Some(Category::Bug));
        assert_eq!(policy.classify(["regressed"]), Some(Category::Bug));
        assert_eq!(policy.classify(["Enhancement"]), Some(Category::Feature));
        // group names are not aliases
        assert_eq!(policy.classify(["regressions"]), None);
    }

    #[test]
    fn unlabelled_pull_request_falls_back_to_pull_request_category() {
        let policy = LabelPolicy::default();
        assert_eq!(
            policy.categorize(&issue(&[], true)),
            Some(Category::PullRequest)
        );
        assert_eq!(policy.categorize(&issue(&[], false)), None);
    }

    #[test]
    fn labelled_pull_request_keeps_its_label_category() {
        let policy = LabelPolicy::default();
        assert_eq!(policy.categorize(&issue(&["bug"], true)), Some(Category::Bug));
    }

    #[test]
    fn category_keys_accept_aliases() {
        for source in [
            "pull-request = \"dependencies\"",
            "pull_request = \"dependencies\"",
            "pr = \"dependencies\"",
        ] {
            let rules: BTreeMap<Category, LabelRule> = toml::from_str(source).unwrap();
            let policy = LabelPolicy::new(rules);
            assert_eq!(
                policy.classify(["Dependencies"]),
                Some(Category::PullRequest),
                "{source}"
            );
        }
    }
}
