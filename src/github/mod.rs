mod auth;
mod client;
mod error;
mod rest;
mod types;

pub use auth::fetch_token;
pub use client::Client;
pub use error::Error;
pub use types::{Issue, IssueEvent, Release};
#[cfg(test)]
pub use types::{Label, PullRequestRef};
pub(crate) use rest::{query_closed_issues, query_issue_events, query_releases};

pub(crate) mod prelude {
    pub use super::{Client, Error, Issue, Release};
    pub(crate) use super::{query_closed_issues, query_issue_events, query_releases};
}
