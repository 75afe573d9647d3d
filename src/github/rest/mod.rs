mod events;
mod issues;
mod releases;

pub(crate) use events::query_issue_events;
pub(crate) use issues::query_closed_issues;
pub(crate) use releases::query_releases;
