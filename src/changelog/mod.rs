mod aggregate;
mod classify;
mod collect;
mod merge;

pub use aggregate::{ChangelogRequest, ReleaseNotes, aggregate};
pub use classify::{Category, LabelPolicy, LabelRule};
#[cfg(test)]
pub use collect::{CategorizedIssues, Interval};
