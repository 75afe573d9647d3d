use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::changelog::{Category, LabelPolicy, LabelRule};

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    labels: Option<BTreeMap<Category, LabelRule>>,
}

/// Reads the `[labels]` table from a TOML file. A present table replaces the
/// default policy wholesale.
pub fn load_label_policy(path: Option<&Path>) -> anyhow::Result<LabelPolicy> {
    let Some(path) = path else {
        return Ok(LabelPolicy::default());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read label config {}", path.display()))?;
    parse_label_policy(&source).with_context(|| format!("invalid label config {}", path.display()))
}

fn parse_label_policy(source: &str) -> anyhow::Result<LabelPolicy> {
    let config: ConfigFile = toml::from_str(source)?;
    Ok(config
        .labels
        .map(LabelPolicy::new)
        .unwrap_or_default())
}
