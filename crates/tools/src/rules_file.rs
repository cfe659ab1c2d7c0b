use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use game_core::{Rules, SkillCatalog};

/// Reads a TOML rules file; omitted keys keep their defaults.
pub fn load_rules(path: &Path) -> Result<Rules> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file: {}", path.display()))?;
    parse_rules(&raw).with_context(|| format!("Invalid rules file: {}", path.display()))
}

pub fn parse_rules(raw: &str) -> Result<Rules> {
    let rules: Rules = toml::from_str(raw).context("Failed to parse rules TOML")?;
    let problems = rules.validate_for(&SkillCatalog::builtin());
    if !problems.is_empty() {
        bail!("{}", problems.join("; "));
    }
    Ok(rules)
}

pub fn rules_or_default(path: Option<&Path>) -> Result<Rules> {
    match path {
        Some(path) => load_rules(path),
        None => Ok(Rules::default()),
    }
}
