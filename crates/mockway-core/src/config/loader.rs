//! Loading rule files from a path or glob pattern.

use crate::config::error::ConfigError;
use crate::config::parser::parse_config;
use crate::config::rule::RuleConfig;
use crate::types::rule::MockRule;
use std::path::{Path, PathBuf};

/// Expand `pattern` into the rule files it names, in sorted path order.
pub fn resolve_rule_files(pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(ConfigError::NoFilesMatched(pattern.to_string()));
    }

    files.sort();
    Ok(files)
}

/// Read and validate every rule in a single file, keeping declaration order.
pub fn load_rule_file(path: &Path) -> Result<Vec<MockRule>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let configs: Vec<RuleConfig> =
        parse_config(&content, path).map_err(|e| e.in_file(path))?;

    configs
        .into_iter()
        .map(|config| MockRule::try_from(config).map_err(|e| e.in_file(path)))
        .collect()
}

/// Load all rules named by `pattern`.
///
/// Files are concatenated in sorted path order, so a rule's position in the
/// resulting table is its file's position followed by its position in the file.
pub fn load_rules(pattern: &str) -> Result<Vec<MockRule>, ConfigError> {
    let mut rules = Vec::new();
    for file in resolve_rule_files(pattern)? {
        rules.extend(load_rule_file(&file)?);
    }
    Ok(rules)
}
