//! Rule configuration document parsing.
//!
//! Reads a single rule configuration from a YAML or JSON file or string.
//! JSON is valid YAML, so both go through `serde_yaml`.

mod error;


use std::path::Path;

use crate::schema::RuleConfig;

pub use self::error::{LoadError, Result};

/// Parse a rule configuration from YAML or JSON text.
pub fn parse_rule_config(text: &str) -> Result<RuleConfig> {
    Ok(serde_yaml::from_str(text)?)
}

/// Read and parse a rule configuration file.
pub fn load_rule_config(path: impl AsRef<Path>) -> Result<RuleConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_rule_config(&text)?;
    tracing::debug!(
        path = %path.display(),
        rule_id = %config.id,
        cfg = %config.cfg,
        "loaded rule config"
    );
    Ok(config)
}
