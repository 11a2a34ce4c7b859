use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub evaluator: EvaluatorConfig,
    pub log: LogConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `SURGE_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("SURGE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            evaluator: EvaluatorConfig::from_env_profiled(p),
            log: LogConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  evaluator:   rule={}@{}, query_timeout_ms={}",
            self.evaluator.rule_id,
            self.evaluator.rule_version,
            self.evaluator.query_timeout_ms
        );
        tracing::info!("  log:         filter={}", self.log.filter);
    }
}

// ── Evaluator ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluatorConfig {
    /// Upper bound on each graph query round trip.
    pub query_timeout_ms: u64,
    /// Rule identifier used as the logging context label.
    pub rule_id: String,
    pub rule_version: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: 5000,
            rule_id: "surge".to_string(),
            rule_version: "1.0.0".to_string(),
        }
    }
}

impl EvaluatorConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            query_timeout_ms: profiled_env_u64(p, "SURGE_QUERY_TIMEOUT_MS", defaults.query_timeout_ms),
            rule_id: profiled_env_or(p, "SURGE_RULE_ID", &defaults.rule_id),
            rule_version: profiled_env_or(p, "SURGE_RULE_VERSION", &defaults.rule_version),
        }
    }

    /// `rule_id@rule_version`, the label attached to every log line.
    pub fn context_label(&self) -> String {
        format!("{}@{}", self.rule_id, self.rule_version)
    }
}

// ── Logging ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub filter: String,
}

impl LogConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            filter: profiled_env_or(p, "SURGE_LOG", "info"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluator_defaults() {
        let cfg = EvaluatorConfig::default();
        assert_eq!(cfg.query_timeout_ms, 5000);
        assert_eq!(cfg.context_label(), "surge@1.0.0");
    }

    #[test]
    fn profiled_key_overrides_plain_key() {
        env::set_var("SURGE_RULE_ID", "plain-rule");
        env::set_var("QA9_SURGE_RULE_ID", "profiled-rule");
        env::set_var("QA9_SURGE_QUERY_TIMEOUT_MS", "250");

        let cfg = Config::for_profile("qa9");
        assert_eq!(cfg.profile_label(), "QA9");
        assert_eq!(cfg.evaluator.rule_id, "profiled-rule");
        assert_eq!(cfg.evaluator.query_timeout_ms, 250);

        env::remove_var("SURGE_RULE_ID");
        env::remove_var("QA9_SURGE_RULE_ID");
        env::remove_var("QA9_SURGE_QUERY_TIMEOUT_MS");
    }

    #[test]
    fn unparsable_number_falls_back_to_default() {
        env::set_var("QB7_SURGE_QUERY_TIMEOUT_MS", "soon");
        let cfg = Config::for_profile("QB7");
        assert_eq!(cfg.evaluator.query_timeout_ms, 5000);
        env::remove_var("QB7_SURGE_QUERY_TIMEOUT_MS");
    }
}
