//! Rule configuration: parameters, bands, and exit conditions.

use serde::{Deserialize, Serialize};

/// Sub-rule reference reserved for the unsuccessful-transaction exit path.
pub const UNSUCCESSFUL_EXIT_REF: &str = ".x00";

/// Baseline window multiple applied when `baselineQueryRange` is unset.
pub const DEFAULT_BASELINE_FACTOR: u64 = 5;

/// Surge multiplier applied when `surgeThresholdMultiplier` is unset.
pub const DEFAULT_SURGE_MULTIPLIER: f64 = 2.0;

/// Per-rule configuration document handed in by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleConfig {
    pub id: String,
    pub cfg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub config: RuleConfigBody,
}

/// Body of a rule configuration.
///
/// Sections stay optional at the type level so evaluation can report which
/// one is missing instead of failing deserialization wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleConfigBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
    #[serde(rename = "exitConditions", default, skip_serializing_if = "Option::is_none")]
    pub exit_conditions: Option<Vec<ExitCondition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bands: Option<Vec<Band>>,
}

impl RuleConfigBody {
    /// Look up an exit condition by sub-rule reference.
    pub fn exit_condition(&self, sub_rule_ref: &str) -> Option<&ExitCondition> {
        self.exit_conditions
            .as_ref()?
            .iter()
            .find(|c| c.sub_rule_ref == sub_rule_ref)
    }

    /// Bands, or `None` when absent or empty.
    pub fn bands(&self) -> Option<&[Band]> {
        self.bands.as_deref().filter(|b| !b.is_empty())
    }
}

/// Surge rule parameters. Ranges are milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Parameters {
    #[serde(rename = "maxQueryRange", default, skip_serializing_if = "Option::is_none")]
    pub max_query_range: Option<u64>,
    #[serde(rename = "baselineQueryRange", default, skip_serializing_if = "Option::is_none")]
    pub baseline_query_range: Option<u64>,
    #[serde(
        rename = "surgeThresholdMultiplier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub surge_threshold_multiplier: Option<f64>,
}

impl Parameters {
    /// `maxQueryRange` when present and non-zero.
    pub fn max_range(&self) -> Option<u64> {
        self.max_query_range.filter(|r| *r > 0)
    }

    /// `baselineQueryRange`, or `max_range × 5` when absent or zero.
    pub fn baseline_range(&self, max_range: u64) -> u64 {
        match self.baseline_query_range {
            Some(range) if range > 0 => range,
            _ => max_range.saturating_mul(DEFAULT_BASELINE_FACTOR),
        }
    }

    /// `surgeThresholdMultiplier`, or `2` when absent or zero.
    pub fn multiplier(&self) -> f64 {
        match self.surge_threshold_multiplier {
            Some(m) if m != 0.0 && !m.is_nan() => m,
            _ => DEFAULT_SURGE_MULTIPLIER,
        }
    }
}

/// Numeric band mapped to a sub-rule outcome. Lower bound inclusive,
/// upper bound exclusive; an absent bound is unbounded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Band {
    #[serde(rename = "subRuleRef")]
    pub sub_rule_ref: String,
    #[serde(rename = "lowerLimit", default, skip_serializing_if = "Option::is_none")]
    pub lower_limit: Option<f64>,
    #[serde(rename = "upperLimit", default, skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<f64>,
    pub reason: String,
}

impl Band {
    pub fn contains(&self, value: f64) -> bool {
        self.lower_limit.map_or(true, |lo| value >= lo)
            && self.upper_limit.map_or(true, |hi| value < hi)
    }
}

/// Predefined terminal outcome returned without further computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExitCondition {
    #[serde(rename = "subRuleRef")]
    pub sub_rule_ref: String,
    pub reason: String,
}
