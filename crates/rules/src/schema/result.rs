//! Rule result accumulator.

use serde::{Deserialize, Serialize};

use super::{Band, ExitCondition, RuleConfig};

/// Rule result owned by the caller. Evaluation fills `subRuleRef` and
/// `reason` (and `indpdntVarbl` on the banded path); any other field the
/// caller populated is carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleResult {
    pub id: String,
    pub cfg: String,
    #[serde(rename = "subRuleRef", default)]
    pub sub_rule_ref: String,
    #[serde(default)]
    pub reason: String,
    #[serde(rename = "indpdntVarbl", default, skip_serializing_if = "Option::is_none")]
    pub indpdnt_varbl: Option<f64>,
    /// Processing time in nanoseconds, set by the orchestrator.
    #[serde(rename = "prcgTm", default, skip_serializing_if = "Option::is_none")]
    pub prcg_tm: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RuleResult {
    /// Empty result seeded with the rule's id and config version.
    pub fn for_rule(config: &RuleConfig) -> Self {
        Self {
            id: config.id.clone(),
            cfg: config.cfg.clone(),
            ..Self::default()
        }
    }

    pub fn with_exit(mut self, exit: &ExitCondition) -> Self {
        self.sub_rule_ref = exit.sub_rule_ref.clone();
        self.reason = exit.reason.clone();
        self
    }

    pub fn with_band(mut self, band: &Band, value: f64) -> Self {
        self.sub_rule_ref = band.sub_rule_ref.clone();
        self.reason = band.reason.clone();
        self.indpdnt_varbl = Some(value);
        self
    }
}
