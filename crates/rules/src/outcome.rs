//! Outcome resolution: mapping a rule's computed value onto its bands.

use crate::error::{Result, RuleError};
use crate::schema::{RuleConfig, RuleResult};

/// Turns a computed value into the final rule result.
///
/// Evaluation hands over its value and the partial result and returns
/// whatever the resolver produces. Any `Fn(f64, &RuleConfig, RuleResult)`
/// closure with the right return type is a resolver.
pub trait OutcomeResolver: Send + Sync {
    fn resolve(&self, value: f64, config: &RuleConfig, partial: RuleResult) -> Result<RuleResult>;
}

impl<F> OutcomeResolver for F
where
    F: Fn(f64, &RuleConfig, RuleResult) -> Result<RuleResult> + Send + Sync,
{
    fn resolve(&self, value: f64, config: &RuleConfig, partial: RuleResult) -> Result<RuleResult> {
        self(value, config, partial)
    }
}

/// Standard resolver: first band whose half-open range contains the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandOutcomeResolver;

impl OutcomeResolver for BandOutcomeResolver {
    fn resolve(&self, value: f64, config: &RuleConfig, partial: RuleResult) -> Result<RuleResult> {
        let bands = config.config.bands().ok_or(RuleError::MissingBands)?;
        let band = bands
            .iter()
            .find(|b| b.contains(value))
            .ok_or(RuleError::NoMatchingBand(value))?;
        Ok(partial.with_band(band, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Band, RuleConfigBody};

    fn config_with_bands(bands: Vec<Band>) -> RuleConfig {
        RuleConfig {
            id: "surge-rule".into(),
            cfg: "1.0.0".into(),
            desc: None,
            config: RuleConfigBody {
                bands: Some(bands),
                ..RuleConfigBody::default()
            },
        }
    }

    fn band(sub_rule_ref: &str, lower: Option<f64>, upper: Option<f64>) -> Band {
        Band {
            sub_rule_ref: sub_rule_ref.into(),
            lower_limit: lower,
            upper_limit: upper,
            reason: format!("band {sub_rule_ref}"),
        }
    }

    #[test]
    fn picks_band_for_binary_score() {
        let config = config_with_bands(vec![
            band(".01", None, Some(1.0)),
            band(".02", Some(1.0), None),
        ]);
        let partial = RuleResult::for_rule(&config);

        let normal = BandOutcomeResolver.resolve(0.0, &config, partial.clone()).unwrap();
        assert_eq!(normal.sub_rule_ref, ".01");
        assert_eq!(normal.indpdnt_varbl, Some(0.0));

        let surge = BandOutcomeResolver.resolve(1.0, &config, partial).unwrap();
        assert_eq!(surge.sub_rule_ref, ".02");
        assert_eq!(surge.reason, "band .02");
        assert_eq!(surge.id, "surge-rule");
    }

    #[test]
    fn gap_between_bands_is_an_error() {
        let config = config_with_bands(vec![
            band(".01", None, Some(1.0)),
            band(".02", Some(2.0), None),
        ]);
        let err = BandOutcomeResolver
            .resolve(1.5, &config, RuleResult::for_rule(&config))
            .unwrap_err();
        assert!(matches!(err, RuleError::NoMatchingBand(v) if v == 1.5));
    }

    #[test]
    fn empty_bands_are_rejected() {
        let config = config_with_bands(vec![]);
        let err = BandOutcomeResolver
            .resolve(0.0, &config, RuleResult::default())
            .unwrap_err();
        assert!(matches!(err, RuleError::MissingBands));
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |value: f64, _: &RuleConfig, mut partial: RuleResult| -> Result<RuleResult> {
            partial.reason = format!("scored {value}");
            Ok(partial)
        };
        let config = config_with_bands(vec![]);
        let out = resolver.resolve(1.0, &config, RuleResult::default()).unwrap();
        assert_eq!(out.reason, "scored 1");
    }
}
