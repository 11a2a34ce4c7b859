//! Surge decision arithmetic.

use crate::error::{Result, RuleError, Window};

/// Current and baseline window lengths in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryWindows {
    pub max_range: u64,
    pub baseline_range: u64,
}

impl QueryWindows {
    /// How many current-sized windows fit in the baseline window.
    pub fn scaling_factor(&self) -> f64 {
        self.baseline_range as f64 / self.max_range as f64
    }
}

/// Outcome of comparing the current window against the normalized baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurgeDecision {
    /// Baseline count scaled down to one current-sized window.
    pub baseline_count: f64,
    pub current_count: f64,
    pub multiplier: f64,
    pub is_surge: bool,
}

impl SurgeDecision {
    pub fn threshold(&self) -> f64 {
        self.baseline_count * self.multiplier
    }

    /// Binary score handed to the outcome resolver.
    pub fn score(&self) -> f64 {
        if self.is_surge { 1.0 } else { 0.0 }
    }
}

/// Normalize the raw baseline to one current window.
pub fn normalized_baseline(raw_baseline: f64, windows: QueryWindows) -> Result<f64> {
    let baseline = raw_baseline / windows.scaling_factor();
    if !baseline.is_finite() {
        return Err(RuleError::NotNumeric {
            window: Window::Baseline,
            value: baseline.to_string(),
        });
    }
    Ok(baseline)
}

/// A surge is strictly more than `baseline × multiplier`.
pub fn decide(baseline_count: f64, current_count: f64, multiplier: f64) -> SurgeDecision {
    SurgeDecision {
        baseline_count,
        current_count,
        multiplier,
        is_surge: current_count > baseline_count * multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: QueryWindows = QueryWindows {
        max_range: 3600,
        baseline_range: 18_000,
    };

    #[test]
    fn default_baseline_divides_by_five() {
        assert_eq!(HOUR.scaling_factor(), 5.0);
        assert_eq!(normalized_baseline(50.0, HOUR).unwrap(), 10.0);
    }

    #[test]
    fn normalization_is_scale_invariant() {
        let doubled = QueryWindows {
            max_range: 3600,
            baseline_range: 36_000,
        };
        assert_eq!(
            normalized_baseline(50.0, HOUR).unwrap(),
            normalized_baseline(100.0, doubled).unwrap()
        );
    }

    #[test]
    fn normalization_is_linear() {
        let one = normalized_baseline(7.0, HOUR).unwrap();
        let three = normalized_baseline(21.0, HOUR).unwrap();
        assert!((three - 3.0 * one).abs() < 1e-12);
    }

    #[test]
    fn degenerate_windows_are_type_errors() {
        let broken = QueryWindows {
            max_range: 0,
            baseline_range: 0,
        };
        assert!(matches!(
            normalized_baseline(10.0, broken),
            Err(RuleError::NotNumeric { .. })
        ));
    }

    #[test]
    fn surge_above_threshold() {
        let d = decide(10.0, 25.0, 2.0);
        assert!(d.is_surge);
        assert_eq!(d.threshold(), 20.0);
        assert_eq!(d.score(), 1.0);
    }

    #[test]
    fn below_threshold_is_normal() {
        let d = decide(10.0, 15.0, 2.0);
        assert!(!d.is_surge);
        assert_eq!(d.score(), 0.0);
    }

    #[test]
    fn equality_is_not_a_surge() {
        assert!(!decide(10.0, 20.0, 2.0).is_surge);
    }

    #[test]
    fn zero_baseline_surges_on_any_activity() {
        assert!(!decide(0.0, 0.0, 2.0).is_surge);
        assert!(decide(0.0, 1.0, 2.0).is_surge);
    }

    #[test]
    fn surge_is_monotonic_in_current_count() {
        let mut surged = false;
        for current in 0..100 {
            let d = decide(10.0, current as f64, 2.0);
            assert!(!(surged && !d.is_surge), "surge flipped back at {current}");
            surged |= d.is_surge;
        }
        assert!(surged);
    }
}
