//! Extracting transaction counts from raw query rows.

use serde_json::Value;
use surge_core::QueryRows;

use crate::error::{Result, RuleError, Window};

/// Baseline aggregate: exactly one row, holding the count itself.
pub(super) fn baseline_count(rows: &QueryRows) -> Result<f64> {
    let value = match rows.as_slice() {
        [] => return Err(RuleError::unavailable(Window::Baseline, "query returned no rows")),
        [value] => value,
        _ => {
            return Err(RuleError::NotNumeric {
                window: Window::Baseline,
                value: Value::Array(rows.clone()).to_string(),
            })
        }
    };
    if value.is_null() {
        return Err(RuleError::unavailable(Window::Baseline, "count row is null"));
    }
    as_count(Window::Baseline, value)
}

/// Current-window aggregate: the first row is unwrapped one level when it
/// arrives as a nested row (`[[n]]`).
pub(super) fn current_count(rows: &QueryRows) -> Result<f64> {
    let value = match rows.first() {
        Some(Value::Array(inner)) => inner.first(),
        other => other,
    };
    match value {
        None | Some(Value::Null) => Err(RuleError::unavailable(
            Window::Current,
            "query returned no count",
        )),
        Some(v) => as_count(Window::Current, v),
    }
}

fn as_count(window: Window, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| RuleError::NotNumeric {
            window,
            value: value.to_string(),
        })
}
