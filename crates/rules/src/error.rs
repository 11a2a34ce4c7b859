//! Evaluation errors and their operational categories.

use surge_core::QueryError;

/// Which window a query or count belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Baseline,
    Current,
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Window::Baseline => write!(f, "baseline"),
            Window::Current => write!(f, "current"),
        }
    }
}

/// Operational class of a [`RuleError`], used by the caller to choose
/// between retry, dead-lettering, and alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rule misconfigured; needs operator intervention.
    Configuration,
    /// Event or config is missing data this rule depends on.
    DataIntegrity,
    /// The graph store returned nothing usable, failed, or timed out.
    DataAvailability,
    /// A count or computed value is not numeric.
    Type,
}

/// Errors that abort a single rule evaluation.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid config provided - bands not provided or empty")]
    MissingBands,

    #[error("Invalid config provided - exitConditions not provided")]
    MissingExitConditions,

    #[error("Invalid config provided - parameters not provided")]
    MissingParameters,

    #[error("Invalid config provided - maxQueryRange parameter not provided")]
    MissingMaxQueryRange,

    #[error("Data Cache does not have required dbtrAcctId")]
    MissingDebtorAccount,

    #[error("Data Cache does not have required cdtrAcctId")]
    MissingCreditorAccount,

    #[error("Unsuccessful transaction and no exit condition in config")]
    UnhandledUnsuccessfulTransaction,

    #[error("Data error: irretrievable {window} transaction count ({detail})")]
    DataUnavailable { window: Window, detail: String },

    #[error("Data error: {window} transaction count is not a number: {value}")]
    NotNumeric { window: Window, value: String },

    #[error("Value provided ({0}) does not fall within any configured band")]
    NoMatchingBand(f64),

    #[error("Graph query failed: {0}")]
    Query(#[from] QueryError),
}

impl RuleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RuleError::MissingBands
            | RuleError::MissingExitConditions
            | RuleError::MissingParameters
            | RuleError::MissingMaxQueryRange
            | RuleError::NoMatchingBand(_) => ErrorCategory::Configuration,
            RuleError::MissingDebtorAccount
            | RuleError::MissingCreditorAccount
            | RuleError::UnhandledUnsuccessfulTransaction => ErrorCategory::DataIntegrity,
            RuleError::DataUnavailable { .. } | RuleError::Query(_) => {
                ErrorCategory::DataAvailability
            }
            RuleError::NotNumeric { .. } => ErrorCategory::Type,
        }
    }

    pub(crate) fn unavailable(window: Window, detail: impl Into<String>) -> Self {
        RuleError::DataUnavailable {
            window,
            detail: detail.into(),
        }
    }
}

/// Result alias for rule evaluation.
pub type Result<T> = std::result::Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(RuleError::MissingBands.category(), ErrorCategory::Configuration);
        assert_eq!(
            RuleError::MissingMaxQueryRange.category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            RuleError::MissingDebtorAccount.category(),
            ErrorCategory::DataIntegrity
        );
        assert_eq!(
            RuleError::UnhandledUnsuccessfulTransaction.category(),
            ErrorCategory::DataIntegrity
        );
        assert_eq!(
            RuleError::Query(QueryError::Timeout(100)).category(),
            ErrorCategory::DataAvailability
        );
        assert_eq!(
            RuleError::NotNumeric {
                window: Window::Current,
                value: "\"x\"".into()
            }
            .category(),
            ErrorCategory::Type
        );
    }

    #[test]
    fn messages_name_the_window() {
        let err = RuleError::unavailable(Window::Baseline, "no rows");
        assert_eq!(
            err.to_string(),
            "Data error: irretrievable baseline transaction count (no rows)"
        );
    }
}
