//! Surge detection rule for the transaction-monitoring rule engine.
//!
//! This crate provides:
//! - Typed rule configuration and rule result documents
//! - The surge evaluator: baseline vs. current-window confirmation counts
//!   for a creditor account, compared under a configurable multiplier
//! - Band-based outcome resolution
//! - Logger and outcome-resolver collaborator traits
//! - YAML/JSON rule configuration parsing

pub mod error;
pub mod evaluator;
pub mod loader;
pub mod logging;
pub mod outcome;
pub mod schema;

pub use error::{ErrorCategory, Result, RuleError};
pub use evaluator::SurgeRuleEvaluator;
