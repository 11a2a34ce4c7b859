//! Surge rule evaluator.
//!
//! Decides whether a creditor account is seeing a surge of successful
//! inbound payment confirmations. Per transaction:
//!
//! 1. validate the rule config and data cache
//! 2. return the `.x00` exit condition for unsuccessful transactions
//! 3. count the creditor's confirmations over the baseline window and
//!    scale the count down to one current-sized window
//! 4. count confirmations over the current window
//! 5. score `1` when `current > baseline × multiplier`, else `0`, and let
//!    the outcome resolver map the score onto the configured bands
//!
//! The graph store, logger, and outcome resolver are injected, so the
//! evaluator holds no state between invocations.

mod counts;
mod decision;

use std::sync::Arc;
use std::time::Duration;

use surge_core::config::EvaluatorConfig;
use surge_core::{non_empty, CountQuery, GraphQuery, QueryError, QueryRows, RuleRequest};

use crate::error::{Result, RuleError};
use crate::logging::{RuleLogger, TracingLogger};
use crate::outcome::{BandOutcomeResolver, OutcomeResolver};
use crate::schema::{Parameters, RuleConfig, RuleResult, UNSUCCESSFUL_EXIT_REF};

use counts::{baseline_count, current_count};

pub use decision::{decide, normalized_baseline, QueryWindows, SurgeDecision};

// ── Evaluator ───────────────────────────────────────────────────────

pub struct SurgeRuleEvaluator {
    query: Arc<dyn GraphQuery>,
    logger: Arc<dyn RuleLogger>,
    resolver: Arc<dyn OutcomeResolver>,
    query_timeout: Duration,
    context: String,
}

impl SurgeRuleEvaluator {
    /// Evaluator with the tracing logger, band resolver, and default settings.
    pub fn new(query: Arc<dyn GraphQuery>) -> Self {
        Self::from_config(&EvaluatorConfig::default(), query)
    }

    pub fn from_config(config: &EvaluatorConfig, query: Arc<dyn GraphQuery>) -> Self {
        Self {
            query,
            logger: Arc::new(TracingLogger),
            resolver: Arc::new(BandOutcomeResolver),
            query_timeout: Duration::from_millis(config.query_timeout_ms),
            context: config.context_label(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn RuleLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn OutcomeResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Evaluate one transaction.
    ///
    /// Returns either the `.x00` exit result or the resolver's result, never
    /// both. Every failure aborts the invocation; nothing is retried here.
    pub async fn evaluate(
        &self,
        req: &RuleRequest,
        config: &RuleConfig,
        partial: RuleResult,
    ) -> Result<RuleResult> {
        let msg_id = req.message_id();
        self.logger.trace("Start - handle transaction", &self.context, msg_id);

        let (params, max_range) = validate(req, config)?;

        self.logger.trace("Step 1 - Early exit conditions", &self.context, msg_id);
        if !req.is_accepted() {
            let exit = config
                .config
                .exit_condition(UNSUCCESSFUL_EXIT_REF)
                .ok_or(RuleError::UnhandledUnsuccessfulTransaction)?;
            let result = partial.with_exit(exit);
            self.logger.trace("End - handle transaction", &self.context, msg_id);
            return Ok(result);
        }

        let creditor = non_empty(&req.data_cache.cdtr_acct_id)
            .ok_or(RuleError::MissingCreditorAccount)?;
        let now = req.created_at();
        let windows = QueryWindows {
            max_range,
            baseline_range: params.baseline_range(max_range),
        };

        self.logger.trace("Step 2 - Prepare baseline query", &self.context, msg_id);
        let baseline_query = CountQuery::new(creditor, now, windows.baseline_range);
        let rows = self.run_count(&baseline_query).await?;
        let baseline = normalized_baseline(baseline_count(&rows)?, windows)?;

        self.logger.trace("Step 3 - Prepare current query", &self.context, msg_id);
        let current_query = CountQuery::new(creditor, now, windows.max_range).not_after_reference();
        let rows = self.run_count(&current_query).await?;
        let current = current_count(&rows)?;

        let decision = decide(baseline, current, params.multiplier());
        tracing::debug!(
            msg_id,
            baseline = decision.baseline_count,
            current = decision.current_count,
            threshold = decision.threshold(),
            is_surge = decision.is_surge,
            "surge decision"
        );

        let result = self.resolver.resolve(decision.score(), config, partial)?;
        self.logger.trace("End - handle transaction", &self.context, msg_id);
        Ok(result)
    }

    async fn run_count(&self, query: &CountQuery) -> Result<QueryRows> {
        match tokio::time::timeout(self.query_timeout, self.query.count(query)).await {
            Ok(rows) => Ok(rows?),
            Err(_) => Err(QueryError::Timeout(self.query_timeout.as_millis() as u64).into()),
        }
    }
}

/// Guard clauses, checked in order; the first violation wins.
fn validate<'a>(req: &RuleRequest, config: &'a RuleConfig) -> Result<(&'a Parameters, u64)> {
    let body = &config.config;
    if body.bands().is_none() {
        return Err(RuleError::MissingBands);
    }
    if body.exit_conditions.is_none() {
        return Err(RuleError::MissingExitConditions);
    }
    let params = body.parameters.as_ref().ok_or(RuleError::MissingParameters)?;
    let max_range = params.max_range().ok_or(RuleError::MissingMaxQueryRange)?;
    // Not used by either query; enforced to keep the upstream contract.
    if non_empty(&req.data_cache.dbtr_acct_id).is_none() {
        return Err(RuleError::MissingDebtorAccount);
    }
    Ok((params, max_range))
}

// ── Tests ───────────────────────────────────────────────────────────
