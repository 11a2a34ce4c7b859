//! surge-eval — evaluate one payment-status request offline.
//!
//! Loads a rule configuration, a request document, and a JSON array of
//! historical transaction edges into an in-memory graph, runs the surge
//! evaluator once, and prints the resulting rule result as JSON.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use surge_core::{Config, RuleRequest};
use surge_graph::TransactionGraph;
use surge_rules::loader::load_rule_config;
use surge_rules::schema::RuleResult;
use surge_rules::SurgeRuleEvaluator;

// ── CLI ─────────────────────────────────────────────────────────────

/// Evaluate the surge rule for a single transaction.
#[derive(Parser, Debug)]
#[command(name = "surge-eval", version, about)]
struct Cli {
    /// Rule configuration (YAML or JSON).
    #[arg(long, env = "SURGE_RULE_CONFIG")]
    rule: PathBuf,

    /// Rule request JSON (payment-status message plus DataCache).
    #[arg(long)]
    request: PathBuf,

    /// JSON array of historical transaction edges.
    #[arg(long, env = "SURGE_HISTORY")]
    history: Option<PathBuf>,

    /// Per-query timeout in milliseconds (overrides SURGE_QUERY_TIMEOUT_MS).
    #[arg(long)]
    query_timeout_ms: Option<u64>,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    surge_core::config::load_dotenv();
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    config.log_summary();

    let rule_config = load_rule_config(&cli.rule)
        .with_context(|| format!("loading rule config {}", cli.rule.display()))?;

    let request: RuleRequest = serde_json::from_str(
        &std::fs::read_to_string(&cli.request)
            .with_context(|| format!("reading request {}", cli.request.display()))?,
    )
    .context("parsing request")?;

    let graph = match &cli.history {
        Some(path) => TransactionGraph::load_history(
            &std::fs::read_to_string(path)
                .with_context(|| format!("reading history {}", path.display()))?,
        )
        .context("parsing history")?,
        None => TransactionGraph::new(),
    };
    let stats = graph.stats();
    info!(
        accounts = stats.account_count,
        edges = stats.edge_count,
        "history loaded"
    );

    let mut evaluator = SurgeRuleEvaluator::from_config(&config.evaluator, Arc::new(graph));
    if let Some(ms) = cli.query_timeout_ms {
        evaluator = evaluator.with_query_timeout(Duration::from_millis(ms));
    }

    let partial = RuleResult::for_rule(&rule_config);
    let result = evaluator
        .evaluate(&request, &rule_config, partial)
        .await
        .map_err(|e| anyhow::anyhow!("{:?} error: {e}", e.category()))?;

    info!(
        msg_id = %request.message_id(),
        sub_rule_ref = %result.sub_rule_ref,
        "evaluation complete"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
