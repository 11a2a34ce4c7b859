//! Typed windowed count queries against the transaction relationship graph.
//!
//! A [`CountQuery`] carries every variable part of the query as a typed
//! field. Backends either evaluate it directly ([`CountQuery::matches`]) or
//! render it to a statement with bind parameters ([`CountQuery::to_bound`]);
//! values are never spliced into query text.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::QueryError;
use crate::transaction::PACS002_TX_TYPE;

/// Edge collection holding account-to-account transaction relationships.
pub const TRANSACTION_RELATIONSHIP: &str = "transactionRelationship";

/// Prefix applied to account keys when addressing account vertices.
pub const ACCOUNTS_COLLECTION: &str = "accounts";

/// Raw rows returned by an executor. Aggregates arrive as a single row.
pub type QueryRows = Vec<Value>;

/// Count of transaction edges leaving one account inside a time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountQuery {
    pub collection: String,
    /// Account key the edges originate from (without collection prefix).
    pub from_account: String,
    pub tx_type: String,
    pub reference_time: DateTime<Utc>,
    /// Maximum age in milliseconds, measured back from `reference_time`.
    pub window_ms: u64,
    /// Also require `created_at <= reference_time`.
    pub bound_to_reference: bool,
}

impl CountQuery {
    pub fn new(from_account: &str, reference_time: DateTime<Utc>, window_ms: u64) -> Self {
        Self {
            collection: TRANSACTION_RELATIONSHIP.to_string(),
            from_account: from_account.to_string(),
            tx_type: PACS002_TX_TYPE.to_string(),
            reference_time,
            window_ms,
            bound_to_reference: false,
        }
    }

    /// Exclude records dated after the reference time.
    pub fn not_after_reference(mut self) -> Self {
        self.bound_to_reference = true;
        self
    }

    pub fn in_collection(mut self, collection: &str) -> Self {
        self.collection = collection.to_string();
        self
    }

    /// Fully qualified vertex id of the originating account.
    pub fn account_vertex(&self) -> String {
        format!("{}/{}", ACCOUNTS_COLLECTION, self.from_account)
    }

    /// Whether a single edge satisfies this query's filter.
    pub fn matches(&self, from_account: &str, tx_type: &str, created_at: DateTime<Utc>) -> bool {
        if from_account != self.from_account || tx_type != self.tx_type {
            return false;
        }
        let reference_ms = self.reference_time.timestamp_millis();
        let created_ms = created_at.timestamp_millis();
        let age_ms = i128::from(reference_ms) - i128::from(created_ms);
        if age_ms > i128::from(self.window_ms) {
            return false;
        }
        !self.bound_to_reference || created_ms <= reference_ms
    }

    /// Render as an AQL statement with bind parameters.
    pub fn to_bound(&self) -> BoundQuery {
        let mut text = String::from(
            "FOR doc IN @@collection\n  \
             FILTER doc._from == @account\n  \
             AND doc.TxTp == @txTp\n  \
             AND @referenceTime - DATE_TIMESTAMP(doc.CreDtTm) <= @window\n",
        );
        if self.bound_to_reference {
            text.push_str("  AND DATE_TIMESTAMP(doc.CreDtTm) <= @referenceTime\n");
        }
        text.push_str("  COLLECT WITH COUNT INTO length\n  RETURN length");

        let mut bind_vars = BTreeMap::new();
        bind_vars.insert("@collection".to_string(), Value::from(self.collection.clone()));
        bind_vars.insert("account".to_string(), Value::from(self.account_vertex()));
        bind_vars.insert("txTp".to_string(), Value::from(self.tx_type.clone()));
        bind_vars.insert(
            "referenceTime".to_string(),
            Value::from(self.reference_time.timestamp_millis()),
        );
        bind_vars.insert("window".to_string(), Value::from(self.window_ms));

        BoundQuery { text, bind_vars }
    }
}

/// Query text plus its bind parameters, ready for a prepared-statement API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundQuery {
    pub text: String,
    #[serde(rename = "bindVars")]
    pub bind_vars: BTreeMap<String, Value>,
}

/// Abstraction over the graph store that answers count queries.
///
/// The rules crate only depends on this trait. A database-backed
/// implementation sends [`CountQuery::to_bound`]; the in-memory graph
/// evaluates [`CountQuery::matches`] directly.
#[async_trait::async_trait]
pub trait GraphQuery: Send + Sync {
    /// Execute the count and return its raw rows.
    ///
    /// A legitimate zero must come back as a `0` row, never as no rows.
    async fn count(&self, query: &CountQuery) -> Result<QueryRows, QueryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn matches_inside_window() {
        let q = CountQuery::new("acct-1", reference(), 3_600_000);
        assert!(q.matches("acct-1", PACS002_TX_TYPE, reference() - Duration::minutes(30)));
    }

    #[test]
    fn window_edge_is_inclusive() {
        let q = CountQuery::new("acct-1", reference(), 3_600_000);
        assert!(q.matches("acct-1", PACS002_TX_TYPE, reference() - Duration::hours(1)));
        assert!(!q.matches(
            "acct-1",
            PACS002_TX_TYPE,
            reference() - Duration::hours(1) - Duration::milliseconds(1)
        ));
    }

    #[test]
    fn rejects_other_account_or_type() {
        let q = CountQuery::new("acct-1", reference(), 3_600_000);
        assert!(!q.matches("acct-2", PACS002_TX_TYPE, reference()));
        assert!(!q.matches("acct-1", "pacs.008.001.10", reference()));
    }

    #[test]
    fn future_records_only_excluded_when_bounded() {
        let future = reference() + Duration::minutes(5);
        let open = CountQuery::new("acct-1", reference(), 3_600_000);
        assert!(open.matches("acct-1", PACS002_TX_TYPE, future));

        let bounded = open.not_after_reference();
        assert!(!bounded.matches("acct-1", PACS002_TX_TYPE, future));
        assert!(bounded.matches("acct-1", PACS002_TX_TYPE, reference()));
    }

    #[test]
    fn bound_query_uses_parameters_only() {
        let bound = CountQuery::new("acct'; DROP", reference(), 18_000_000).to_bound();
        assert!(!bound.text.contains("acct"));
        assert!(!bound.text.contains("18000000"));
        assert_eq!(bound.bind_vars["account"], Value::from("accounts/acct'; DROP"));
        assert_eq!(bound.bind_vars["window"], Value::from(18_000_000u64));
        assert_eq!(bound.bind_vars["txTp"], Value::from(PACS002_TX_TYPE));
        assert_eq!(
            bound.bind_vars["@collection"],
            Value::from(TRANSACTION_RELATIONSHIP)
        );
    }

    #[test]
    fn bounded_query_adds_upper_time_filter() {
        let open = CountQuery::new("a", reference(), 1).to_bound();
        let bounded = CountQuery::new("a", reference(), 1).not_after_reference().to_bound();
        assert!(!open.text.contains("<= @referenceTime"));
        assert!(bounded.text.contains("DATE_TIMESTAMP(doc.CreDtTm) <= @referenceTime"));
    }
}
