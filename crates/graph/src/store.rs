use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surge_core::{CountQuery, GraphQuery, QueryError, QueryRows};
use tokio::sync::RwLock;
use uuid::Uuid;

pub type EdgeId = Uuid;

/// One directed transaction relationship between two accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionEdge {
    #[serde(default = "Uuid::new_v4")]
    pub id: EdgeId,
    pub from: String,
    pub to: String,
    #[serde(rename = "TxTp")]
    pub tx_tp: String,
    #[serde(rename = "MsgId", default)]
    pub msg_id: String,
    #[serde(rename = "CreDtTm")]
    pub cre_dt_tm: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct GraphStats {
    pub account_count: usize,
    pub edge_count: usize,
    pub edges_by_type: HashMap<String, usize>,
}

/// In-memory transaction relationship graph.
///
/// Accounts are vertices keyed by account id; every recorded transaction is
/// its own edge (no weight folding), so windowed counts stay exact.
#[derive(Debug, Default)]
pub struct TransactionGraph {
    pub accounts: HashSet<String>,
    pub edges: HashMap<EdgeId, TransactionEdge>,
    pub outgoing: HashMap<String, Vec<EdgeId>>,
    pub incoming: HashMap<String, Vec<EdgeId>>,
    msg_index: HashSet<(String, String)>,
}

/// Handle shared between concurrent evaluations and the ingest path.
pub type SharedGraph = Arc<RwLock<TransactionGraph>>;

impl TransactionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a JSON array of [`TransactionEdge`] records.
    pub fn load_history(json: &str) -> Result<Self, serde_json::Error> {
        let edges: Vec<TransactionEdge> = serde_json::from_str(json)?;
        let mut graph = Self::new();
        for edge in edges {
            graph.insert_edge(edge);
        }
        Ok(graph)
    }

    pub fn into_shared(self) -> SharedGraph {
        Arc::new(RwLock::new(self))
    }

    pub fn add_account(&mut self, key: &str) {
        if !self.accounts.contains(key) {
            self.accounts.insert(key.to_string());
        }
    }

    /// Record a transaction from `from` to `to`.
    ///
    /// A message id already recorded for the same type is ignored so replayed
    /// messages do not inflate counts. Empty message ids are never deduplicated.
    pub fn add_transaction(
        &mut self,
        from: &str,
        to: &str,
        tx_tp: &str,
        msg_id: &str,
        cre_dt_tm: DateTime<Utc>,
    ) -> Option<EdgeId> {
        self.insert_edge(TransactionEdge {
            id: Uuid::new_v4(),
            from: from.to_string(),
            to: to.to_string(),
            tx_tp: tx_tp.to_string(),
            msg_id: msg_id.to_string(),
            cre_dt_tm,
        })
    }

    fn insert_edge(&mut self, edge: TransactionEdge) -> Option<EdgeId> {
        if !edge.msg_id.is_empty()
            && !self.msg_index.insert((edge.tx_tp.clone(), edge.msg_id.clone()))
        {
            tracing::debug!(msg_id = %edge.msg_id, "duplicate transaction ignored");
            return None;
        }

        self.add_account(&edge.from);
        self.add_account(&edge.to);

        let id = edge.id;
        self.outgoing.entry(edge.from.clone()).or_default().push(id);
        self.incoming.entry(edge.to.clone()).or_default().push(id);
        self.edges.insert(id, edge);
        Some(id)
    }

    pub fn edges_from(&self, account: &str) -> impl Iterator<Item = &TransactionEdge> {
        self.outgoing
            .get(account)
            .into_iter()
            .flatten()
            .filter_map(|eid| self.edges.get(eid))
    }

    pub fn edges_to(&self, account: &str) -> impl Iterator<Item = &TransactionEdge> {
        self.incoming
            .get(account)
            .into_iter()
            .flatten()
            .filter_map(|eid| self.edges.get(eid))
    }

    pub fn count_matching(&self, query: &CountQuery) -> u64 {
        self.edges_from(&query.from_account)
            .filter(|e| query.matches(&e.from, &e.tx_tp, e.cre_dt_tm))
            .count() as u64
    }

    pub fn stats(&self) -> GraphStats {
        let mut edges_by_type: HashMap<String, usize> = HashMap::new();
        for edge in self.edges.values() {
            *edges_by_type.entry(edge.tx_tp.clone()).or_default() += 1;
        }

        GraphStats {
            account_count: self.accounts.len(),
            edge_count: self.edges.len(),
            edges_by_type,
        }
    }
}

#[async_trait::async_trait]
impl GraphQuery for TransactionGraph {
    async fn count(&self, query: &CountQuery) -> Result<QueryRows, QueryError> {
        if query.collection != surge_core::TRANSACTION_RELATIONSHIP {
            return Err(QueryError::Failed(format!(
                "unknown collection '{}'",
                query.collection
            )));
        }
        Ok(vec![serde_json::Value::from(self.count_matching(query))])
    }
}

/// Read-locked view over a [`SharedGraph`].
pub struct SharedGraphQuery(pub SharedGraph);

#[async_trait::async_trait]
impl GraphQuery for SharedGraphQuery {
    async fn count(&self, query: &CountQuery) -> Result<QueryRows, QueryError> {
        let graph = self.0.read().await;
        graph.count(query).await
    }
}
