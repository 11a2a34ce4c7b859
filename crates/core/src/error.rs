use thiserror::Error;

/// Errors raised by a [`GraphQuery`](crate::query::GraphQuery) executor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("graph query failed: {0}")]
    Failed(String),

    #[error("graph query timed out after {0}ms")]
    Timeout(u64),
}
