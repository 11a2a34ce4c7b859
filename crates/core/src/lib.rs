pub mod config;
pub mod error;
pub mod query;
pub mod transaction;

pub use config::Config;
pub use error::*;
pub use query::*;
pub use transaction::*;
