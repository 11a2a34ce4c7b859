//! Rule configuration and rule result types with serde (de)serialization.
//!
//! Field names match the engine's JSON documents (`exitConditions`,
//! `subRuleRef`, `maxQueryRange`, ...). Presence is modelled with `Option`
//! and default application is explicit on [`Parameters`].

mod config;
mod result;

pub use config::*;
pub use result::*;
