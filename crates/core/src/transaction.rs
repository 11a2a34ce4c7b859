//! Payment-status wire model consumed by rule evaluation.
//!
//! Field names follow the ISO 20022 JSON rendering used upstream
//! (`FIToFIPmtSts.GrpHdr.CreDtTm`, `TxInfAndSts.TxSts`, ...), so a request
//! published by the orchestrator deserializes without any mapping layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction status code for an accepted (settled) payment.
pub const ACCEPTED_STATUS: &str = "ACCC";

/// Message type recorded on payment-status relationship edges.
pub const PACS002_TX_TYPE: &str = "pacs.002.001.12";

/// A single rule invocation input: the payment-status message plus the
/// identifiers resolved for it by the upstream data preparation step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleRequest {
    pub transaction: Pacs002,
    #[serde(rename = "DataCache")]
    pub data_cache: DataCache,
}

impl RuleRequest {
    pub fn message_id(&self) -> &str {
        &self.transaction.fi_to_fi_pmt_sts.grp_hdr.msg_id
    }

    /// Group-level creation timestamp, the reference point for every window.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.transaction.fi_to_fi_pmt_sts.grp_hdr.cre_dt_tm
    }

    pub fn status(&self) -> &str {
        &self.transaction.fi_to_fi_pmt_sts.tx_inf_and_sts.tx_sts
    }

    pub fn is_accepted(&self) -> bool {
        self.status() == ACCEPTED_STATUS
    }
}

/// FI-to-FI payment status report (pacs.002).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pacs002 {
    #[serde(rename = "TxTp", default = "default_tx_type")]
    pub tx_tp: String,
    #[serde(rename = "FIToFIPmtSts")]
    pub fi_to_fi_pmt_sts: FiToFiPmtSts,
}

fn default_tx_type() -> String {
    PACS002_TX_TYPE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiToFiPmtSts {
    #[serde(rename = "GrpHdr")]
    pub grp_hdr: GroupHeader,
    #[serde(rename = "TxInfAndSts")]
    pub tx_inf_and_sts: TxInfAndSts,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupHeader {
    #[serde(rename = "MsgId")]
    pub msg_id: String,
    #[serde(rename = "CreDtTm")]
    pub cre_dt_tm: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TxInfAndSts {
    #[serde(rename = "OrgnlInstrId", default, skip_serializing_if = "Option::is_none")]
    pub orgnl_instr_id: Option<String>,
    #[serde(rename = "OrgnlEndToEndId", default, skip_serializing_if = "Option::is_none")]
    pub orgnl_end_to_end_id: Option<String>,
    #[serde(rename = "TxSts")]
    pub tx_sts: String,
}

/// Identifiers resolved upstream and attached to the request.
///
/// Every field is optional on the wire; rules decide which ones they require.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataCache {
    #[serde(rename = "cdtrAcctId", default, skip_serializing_if = "Option::is_none")]
    pub cdtr_acct_id: Option<String>,
    #[serde(rename = "dbtrAcctId", default, skip_serializing_if = "Option::is_none")]
    pub dbtr_acct_id: Option<String>,
    #[serde(rename = "cdtrId", default, skip_serializing_if = "Option::is_none")]
    pub cdtr_id: Option<String>,
    #[serde(rename = "dbtrId", default, skip_serializing_if = "Option::is_none")]
    pub dbtr_id: Option<String>,
    #[serde(rename = "amt", default, skip_serializing_if = "Option::is_none")]
    pub amt: Option<Amount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Amount {
    pub amt: f64,
    pub ccy: String,
}

/// Treat empty identifiers the same as absent ones.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
