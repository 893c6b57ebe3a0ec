//! Transaction wire types shared by donations and admin batches.

use serde::{Deserialize, Serialize};

use crate::shared::{TransactionHash, TransactionXdr};

/// Response of the envelope-building endpoints (`/donate`,
/// `/build_admin_transaction`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionXdrResponse {
    pub transaction_xdr: TransactionXdr,
}

/// Response of `POST /send_transaction`.
///
/// The backend forwards Horizon's submit response; only the hash is
/// required, the rest is kept when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitTransactionResponse {
    pub hash: TransactionHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger: Option<u64>,
}

impl SubmitTransactionResponse {
    pub fn new(hash: &str) -> Self {
        Self {
            hash: TransactionHash::from(hash),
            successful: None,
            ledger: None,
        }
    }
}
