//! REST data types: configuration and API response structures.
//!
//! Every response shape is an explicit struct. Conversions into the
//! transaction model validate eagerly and fail with
//! [`RestError::InvalidResponse`] on missing or malformed fields.

use std::time::Duration;

use kas_primitives::chainhash::{Hash, TransactionId};
use kas_script::ScriptPublicKey;
use kas_transaction::{TransactionOutpoint, UnspentOutput, UtxoEntry};
use serde::{Deserialize, Serialize};

use crate::error::RestError;

/// Public mainnet REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.kaspa.org";

/// Configuration for a [`KaspaRestClient`](crate::KaspaRestClient).
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL for the REST API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout. `None` disables the timeout.
    pub timeout: Option<Duration>,
    /// Whether submitted transactions may reference unknown parents.
    pub allow_orphan: bool,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(30)),
            allow_orphan: false,
        }
    }
}

// ---------------------------------------------------------------------------
// GET /addresses/{address}/utxos
// ---------------------------------------------------------------------------

/// Outpoint as returned by the UTXO endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutpointResponse {
    /// Hex transaction id.
    pub transaction_id: String,
    /// Output index.
    pub index: u32,
}

/// Script public key as returned by the UTXO endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptPublicKeyResponse {
    /// Script version; absent on some deployments, in which case it is 0.
    #[serde(default)]
    pub version: u16,
    /// Hex script bytes.
    pub script_public_key: String,
}

/// UTXO entry as returned by the UTXO endpoint. Integers arrive as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoEntryResponse {
    /// Amount in sompi, decimal string.
    pub amount: String,
    /// The output's locking script.
    pub script_public_key: ScriptPublicKeyResponse,
    /// DAA score of the creating block, decimal string.
    pub block_daa_score: String,
    /// Whether the output is a coinbase output.
    #[serde(default)]
    pub is_coinbase: bool,
}

/// One element of the UTXO endpoint's array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoResponse {
    /// Owning address.
    pub address: String,
    /// Outpoint of the unspent output.
    pub outpoint: OutpointResponse,
    /// State of the unspent output.
    pub utxo_entry: UtxoEntryResponse,
}

fn parse_u64(field: &str, value: &str) -> Result<u64, RestError> {
    value
        .parse::<u64>()
        .map_err(|_| RestError::InvalidResponse(format!("{field} is not an unsigned integer: {value:?}")))
}

impl TryFrom<UtxoResponse> for UnspentOutput {
    type Error = RestError;

    fn try_from(resp: UtxoResponse) -> Result<Self, Self::Error> {
        let transaction_id = Hash::from_hex(&resp.outpoint.transaction_id)
            .map_err(|e| RestError::InvalidResponse(format!("outpoint transactionId: {e}")))?;
        let script_public_key = ScriptPublicKey::from_hex_with_version(
            resp.utxo_entry.script_public_key.version,
            &resp.utxo_entry.script_public_key.script_public_key,
        )
        .map_err(|e| RestError::InvalidResponse(format!("scriptPublicKey: {e}")))?;

        Ok(UnspentOutput::new(
            TransactionOutpoint::new(transaction_id, resp.outpoint.index),
            UtxoEntry {
                amount: parse_u64("amount", &resp.utxo_entry.amount)?,
                script_public_key,
                block_daa_score: parse_u64("blockDaaScore", &resp.utxo_entry.block_daa_score)?,
                is_coinbase: resp.utxo_entry.is_coinbase,
            },
        ))
    }
}

// ---------------------------------------------------------------------------
// POST /transactions
// ---------------------------------------------------------------------------

/// Raw body of a submission response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTransactionResponse {
    /// Id of the accepted transaction.
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// Rejection reason.
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short error message.
    #[serde(default)]
    pub error: Option<String>,
    /// Validation details; a string or a structured list depending on the endpoint.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Best human-readable reason, preferring `error` over `detail`.
    pub fn reason(&self) -> Option<String> {
        if let Some(err) = &self.error {
            return Some(err.clone());
        }
        match &self.detail {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }
}

/// A successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    /// Id the node assigned to the transaction.
    pub transaction_id: TransactionId,
}

// ---------------------------------------------------------------------------
// GET /transactions/{id}
// ---------------------------------------------------------------------------

/// A transaction as recorded by the indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Hex transaction id.
    pub transaction_id: String,
    /// Hex transaction hash.
    #[serde(default)]
    pub hash: Option<String>,
    /// Whether a chain block accepted the transaction.
    #[serde(default)]
    pub is_accepted: Option<bool>,
    /// Hash of the accepting block.
    #[serde(default)]
    pub accepting_block_hash: Option<String>,
    /// Blue score of the accepting block.
    #[serde(default)]
    pub accepting_block_blue_score: Option<u64>,
    /// Block time in milliseconds.
    #[serde(default)]
    pub block_time: Option<u64>,
}

// ---------------------------------------------------------------------------
// GET /info/fee-estimate
// ---------------------------------------------------------------------------

/// A fee rate bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBucket {
    /// Fee rate in sompi per gram of mass.
    pub feerate: f64,
    /// Expected confirmation time at this rate.
    pub estimated_seconds: f64,
}

/// The node's fee estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimate {
    /// Rate for next-block inclusion.
    pub priority_bucket: FeeBucket,
    /// Normal rates, fastest first.
    #[serde(default)]
    pub normal_buckets: Vec<FeeBucket>,
    /// Low rates, fastest first.
    #[serde(default)]
    pub low_buckets: Vec<FeeBucket>,
}
