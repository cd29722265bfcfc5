//! Kaspa REST client for UTXO queries and transaction submission.

use std::future::Future;

use kas_primitives::chainhash::{Hash, TransactionId};
use kas_script::Address;
use kas_transaction::rpc::SubmitTransactionRequest;
use kas_transaction::{Transaction, UnspentOutput};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::RestError;
use crate::types::{
    ErrorResponse, FeeEstimate, RestConfig, SubmitResponse, SubmitTransactionResponse,
    TransactionRecord, UtxoResponse,
};

/// Async network interface used by the wallet.
pub trait KaspaApi {
    /// Fetch every unspent output locked to `address`. An empty list is valid.
    fn get_utxos_by_address(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<Vec<UnspentOutput>, RestError>> + Send;

    /// Submit a signed transaction.
    ///
    /// Returns the node-assigned id, or [`RestError::Rejected`] with the
    /// node's reason.
    fn submit_transaction(
        &self,
        tx: &Transaction,
    ) -> impl Future<Output = Result<SubmitResponse, RestError>> + Send;

    /// Look up a transaction by id. `None` when the indexer does not know it.
    fn get_transaction(
        &self,
        id: &TransactionId,
    ) -> impl Future<Output = Result<Option<TransactionRecord>, RestError>> + Send;

    /// Read the node's current fee estimate.
    fn get_fee_estimate(&self) -> impl Future<Output = Result<FeeEstimate, RestError>> + Send;
}

/// HTTP client for the Kaspa REST API.
#[derive(Debug, Clone)]
pub struct KaspaRestClient {
    /// Client configuration.
    config: RestConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl KaspaRestClient {
    /// Create a new client with the given configuration.
    ///
    /// # Returns
    /// The client, or an error if the HTTP client cannot be built.
    pub fn new(config: RestConfig) -> Result<Self, RestError> {
        let mut builder = reqwest::Client::builder().default_headers(Self::build_headers());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Fetch the unspent outputs of an address.
    pub async fn utxos_by_address(&self, address: &Address) -> Result<Vec<UnspentOutput>, RestError> {
        let url = self.url(&format!("/addresses/{}/utxos", address));
        debug!(%address, "fetching utxos");

        let resp = self.client.get(&url).send().await?;
        let body = Self::success_body(resp).await?;
        let raw: Vec<UtxoResponse> = serde_json::from_str(&body)?;

        let utxos = raw
            .into_iter()
            .map(UnspentOutput::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(%address, count = utxos.len(), "fetched utxos");
        Ok(utxos)
    }

    /// Submit a transaction to `POST /transactions`.
    pub async fn submit(&self, tx: &Transaction) -> Result<SubmitResponse, RestError> {
        let url = self.url("/transactions");
        let mut request = SubmitTransactionRequest::new(tx);
        request.allow_orphan = self.config.allow_orphan;

        let resp = self.client.post(&url).json(&request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.reason())
                .unwrap_or_else(|| format!("HTTP {}: {}", status.as_u16(), body));
            warn!(status = status.as_u16(), %reason, "transaction rejected");
            return Err(RestError::Rejected(reason));
        }

        let parsed: SubmitTransactionResponse = serde_json::from_str(&body)?;
        if let Some(reason) = parsed.error {
            warn!(%reason, "transaction rejected");
            return Err(RestError::Rejected(reason));
        }
        let id = parsed.transaction_id.ok_or_else(|| {
            RestError::InvalidResponse("submission response has neither transactionId nor error".to_string())
        })?;
        let transaction_id = Hash::from_hex(&id)
            .map_err(|e| RestError::InvalidResponse(format!("transactionId: {e}")))?;
        Ok(SubmitResponse { transaction_id })
    }

    /// Query a transaction by id.
    pub async fn transaction(&self, id: &TransactionId) -> Result<Option<TransactionRecord>, RestError> {
        let url = self.url(&format!("/transactions/{}", id));
        let resp = self.client.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = Self::success_body(resp).await?;
        Ok(Some(serde_json::from_str(&body)?))
    }

    /// Query the fee estimate.
    pub async fn fee_estimate(&self) -> Result<FeeEstimate, RestError> {
        let resp = self.client.get(self.url("/info/fee-estimate")).send().await?;
        let body = Self::success_body(resp).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Read the body of a response, turning non-success statuses into errors.
    async fn success_body(resp: reqwest::Response) -> Result<String, RestError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(RestError::Status { status: status.as_u16(), body });
        }
        Ok(body)
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

impl KaspaApi for KaspaRestClient {
    async fn get_utxos_by_address(&self, address: &Address) -> Result<Vec<UnspentOutput>, RestError> {
        self.utxos_by_address(address).await
    }

    async fn submit_transaction(&self, tx: &Transaction) -> Result<SubmitResponse, RestError> {
        self.submit(tx).await
    }

    async fn get_transaction(&self, id: &TransactionId) -> Result<Option<TransactionRecord>, RestError> {
        self.transaction(id).await
    }

    async fn get_fee_estimate(&self) -> Result<FeeEstimate, RestError> {
        self.fee_estimate().await
    }
}
