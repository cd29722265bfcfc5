//! The treasury wallet: assembles, signs and submits transfers.

use std::str::FromStr;

use kas_primitives::chainhash::TransactionId;
use kas_rest::{KaspaApi, TransactionRecord};
use kas_script::Address;
use kas_transaction::{
    SigningContext, Transaction, TransactionInput, TransactionOutput, UnspentOutput, UtxoEntry,
};
use tracing::{debug, info, warn};

use crate::config::{TreasuryConfig, WalletConfig};
use crate::selection::select_utxos;
use crate::WalletError;

/// A signed transaction ready for submission, with its accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltTransaction {
    /// The signed transaction.
    pub tx: Transaction,
    /// Sum of the spent UTXO amounts.
    pub input_total: u64,
    /// Fee paid, equal to `input_total - sum(outputs)`.
    pub fee: u64,
    /// Change returned to the source address; zero when no change output exists.
    pub change: u64,
}

/// A wallet that spends from a single treasury address.
pub struct TreasuryWallet<A> {
    api: A,
    signer: SigningContext,
    address: Address,
    config: WalletConfig,
}

impl<A: KaspaApi> TreasuryWallet<A> {
    /// Create a wallet spending from `address` with `signer`.
    ///
    /// Logs a warning when the signer's own pay-to-pubkey address differs
    /// from `address`, since signatures for that address's outputs would
    /// then be rejected.
    pub fn new(api: A, signer: SigningContext, address: Address, config: WalletConfig) -> Self {
        let derived = signer.address(address.prefix);
        if derived != address {
            warn!(
                configured = %address,
                derived = %derived,
                "treasury address does not match the signing key"
            );
        }
        TreasuryWallet { api, signer, address, config }
    }

    /// Create a wallet from a loaded configuration.
    ///
    /// # Returns
    /// The wallet, or `Configuration` if the key or address is invalid.
    pub fn from_config(api: A, config: &TreasuryConfig) -> Result<Self, WalletError> {
        let signer = SigningContext::from_hex(&config.private_key_hex)
            .map_err(|e| WalletError::Configuration(format!("treasury private key: {e}")))?;
        let address = Address::from_string_for_network(&config.treasury_address, config.wallet.network)
            .map_err(|e| WalletError::Configuration(format!("treasury address: {e}")))?;
        Ok(Self::new(api, signer, address, config.wallet.clone()))
    }

    /// The configured source address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The signing context.
    pub fn signer(&self) -> &SigningContext {
        &self.signer
    }

    /// The assembly settings.
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// The network interface.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Total sompi held by the source address.
    pub async fn balance(&self) -> Result<u64, WalletError> {
        let utxos = self.api.get_utxos_by_address(&self.address).await?;
        Ok(utxos.iter().fold(0u64, |acc, u| acc.saturating_add(u.amount())))
    }

    /// Look up a transaction. `None` when it is not indexed yet.
    pub async fn get_transaction(&self, id: &TransactionId) -> Result<Option<TransactionRecord>, WalletError> {
        Ok(self.api.get_transaction(id).await?)
    }

    /// Parse a destination address and check it belongs to the wallet's network.
    pub fn parse_destination(&self, to_address: &str) -> Result<Address, WalletError> {
        let address = Address::from_str(to_address)?;
        if address.prefix != self.config.network {
            return Err(WalletError::InvalidAddress(format!(
                "{} is not a {} address",
                to_address, self.config.network
            )));
        }
        Ok(address)
    }

    /// Build and sign a transaction paying `amount` sompi to `to` from `utxos`.
    ///
    /// Performs no I/O. Outputs are `[payment, change]`, with the change
    /// output omitted when it would be zero.
    ///
    /// # Arguments
    /// * `utxos` - Spendable outputs of the source address.
    /// * `to` - The recipient.
    /// * `amount` - Payment in sompi.
    ///
    /// # Returns
    /// The signed transaction with its accounting, or an error if funds are
    /// insufficient or signing fails.
    pub fn build_transaction(
        &self,
        utxos: &[UnspentOutput],
        to: &Address,
        amount: u64,
    ) -> Result<BuiltTransaction, WalletError> {
        if amount == 0 {
            return Err(WalletError::InvalidAmount("0".to_string()));
        }
        let fee = self.config.fee_policy.fee();
        let needed = amount.checked_add(fee).ok_or_else(|| {
            WalletError::InvalidAmount(format!("{amount} + fee {fee} overflows"))
        })?;

        let selection = select_utxos(utxos, needed)?;
        let change = selection.total - needed;

        let mut outputs = vec![TransactionOutput::to_address(amount, to)];
        if change > 0 {
            outputs.push(TransactionOutput::to_address(change, &self.address));
        }

        let (inputs, entries): (Vec<TransactionInput>, Vec<UtxoEntry>) = selection
            .utxos
            .into_iter()
            .map(|u| (TransactionInput::from_outpoint(u.outpoint), u.entry))
            .unzip();

        let mut tx = Transaction::with_io(inputs, outputs);
        self.signer.sign_transaction(&mut tx, &entries)?;
        debug!(
            inputs = tx.input_count(),
            outputs = tx.output_count(),
            amount,
            fee,
            change,
            "built transaction"
        );

        Ok(BuiltTransaction { tx, input_total: selection.total, fee, change })
    }

    /// Send `amount_sompi` to `to_address`.
    ///
    /// Fetches the source UTXOs, builds and signs the transaction, and
    /// submits it once. Nothing is retried.
    ///
    /// # Returns
    /// The id the node assigned, or `NoUtxosAvailable`, `InsufficientFunds`,
    /// `SubmissionRejected` or `Network` among others.
    pub async fn send_transaction(
        &self,
        to_address: &str,
        amount_sompi: u64,
    ) -> Result<TransactionId, WalletError> {
        let to = self.parse_destination(to_address)?;

        let utxos = self.api.get_utxos_by_address(&self.address).await?;
        if utxos.is_empty() {
            return Err(WalletError::NoUtxosAvailable(self.address.to_string()));
        }

        let built = self.build_transaction(&utxos, &to, amount_sompi)?;
        let local_id = built.tx.id();

        let resp = self.api.submit_transaction(&built.tx).await?;
        info!(
            txid = %resp.transaction_id,
            %local_id,
            to = %to,
            amount = amount_sompi,
            fee = built.fee,
            "transaction submitted"
        );
        Ok(resp.transaction_id)
    }
}
