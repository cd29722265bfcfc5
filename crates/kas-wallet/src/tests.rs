//! Tests for the treasury wallet against an in-memory network double.

use std::sync::Mutex;

use kas_primitives::chainhash::{Hash, TransactionId};
use kas_primitives::ec::Signature;
use kas_rest::types::{FeeBucket, SubmitResponse};
use kas_rest::{FeeEstimate, KaspaApi, RestError, TransactionRecord};
use kas_script::{Address, Prefix};
use kas_transaction::sighash::{calc_schnorr_signature_hash, SighashCache};
use kas_transaction::{SigningContext, Transaction, TransactionOutpoint, UnspentOutput, UtxoEntry};

use crate::config::{FeePolicy, WalletConfig};
use crate::wallet::TreasuryWallet;
use crate::WalletError;

const SECRET_HEX: &str = "b7e151628aed2a6abf7158809cf4f3c762e7160f38b4da56a784d9045190cfef";

// -----------------------------------------------------------------------
// Network double
// -----------------------------------------------------------------------

enum SubmitBehaviour {
    Accept,
    Reject(String),
    Fail,
}

struct MockApi {
    utxos: Vec<UnspentOutput>,
    submitted: Mutex<Vec<Transaction>>,
    behaviour: SubmitBehaviour,
}

impl MockApi {
    fn new(utxos: Vec<UnspentOutput>) -> Self {
        MockApi { utxos, submitted: Mutex::new(Vec::new()), behaviour: SubmitBehaviour::Accept }
    }

    fn submissions(&self) -> Vec<Transaction> {
        self.submitted.lock().unwrap().clone()
    }
}

impl KaspaApi for MockApi {
    async fn get_utxos_by_address(&self, _address: &Address) -> Result<Vec<UnspentOutput>, RestError> {
        Ok(self.utxos.clone())
    }

    async fn submit_transaction(&self, tx: &Transaction) -> Result<SubmitResponse, RestError> {
        self.submitted.lock().unwrap().push(tx.clone());
        match &self.behaviour {
            SubmitBehaviour::Accept => Ok(SubmitResponse { transaction_id: tx.id() }),
            SubmitBehaviour::Reject(reason) => Err(RestError::Rejected(reason.clone())),
            SubmitBehaviour::Fail => Err(RestError::InvalidResponse(
                "submission response has neither transactionId nor error".into(),
            )),
        }
    }

    async fn get_transaction(&self, id: &TransactionId) -> Result<Option<TransactionRecord>, RestError> {
        let known = self.submitted.lock().unwrap().iter().any(|tx| tx.id() == *id);
        Ok(known.then(|| TransactionRecord {
            transaction_id: id.to_hex(),
            hash: None,
            is_accepted: Some(false),
            accepting_block_hash: None,
            accepting_block_blue_score: None,
            block_time: None,
        }))
    }

    async fn get_fee_estimate(&self) -> Result<FeeEstimate, RestError> {
        Ok(FeeEstimate {
            priority_bucket: FeeBucket { feerate: 1.0, estimated_seconds: 1.0 },
            normal_buckets: Vec::new(),
            low_buckets: Vec::new(),
        })
    }
}

// -----------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------

fn signer() -> SigningContext {
    SigningContext::from_hex(SECRET_HEX).unwrap()
}

fn testnet_config() -> WalletConfig {
    WalletConfig { network: Prefix::Testnet, fee_policy: FeePolicy::fixed(10_000) }
}

fn treasury_utxo(tag: u8, amount: u64) -> UnspentOutput {
    UnspentOutput::new(
        TransactionOutpoint::new(Hash::new([tag; 32]), u32::from(tag)),
        UtxoEntry {
            amount,
            script_public_key: signer().address(Prefix::Testnet).script_public_key(),
            block_daa_score: 42,
            is_coinbase: false,
        },
    )
}

fn wallet(utxos: Vec<UnspentOutput>) -> TreasuryWallet<MockApi> {
    let signer = signer();
    let address = signer.address(Prefix::Testnet);
    TreasuryWallet::new(MockApi::new(utxos), signer, address, testnet_config())
}

fn recipient() -> Address {
    Address::from_public_key(Prefix::Testnet, &[0x42; 32])
}

// -----------------------------------------------------------------------
// Scenarios
// -----------------------------------------------------------------------

#[tokio::test]
async fn test_send_one_input_two_outputs() {
    let utxo = treasury_utxo(1, 100_000_000);
    let w = wallet(vec![utxo.clone()]);

    let id = w.send_transaction(&recipient().to_string(), 50_000_000).await.unwrap();

    let submitted = w.api().submissions();
    assert_eq!(submitted.len(), 1);
    let tx = &submitted[0];
    assert_eq!(id, tx.id());

    assert_eq!(tx.inputs.len(), 1);
    assert_eq!(tx.inputs[0].previous_outpoint, utxo.outpoint);
    assert_eq!(tx.inputs[0].sequence, 0);
    assert_eq!(tx.inputs[0].sig_op_count, 1);
    assert_eq!(tx.inputs[0].signature_script.len(), 66);

    assert_eq!(tx.outputs.len(), 2);
    assert_eq!(tx.outputs[0].value, 50_000_000);
    assert_eq!(tx.outputs[0].script_public_key, recipient().script_public_key());
    assert_eq!(tx.outputs[1].value, 49_990_000);
    assert_eq!(tx.outputs[1].script_public_key, w.address().script_public_key());

    assert_eq!(tx.version, 0);
    assert_eq!(tx.lock_time, 0);
    assert_eq!(tx.subnetwork_id, [0u8; 20]);
    assert_eq!(tx.gas, 0);
    assert!(tx.payload.is_empty());
}

#[tokio::test]
async fn test_submitted_signature_verifies() {
    let utxo = treasury_utxo(1, 100_000_000);
    let w = wallet(vec![utxo.clone()]);
    w.send_transaction(&recipient().to_string(), 50_000_000).await.unwrap();

    let tx = w.api().submissions().remove(0);
    let mut unsigned = tx.clone();
    unsigned.inputs[0].signature_script.clear();
    let entries = vec![utxo.entry];
    let digest = calc_schnorr_signature_hash(&unsigned, &entries, 0, &SighashCache::for_signing(&unsigned)).unwrap();
    let sig = Signature::from_bytes(&tx.inputs[0].signature_script[1..65]).unwrap();
    assert!(w.signer().public_key().verify(&digest, &sig));
}

#[tokio::test]
async fn test_insufficient_funds_makes_no_submission() {
    let w = wallet(vec![treasury_utxo(1, 2_000_000), treasury_utxo(2, 3_000_000)]);
    let err = w.send_transaction(&recipient().to_string(), 10_000_000).await.unwrap_err();
    assert!(matches!(
        err,
        WalletError::InsufficientFunds { available: 5_000_000, needed: 10_010_000 }
    ));
    assert!(w.api().submissions().is_empty());
}

#[tokio::test]
async fn test_no_utxos() {
    let w = wallet(Vec::new());
    let err = w.send_transaction(&recipient().to_string(), 1).await.unwrap_err();
    assert!(matches!(err, WalletError::NoUtxosAvailable(ref a) if a.starts_with("kaspatest:")));
    assert!(w.api().submissions().is_empty());
}

#[tokio::test]
async fn test_exact_amount_omits_change() {
    let w = wallet(vec![treasury_utxo(1, 50_010_000)]);
    w.send_transaction(&recipient().to_string(), 50_000_000).await.unwrap();
    let tx = w.api().submissions().remove(0);
    assert_eq!(tx.outputs.len(), 1);
    assert_eq!(tx.outputs[0].value, 50_000_000);
}

#[tokio::test]
async fn test_rejection_passes_reason_through() {
    let mut api = MockApi::new(vec![treasury_utxo(1, 100_000_000)]);
    api.behaviour = SubmitBehaviour::Reject("fee too low".to_string());
    let s = signer();
    let addr = s.address(Prefix::Testnet);
    let w = TreasuryWallet::new(api, s, addr, testnet_config());

    let err = w.send_transaction(&recipient().to_string(), 1_000).await.unwrap_err();
    assert!(matches!(err, WalletError::SubmissionRejected(ref r) if r == "fee too low"));
}

#[tokio::test]
async fn test_non_rejection_failure_is_network_error() {
    let mut api = MockApi::new(vec![treasury_utxo(1, 100_000_000)]);
    api.behaviour = SubmitBehaviour::Fail;
    let s = signer();
    let addr = s.address(Prefix::Testnet);
    let w = TreasuryWallet::new(api, s, addr, testnet_config());

    let err = w.send_transaction(&recipient().to_string(), 1_000).await.unwrap_err();
    assert!(matches!(err, WalletError::Network(_)));
}

#[tokio::test]
async fn test_bad_destination_fails_before_network() {
    let w = wallet(vec![treasury_utxo(1, 100_000_000)]);

    let err = w.send_transaction("kaspatest-missing-separator", 1).await.unwrap_err();
    assert!(matches!(err, WalletError::Bech32Decode(_)));

    let mainnet = Address::from_public_key(Prefix::Mainnet, &[0x42; 32]).to_string();
    let err = w.send_transaction(&mainnet, 1).await.unwrap_err();
    assert!(matches!(err, WalletError::InvalidAddress(_)));

    assert!(w.api().submissions().is_empty());
}

#[tokio::test]
async fn test_balance_and_lookup() {
    let w = wallet(vec![treasury_utxo(1, 7), treasury_utxo(2, 8)]);
    assert_eq!(w.balance().await.unwrap(), 15);

    let id = w.send_transaction(&recipient().to_string(), 1).await;
    assert!(matches!(id, Err(WalletError::InsufficientFunds { .. })));

    let w = wallet(vec![treasury_utxo(1, 100_000)]);
    let id = w.send_transaction(&recipient().to_string(), 1).await.unwrap();
    assert!(w.get_transaction(&id).await.unwrap().is_some());
    assert!(w.get_transaction(&Hash::new([9; 32])).await.unwrap().is_none());
}

// -----------------------------------------------------------------------
// Assembly invariants
// -----------------------------------------------------------------------

#[test]
fn test_build_conserves_value() {
    let w = wallet(vec![treasury_utxo(1, 30_000), treasury_utxo(2, 70_000), treasury_utxo(3, 5_000)]);
    let utxos = w.api().utxos.clone();
    let built = w.build_transaction(&utxos, &recipient(), 80_000).unwrap();

    let outputs = built.tx.total_output_value().unwrap();
    assert_eq!(built.input_total, outputs + built.fee);
    assert_eq!(built.fee, 10_000);
    assert_eq!(built.tx.inputs.len(), 2);
    assert_eq!(built.change, 10_000);
    assert!(built.tx.is_fully_signed());
}

#[test]
fn test_build_rejects_zero_amount() {
    let w = wallet(vec![treasury_utxo(1, 30_000)]);
    let utxos = w.api().utxos.clone();
    assert!(matches!(
        w.build_transaction(&utxos, &recipient(), 0),
        Err(WalletError::InvalidAmount(_))
    ));
}

#[test]
fn test_build_pays_script_hash_recipient() {
    let w = wallet(vec![treasury_utxo(1, 300_000)]);
    let utxos = w.api().utxos.clone();
    let p2sh = Address::new(Prefix::Testnet, kas_script::Version::ScriptHash, [0x77; 32]);
    let built = w.build_transaction(&utxos, &p2sh, 100_000).unwrap();
    assert_eq!(built.tx.outputs[0].script_public_key.script().len(), 35);
}

#[test]
fn test_mismatched_treasury_address_still_builds() {
    let other = Address::from_public_key(Prefix::Testnet, &[0x01; 32]);
    let w = TreasuryWallet::new(MockApi::new(Vec::new()), signer(), other.clone(), testnet_config());
    assert_eq!(w.address(), &other);
}
