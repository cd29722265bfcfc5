//! JSON wire model for transaction submission.
//!
//! Mirrors the nested structure accepted by the Kaspa REST API: byte fields
//! are hex strings and field names are camelCase.

use kas_primitives::chainhash::Hash;
use kas_script::ScriptPublicKey;
use serde::{Deserialize, Serialize};

use crate::input::{TransactionInput, TransactionOutpoint};
use crate::output::TransactionOutput;
use crate::transaction::{SubnetworkId, Transaction, SUBNETWORK_ID_SIZE};
use crate::TransactionError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcOutpoint {
    pub transaction_id: String,
    pub index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionInput {
    pub previous_outpoint: RpcOutpoint,
    pub signature_script: String,
    pub sequence: u64,
    pub sig_op_count: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcScriptPublicKey {
    pub version: u16,
    pub script_public_key: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionOutput {
    pub amount: u64,
    pub script_public_key: RpcScriptPublicKey,
}

/// A signed transaction in wire form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    pub version: u16,
    pub inputs: Vec<RpcTransactionInput>,
    pub outputs: Vec<RpcTransactionOutput>,
    pub lock_time: u64,
    pub subnetwork_id: String,
}

/// Body of `POST /transactions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTransactionRequest {
    pub transaction: RpcTransaction,
    pub allow_orphan: bool,
}

impl SubmitTransactionRequest {
    /// Wrap a transaction for submission with orphans disallowed.
    pub fn new(tx: &Transaction) -> Self {
        SubmitTransactionRequest {
            transaction: RpcTransaction::from(tx),
            allow_orphan: false,
        }
    }
}

impl From<&Transaction> for RpcTransaction {
    fn from(tx: &Transaction) -> Self {
        RpcTransaction {
            version: tx.version,
            inputs: tx
                .inputs
                .iter()
                .map(|input| RpcTransactionInput {
                    previous_outpoint: RpcOutpoint {
                        transaction_id: input.previous_outpoint.transaction_id.to_hex(),
                        index: input.previous_outpoint.index,
                    },
                    signature_script: hex::encode(&input.signature_script),
                    sequence: input.sequence,
                    sig_op_count: input.sig_op_count,
                })
                .collect(),
            outputs: tx
                .outputs
                .iter()
                .map(|output| RpcTransactionOutput {
                    amount: output.value,
                    script_public_key: RpcScriptPublicKey {
                        version: output.script_public_key.version(),
                        script_public_key: output.script_public_key.to_hex(),
                    },
                })
                .collect(),
            lock_time: tx.lock_time,
            subnetwork_id: hex::encode(tx.subnetwork_id),
        }
    }
}

impl TryFrom<&RpcTransaction> for Transaction {
    type Error = TransactionError;

    /// Parse the wire form back into a transaction, validating every hex field.
    fn try_from(rpc: &RpcTransaction) -> Result<Self, Self::Error> {
        let mut inputs = Vec::with_capacity(rpc.inputs.len());
        for input in &rpc.inputs {
            let outpoint = TransactionOutpoint::new(
                Hash::from_hex(&input.previous_outpoint.transaction_id)?,
                input.previous_outpoint.index,
            );
            let mut parsed = TransactionInput::new(outpoint, input.sequence, input.sig_op_count);
            parsed.signature_script = hex::decode(&input.signature_script)
                .map_err(kas_primitives::PrimitivesError::from)?;
            inputs.push(parsed);
        }

        let mut outputs = Vec::with_capacity(rpc.outputs.len());
        for output in &rpc.outputs {
            let spk = ScriptPublicKey::from_hex_with_version(
                output.script_public_key.version,
                &output.script_public_key.script_public_key,
            )?;
            outputs.push(TransactionOutput::new(output.amount, spk));
        }

        let mut subnetwork_id: SubnetworkId = [0u8; SUBNETWORK_ID_SIZE];
        hex::decode_to_slice(&rpc.subnetwork_id, &mut subnetwork_id)
            .map_err(kas_primitives::PrimitivesError::from)?;

        Ok(Transaction {
            version: rpc.version,
            inputs,
            outputs,
            lock_time: rpc.lock_time,
            subnetwork_id,
            ..Transaction::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let spk = ScriptPublicKey::pay_to_pub_key(&[0xab; 32]);
        let mut input = TransactionInput::from_outpoint(TransactionOutpoint::new(Hash::new([0x11; 32]), 3));
        input.signature_script = vec![0x41, 0x01];
        let tx = Transaction::with_io(vec![input], vec![TransactionOutput::new(700, spk.clone())]);

        let body = serde_json::to_value(SubmitTransactionRequest::new(&tx)).unwrap();
        assert_eq!(
            body,
            json!({
                "transaction": {
                    "version": 0,
                    "inputs": [{
                        "previousOutpoint": { "transactionId": "11".repeat(32), "index": 3 },
                        "signatureScript": "4101",
                        "sequence": 0,
                        "sigOpCount": 1
                    }],
                    "outputs": [{
                        "amount": 700,
                        "scriptPublicKey": { "version": 0, "scriptPublicKey": spk.to_hex() }
                    }],
                    "lockTime": 0,
                    "subnetworkId": "00".repeat(20)
                },
                "allowOrphan": false
            })
        );
    }

    #[test]
    fn test_parse_back() {
        let spk = ScriptPublicKey::pay_to_pub_key(&[0xab; 32]);
        let input = TransactionInput::from_outpoint(TransactionOutpoint::new(Hash::new([0x22; 32]), 1));
        let tx = Transaction::with_io(vec![input], vec![TransactionOutput::new(9, spk)]);
        let rpc = RpcTransaction::from(&tx);
        assert_eq!(Transaction::try_from(&rpc).unwrap(), tx);

        let mut bad = rpc.clone();
        bad.subnetwork_id = "00".to_string();
        assert!(Transaction::try_from(&bad).is_err());
    }
}
