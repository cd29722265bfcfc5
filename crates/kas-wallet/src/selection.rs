//! Largest-first UTXO selection.

use kas_transaction::UnspentOutput;
use tracing::debug;

use crate::WalletError;

/// The inputs chosen to fund a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selected outputs, largest amount first.
    pub utxos: Vec<UnspentOutput>,
    /// Sum of the selected amounts.
    pub total: u64,
}

/// Select UTXOs covering `needed` sompi.
///
/// Outputs are sorted by amount, largest first (ties broken by outpoint so
/// the choice is deterministic), and accumulated until the sum reaches
/// `needed`.
///
/// # Arguments
/// * `utxos` - Every spendable output of the source address.
/// * `needed` - Amount plus fee, in sompi.
///
/// # Returns
/// The selection, `NoUtxosAvailable` for an empty set, or
/// `InsufficientFunds` with the full available balance.
pub fn select_utxos(utxos: &[UnspentOutput], needed: u64) -> Result<Selection, WalletError> {
    if utxos.is_empty() {
        return Err(WalletError::NoUtxosAvailable("source address".to_string()));
    }

    let mut sorted: Vec<&UnspentOutput> = utxos.iter().collect();
    sorted.sort_by(|a, b| {
        b.amount()
            .cmp(&a.amount())
            .then_with(|| a.outpoint.cmp(&b.outpoint))
    });

    let mut selected = Vec::new();
    let mut total: u128 = 0;
    for utxo in sorted {
        if total >= u128::from(needed) {
            break;
        }
        total += u128::from(utxo.amount());
        selected.push(utxo.clone());
    }

    if total < u128::from(needed) {
        let available = utxos
            .iter()
            .fold(0u64, |acc, u| acc.saturating_add(u.amount()));
        return Err(WalletError::InsufficientFunds { available, needed });
    }

    let total = u64::try_from(total).map_err(|_| {
        WalletError::InvalidAmount(format!("selected inputs sum to {total} sompi"))
    })?;
    debug!(selected = selected.len(), total, needed, "selected utxos");
    Ok(Selection { utxos: selected, total })
}
