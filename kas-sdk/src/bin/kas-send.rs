//! kas-send: operator tool for the Kaspa treasury wallet.
//!
//! Reads the treasury key and address from the environment
//! (`KASPA_TREASURY_PRIVATE_KEY`, `KASPA_TREASURY_ADDRESS`, optionally
//! `KASPA_API_URL`, `KASPA_FEE_SOMPI`, `KASPA_NETWORK`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use kas_sdk::primitives::chainhash::Hash;
use kas_sdk::rest::{KaspaApi, KaspaRestClient};
use kas_sdk::wallet::{format_sompi, parse_kas, TreasuryConfig, TreasuryWallet};
use tracing::info;

#[derive(Parser)]
#[command(name = "kas-send", about = "Send KAS from the treasury address")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign and submit a payment.
    Send {
        /// Destination address.
        #[arg(long)]
        to: String,
        /// Amount in KAS, e.g. "1.5".
        #[arg(long)]
        amount: String,
    },
    /// Print the treasury balance.
    Balance,
    /// Look up a transaction by id.
    Status {
        /// Hex transaction id.
        txid: String,
    },
    /// Print the node's fee estimate.
    FeeEstimate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kas_sdk::init_tracing();
    let cli = Cli::parse();

    let config = TreasuryConfig::from_env()?;
    let client = KaspaRestClient::new(config.rest.clone()).context("building REST client")?;
    let wallet = TreasuryWallet::from_config(client, &config)?;
    info!(
        address = %wallet.address(),
        network = %config.wallet.network,
        api = %config.rest.base_url,
        "treasury wallet ready"
    );

    match cli.command {
        Command::Send { to, amount } => {
            let sompi = parse_kas(&amount)?;
            let id = wallet.send_transaction(&to, sompi).await?;
            println!("{}", id);
        }
        Command::Balance => {
            let balance = wallet.balance().await?;
            println!("{} {} KAS", wallet.address(), format_sompi(balance));
        }
        Command::Status { txid } => {
            let id = Hash::from_hex(&txid).context("parsing transaction id")?;
            match wallet.get_transaction(&id).await? {
                Some(record) => {
                    let accepted = record.is_accepted.unwrap_or(false);
                    println!("{} accepted={}", record.transaction_id, accepted);
                    if let Some(block) = record.accepting_block_hash {
                        println!("accepting block {}", block);
                    }
                }
                None => println!("{} not found", txid),
            }
        }
        Command::FeeEstimate => {
            let estimate = wallet.api().get_fee_estimate().await?;
            println!("priority {} sompi/gram", estimate.priority_bucket.feerate);
            for bucket in &estimate.normal_buckets {
                println!("normal   {} sompi/gram ({}s)", bucket.feerate, bucket.estimated_seconds);
            }
            for bucket in &estimate.low_buckets {
                println!("low      {} sompi/gram ({}s)", bucket.feerate, bucket.estimated_seconds);
            }
        }
    }
    Ok(())
}
