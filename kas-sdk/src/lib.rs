#![deny(missing_docs)]

//! Kaspa treasury SDK.
//!
//! Re-exports all components for convenient single-crate usage.

pub use kas_primitives as primitives;
pub use kas_script as script;
pub use kas_transaction as transaction;
pub use kas_rest as rest;
pub use kas_wallet as wallet;

/// Install a `tracing` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
