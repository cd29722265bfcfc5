#![deny(missing_docs)]

//! # kas-rest
//!
//! HTTP client for the Kaspa REST API: fetching the unspent outputs of an
//! address, submitting signed transactions, looking transactions up by id
//! and reading the node's fee estimate.
//!
//! The [`KaspaApi`] trait is the seam the wallet depends on, so tests can
//! replace the network with an in-memory double.
//!
//! # Example
//!
//! ```no_run
//! use kas_rest::{KaspaRestClient, RestConfig};
//!
//! let client = KaspaRestClient::new(RestConfig {
//!     base_url: "https://api.kaspa.org".to_string(),
//!     ..Default::default()
//! })
//! .unwrap();
//! ```

pub mod client;
pub mod error;
pub mod types;


pub use client::{KaspaApi, KaspaRestClient};
pub use error::RestError;
pub use types::{FeeEstimate, RestConfig, SubmitResponse, TransactionRecord};
