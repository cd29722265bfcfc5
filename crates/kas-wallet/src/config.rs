//! Treasury and wallet configuration.
//!
//! The hosting application supplies the private key and treasury address,
//! either directly or through environment variables read by
//! [`TreasuryConfig::from_env`].

use std::fmt;
use std::str::FromStr;

use kas_rest::RestConfig;
use kas_script::{Address, Prefix};

use crate::WalletError;

/// Hex private key of the treasury.
pub const ENV_PRIVATE_KEY: &str = "KASPA_TREASURY_PRIVATE_KEY";
/// Configured treasury address.
pub const ENV_TREASURY_ADDRESS: &str = "KASPA_TREASURY_ADDRESS";
/// Optional REST base URL.
pub const ENV_API_URL: &str = "KASPA_API_URL";
/// Optional fixed fee in sompi.
pub const ENV_FEE_SOMPI: &str = "KASPA_FEE_SOMPI";
/// Optional network name (`mainnet`, `testnet`, `simnet`, `devnet` or an address prefix).
pub const ENV_NETWORK: &str = "KASPA_NETWORK";

/// Fee charged when none is configured.
pub const DEFAULT_FEE_SOMPI: u64 = 10_000;

/// How the fee of a send is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeePolicy {
    /// Fee in sompi charged for every transaction.
    pub fixed_fee: u64,
}

impl FeePolicy {
    /// A policy charging `fee` sompi per transaction.
    pub fn fixed(fee: u64) -> Self {
        FeePolicy { fixed_fee: fee }
    }

    /// The fee for the transaction being built.
    pub fn fee(&self) -> u64 {
        self.fixed_fee
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        FeePolicy::fixed(DEFAULT_FEE_SOMPI)
    }
}

/// Settings that shape transaction assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    /// Network all addresses must belong to.
    pub network: Prefix,
    /// Fee selection.
    pub fee_policy: FeePolicy,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: Prefix::Mainnet,
            fee_policy: FeePolicy::default(),
        }
    }
}

/// Everything needed to run a treasury wallet.
#[derive(Clone)]
pub struct TreasuryConfig {
    /// Hex-encoded private key.
    pub private_key_hex: String,
    /// The treasury address the key is expected to control.
    pub treasury_address: String,
    /// REST client settings.
    pub rest: RestConfig,
    /// Assembly settings.
    pub wallet: WalletConfig,
}

impl TreasuryConfig {
    /// Load the configuration from the process environment.
    ///
    /// # Returns
    /// The configuration, or `Configuration` naming the missing or invalid variable.
    pub fn from_env() -> Result<Self, WalletError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    ///
    /// `KASPA_TREASURY_PRIVATE_KEY` and `KASPA_TREASURY_ADDRESS` are
    /// required. When `KASPA_NETWORK` is unset the network is taken from
    /// the treasury address prefix.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WalletError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| WalletError::Configuration(format!("{name} is not set")))
        };
        let optional = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let private_key_hex = required(ENV_PRIVATE_KEY)?;
        let treasury_address = required(ENV_TREASURY_ADDRESS)?;

        let address = Address::from_str(&treasury_address)
            .map_err(|e| WalletError::Configuration(format!("{ENV_TREASURY_ADDRESS} is invalid: {e}")))?;

        let network = match optional(ENV_NETWORK) {
            Some(name) => Prefix::from_str(&name)
                .map_err(|e| WalletError::Configuration(format!("{ENV_NETWORK} is invalid: {e}")))?,
            None => address.prefix,
        };
        if network != address.prefix {
            return Err(WalletError::Configuration(format!(
                "{ENV_TREASURY_ADDRESS} is a {} address but {ENV_NETWORK} selects {}",
                address.prefix, network
            )));
        }

        let fee_policy = match optional(ENV_FEE_SOMPI) {
            Some(fee) => FeePolicy::fixed(fee.parse::<u64>().map_err(|_| {
                WalletError::Configuration(format!("{ENV_FEE_SOMPI} is not an integer: {fee:?}"))
            })?),
            None => FeePolicy::default(),
        };

        let mut rest = RestConfig::default();
        if let Some(url) = optional(ENV_API_URL) {
            rest.base_url = url;
        }

        Ok(TreasuryConfig {
            private_key_hex,
            treasury_address,
            rest,
            wallet: WalletConfig { network, fee_policy },
        })
    }
}

// Never print the key.
impl fmt::Debug for TreasuryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreasuryConfig")
            .field("private_key_hex", &"<redacted>")
            .field("treasury_address", &self.treasury_address)
            .field("rest", &self.rest)
            .field("wallet", &self.wallet)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "b7e151628aed2a6abf7158809cf4f3c762e7160f38b4da56a784d9045190cfef";

    fn testnet_address() -> String {
        Address::from_public_key(Prefix::Testnet, &[7u8; 32]).to_string()
    }

    fn env(pairs: &[(&str, String)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_minimal_env() {
        let cfg = TreasuryConfig::from_lookup(env(&[
            (ENV_PRIVATE_KEY, KEY.to_string()),
            (ENV_TREASURY_ADDRESS, testnet_address()),
        ]))
        .unwrap();
        assert_eq!(cfg.wallet.network, Prefix::Testnet);
        assert_eq!(cfg.wallet.fee_policy.fee(), DEFAULT_FEE_SOMPI);
        assert_eq!(cfg.rest.base_url, RestConfig::default().base_url);
    }

    #[test]
    fn test_optional_overrides() {
        let cfg = TreasuryConfig::from_lookup(env(&[
            (ENV_PRIVATE_KEY, KEY.to_string()),
            (ENV_TREASURY_ADDRESS, testnet_address()),
            (ENV_API_URL, "https://api-tn10.kaspa.org".to_string()),
            (ENV_FEE_SOMPI, "2500".to_string()),
            (ENV_NETWORK, "testnet".to_string()),
        ]))
        .unwrap();
        assert_eq!(cfg.rest.base_url, "https://api-tn10.kaspa.org");
        assert_eq!(cfg.wallet.fee_policy, FeePolicy::fixed(2_500));
    }

    #[test]
    fn test_missing_variables_are_named() {
        let err = TreasuryConfig::from_lookup(env(&[(ENV_TREASURY_ADDRESS, testnet_address())])).unwrap_err();
        assert!(err.to_string().contains(ENV_PRIVATE_KEY));

        let err = TreasuryConfig::from_lookup(env(&[
            (ENV_PRIVATE_KEY, KEY.to_string()),
            (ENV_TREASURY_ADDRESS, "  ".to_string()),
        ]))
        .unwrap_err();
        assert!(matches!(err, WalletError::Configuration(ref m) if m.contains(ENV_TREASURY_ADDRESS)));
    }

    #[test]
    fn test_invalid_values_are_named() {
        let err = TreasuryConfig::from_lookup(env(&[
            (ENV_PRIVATE_KEY, KEY.to_string()),
            (ENV_TREASURY_ADDRESS, testnet_address()),
            (ENV_FEE_SOMPI, "0.1".to_string()),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ENV_FEE_SOMPI));

        let err = TreasuryConfig::from_lookup(env(&[
            (ENV_PRIVATE_KEY, KEY.to_string()),
            (ENV_TREASURY_ADDRESS, testnet_address()),
            (ENV_NETWORK, "mainnet".to_string()),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ENV_NETWORK));

        let err = TreasuryConfig::from_lookup(env(&[
            (ENV_PRIVATE_KEY, KEY.to_string()),
            (ENV_TREASURY_ADDRESS, "kaspa:nope".to_string()),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ENV_TREASURY_ADDRESS));
    }

    #[test]
    fn test_debug_redacts_key() {
        let cfg = TreasuryConfig::from_lookup(env(&[
            (ENV_PRIVATE_KEY, KEY.to_string()),
            (ENV_TREASURY_ADDRESS, testnet_address()),
        ]))
        .unwrap();
        assert!(!format!("{:?}", cfg).contains(KEY));
    }
}
