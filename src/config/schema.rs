//! Configuration schema definitions.
//!
//! This module defines the declarative environment schema and the typed
//! aggregates built from it. Each aggregate owns a static table of
//! [`ConfigField`]s and a constructor that resolves the table against an
//! environment source exactly once.

use alloy::primitives::{Address, B256};

use crate::config::resolver::{resolve, ConfigError, EnvSource};

/// Type coercion applied to a raw environment value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Pass the raw string through unchanged.
    Str,
    /// Parse as a base-10 signed integer.
    Int,
    /// Parse a small set of truthy/falsy literals.
    Bool,
}

/// A named environment-variable binding.
///
/// Constructed once at process start as part of a static schema table and
/// immutable thereafter. A field marked required with no default fails
/// resolution when the variable is absent; a field with a default never
/// fails.
#[derive(Debug, Clone, Copy)]
pub struct ConfigField {
    /// Environment variable name.
    pub name: &'static str,

    /// Whether resolution fails when the variable is absent.
    pub required: bool,

    /// Fallback raw value used when the variable is absent.
    pub default: Option<&'static str>,

    /// Coercion applied after lookup.
    pub coercion: Coercion,
}

impl ConfigField {
    /// A required string field with no default.
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            default: None,
            coercion: Coercion::Str,
        }
    }

    /// An optional string field; absent means unset.
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            default: None,
            coercion: Coercion::Str,
        }
    }

    /// A string field with a default value.
    pub const fn with_default(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            required: false,
            default: Some(default),
            coercion: Coercion::Str,
        }
    }

    /// An integer field with a default value.
    pub const fn int_with_default(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            required: false,
            default: Some(default),
            coercion: Coercion::Int,
        }
    }

    /// A boolean field with a default value.
    pub const fn bool_with_default(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            required: false,
            default: Some(default),
            coercion: Coercion::Bool,
        }
    }
}

/// Credential fields. Owned by the process for its lifetime, never
/// persisted, never logged.
pub const SECRET_SCHEMA: &[ConfigField] = &[
    ConfigField::required("INFURA_API_KEY"),
    ConfigField::required("ETHERSCAN_API_KEY"),
    ConfigField::optional("COINMARKETCAP_API_KEY"),
    ConfigField::required("PRIVATE_KEY"),
];

/// VRF constructor parameters and numeric tuning values.
pub const VRF_SCHEMA: &[ConfigField] = &[
    ConfigField::with_default(
        "VRF_COORDINATOR",
        "0x6168499c0cFfCaCD319c818142124B7A15E857ab",
    ),
    ConfigField::with_default("LINK_TOKEN", "0x01BE23585060835E02B77ef475b0Cc51aA1e0709"),
    ConfigField::with_default("SUBSCRIPTION_ID", "0"),
    ConfigField::with_default(
        "KEY_HASH",
        "0xd89b2bf150e3b9e13446986e571fb9cab24b13cea0a43ea20a6049a85cc807cc",
    ),
    ConfigField::int_with_default("CALLBACK_GAS_LIMIT", "100000"),
    ConfigField::int_with_default("REQUEST_CONFIRMATIONS", "3"),
];

/// Reporting toggles.
pub const REPORTING_SCHEMA: &[ConfigField] = &[ConfigField::bool_with_default("REPORT_GAS", "true")];

/// Resolved credentials: RPC API key, contract-verification API key, an
/// optional pricing API key, and the deployer's signing key.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretConfig {
    pub infura_api_key: String,
    pub etherscan_api_key: String,
    pub coinmarketcap_api_key: Option<String>,
    pub private_key: String,
}

impl SecretConfig {
    /// Resolve credentials from an environment source.
    pub fn from_source<S: EnvSource>(source: &S) -> Result<Self, ConfigError> {
        let resolved = resolve(SECRET_SCHEMA, source)?;

        Ok(Self {
            infura_api_key: resolved.str("INFURA_API_KEY")?,
            etherscan_api_key: resolved.str("ETHERSCAN_API_KEY")?,
            coinmarketcap_api_key: resolved.opt_str("COINMARKETCAP_API_KEY"),
            private_key: resolved.str("PRIVATE_KEY")?,
        })
    }

    /// RPC endpoint for the target network.
    pub fn rpc_url(&self) -> String {
        format!("https://rinkeby.infura.io/v3/{}", self.infura_api_key)
    }
}

// Keep credentials out of debug output.
impl std::fmt::Debug for SecretConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretConfig")
            .field("infura_api_key", &"<redacted>")
            .field("etherscan_api_key", &"<redacted>")
            .field(
                "coinmarketcap_api_key",
                &self.coinmarketcap_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// The six positional constructor arguments for the lottery factory.
///
/// The target contract's constructor matches by position, not by name, so
/// these values must reach the deployment call in exactly this field order:
/// coordinator, fee token, key hash, subscription id, callback gas limit,
/// request confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VrfParams {
    /// VRF coordinator contract address.
    pub vrf_coordinator: Address,

    /// LINK fee-token address.
    pub link_token: Address,

    /// Gas-lane key hash for randomness requests.
    pub key_hash: B256,

    /// VRF subscription funding the requests.
    pub subscription_id: u64,

    /// Gas limit for the fulfillment callback.
    pub callback_gas_limit: u32,

    /// Confirmations the coordinator waits for before fulfilling.
    pub request_confirmations: u16,
}

impl VrfParams {
    /// Resolve and parse the constructor parameters from an environment
    /// source.
    pub fn from_source<S: EnvSource>(source: &S) -> Result<Self, ConfigError> {
        let resolved = resolve(VRF_SCHEMA, source)?;

        let vrf_coordinator = parse_address("VRF_COORDINATOR", &resolved.str("VRF_COORDINATOR")?)?;
        let link_token = parse_address("LINK_TOKEN", &resolved.str("LINK_TOKEN")?)?;
        let key_hash = parse_hash("KEY_HASH", &resolved.str("KEY_HASH")?)?;

        let subscription_id = resolved.str("SUBSCRIPTION_ID")?;
        let subscription_id =
            subscription_id
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidInt {
                    name: "SUBSCRIPTION_ID",
                    value: subscription_id,
                })?;

        let callback_gas_limit =
            int_field(resolved.int("CALLBACK_GAS_LIMIT")?, "CALLBACK_GAS_LIMIT")?;
        let request_confirmations = int_field(
            resolved.int("REQUEST_CONFIRMATIONS")?,
            "REQUEST_CONFIRMATIONS",
        )?;

        Ok(Self {
            vrf_coordinator,
            link_token,
            key_hash,
            subscription_id,
            callback_gas_limit,
            request_confirmations,
        })
    }

    /// The constructor arguments rendered in their positional order.
    ///
    /// Used for progress logging and for the verification command, which
    /// must quote the values in exactly the order the constructor received
    /// them.
    pub fn constructor_args(&self) -> [String; 6] {
        [
            self.vrf_coordinator.to_string(),
            self.link_token.to_string(),
            self.key_hash.to_string(),
            self.subscription_id.to_string(),
            self.callback_gas_limit.to_string(),
            self.request_confirmations.to_string(),
        ]
    }
}

/// Gas-usage reporting settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasReportConfig {
    /// Whether the final report includes gas usage.
    pub enabled: bool,

    /// Display currency for external gas-cost tooling.
    pub currency: &'static str,
}

impl GasReportConfig {
    /// Resolve reporting toggles from an environment source.
    pub fn from_source<S: EnvSource>(source: &S) -> Result<Self, ConfigError> {
        let resolved = resolve(REPORTING_SCHEMA, source)?;

        Ok(Self {
            enabled: resolved.bool("REPORT_GAS")?,
            currency: "USD",
        })
    }
}

fn parse_address(name: &'static str, value: &str) -> Result<Address, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidAddress {
        name,
        value: value.to_string(),
    })
}

fn parse_hash(name: &'static str, value: &str) -> Result<B256, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidHash {
        name,
        value: value.to_string(),
    })
}

fn int_field<T: TryFrom<i64>>(value: i64, name: &'static str) -> Result<T, ConfigError> {
    T::try_from(value).map_err(|_| ConfigError::InvalidInt {
        name,
        value: value.to_string(),
    })
}
