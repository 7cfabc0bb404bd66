//! # Stealth Configuration
//!
//! Unified configuration for the vault, relayer, guard and logging.
//!
//! ## Requirements
//!
//! - A governor MUST be configured; there is no default governance identity
//! - The relayer penalty MUST be non-zero

use shared_types::{Address, U256};
use sr_01_stealth_vault::prelude::VaultConfig;
use sr_02_stealth_relayer::prelude::RelayerConfig;
use sr_03_stealth_guard::prelude::GuardConfig;
use stealth_telemetry::TelemetryConfig;
use std::env;
use thiserror::Error;

/// Default vault account.
pub const DEFAULT_VAULT_ADDRESS: Address = Address::new([0x5a; 20]);

/// Default relayer account.
pub const DEFAULT_RELAYER_ADDRESS: Address = Address::new([0x5e; 20]);

/// Complete stack configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StealthConfig {
    /// Governance identity shared by all components.
    pub governor: Address,
    /// Vault account.
    pub vault_address: Address,
    /// Relayer account.
    pub relayer_address: Address,
    /// Vault configuration.
    pub vault: VaultConfig,
    /// Relayer configuration.
    pub relayer: RelayerConfig,
    /// Guard configuration.
    pub guard: GuardConfig,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
}

impl Default for StealthConfig {
    fn default() -> Self {
        Self {
            governor: Address::ZERO, // MUST be overridden
            vault_address: DEFAULT_VAULT_ADDRESS,
            relayer_address: DEFAULT_RELAYER_ADDRESS,
            vault: VaultConfig::default(),
            relayer: RelayerConfig::default(),
            guard: GuardConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No governor configured.
    #[error("governor is not set: provide SR_GOVERNOR")]
    MissingGovernor,

    /// Penalty is zero.
    #[error("relayer penalty must be greater than zero")]
    ZeroPenalty,

    /// Vault or relayer account is zero, or both share one account.
    #[error("invalid component address: {0}")]
    InvalidAddress(&'static str),

    /// A variable could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
}

impl StealthConfig {
    /// Loads overrides from the environment on top of the defaults.
    ///
    /// # Environment Variables
    ///
    /// - `SR_GOVERNOR`: governance address, hex (required)
    /// - `SR_VAULT_ADDRESS` / `SR_RELAYER_ADDRESS`: component accounts, hex
    /// - `SR_EOA_PROTECTION`: enable the EOA gas check (default: false)
    /// - `SR_GAS_BUFFER`: EOA gas tolerance (default: 69420)
    /// - `SR_PENALTY`: bond at stake per validation, decimal base units
    /// - `SR_FORCE_BLOCK_PROTECTION`: disable unprotected entry points
    /// - `SR_GUARD_OVERRIDE`: guard approves everything
    /// - `SR_GUARD_VERIFY_RELAYER`: guard only trusts the relayer
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(value) = lookup("SR_GOVERNOR") {
            config.governor = parse_address("SR_GOVERNOR", &value)?;
        }
        if let Some(value) = lookup("SR_VAULT_ADDRESS") {
            config.vault_address = parse_address("SR_VAULT_ADDRESS", &value)?;
        }
        if let Some(value) = lookup("SR_RELAYER_ADDRESS") {
            config.relayer_address = parse_address("SR_RELAYER_ADDRESS", &value)?;
        }
        if let Some(value) = lookup("SR_EOA_PROTECTION") {
            config.vault.eoa_auth_call_protection = parse_bool("SR_EOA_PROTECTION", &value)?;
        }
        if let Some(value) = lookup("SR_GAS_BUFFER") {
            config.vault.gas_buffer = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SR_GAS_BUFFER",
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup("SR_PENALTY") {
            config.relayer.penalty =
                U256::from_dec_str(value.trim()).map_err(|_| ConfigError::InvalidValue {
                    key: "SR_PENALTY",
                    value: value.clone(),
                })?;
        }
        if let Some(value) = lookup("SR_FORCE_BLOCK_PROTECTION") {
            config.relayer.force_block_protection =
                parse_bool("SR_FORCE_BLOCK_PROTECTION", &value)?;
        }
        if let Some(value) = lookup("SR_GUARD_OVERRIDE") {
            config.guard.override_guard_checks = parse_bool("SR_GUARD_OVERRIDE", &value)?;
        }
        if let Some(value) = lookup("SR_GUARD_VERIFY_RELAYER") {
            config.guard.verify_stealth_relayer = parse_bool("SR_GUARD_VERIFY_RELAYER", &value)?;
        }

        Ok(config)
    }

    /// Checks the configuration can be deployed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.governor.is_zero() {
            return Err(ConfigError::MissingGovernor);
        }
        if self.relayer.penalty.is_zero() {
            return Err(ConfigError::ZeroPenalty);
        }
        if self.vault_address.is_zero() {
            return Err(ConfigError::InvalidAddress("vault"));
        }
        if self.relayer_address.is_zero() {
            return Err(ConfigError::InvalidAddress("relayer"));
        }
        if self.vault_address == self.relayer_address {
            return Err(ConfigError::InvalidAddress("vault and relayer share an account"));
        }
        Ok(())
    }
}

fn parse_address(key: &'static str, value: &str) -> Result<Address, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    };
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|_| invalid())?;
    Address::from_slice(&bytes).ok_or_else(invalid)
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
