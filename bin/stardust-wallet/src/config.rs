// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};
use stardust_wallet::{
    types::stardust::{block::Address, ProtocolParameters},
    wallet::BuildContext,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config at '{0}': {1}")]
    FileRead(String, std::io::Error),
    #[error("toml deserialization failed: {0}")]
    TomlDeserialization(toml::de::Error),
    #[error("invalid address '{0}' in config: {1}")]
    InvalidAddress(String, stardust_wallet::types::Error),
    #[error("no return address configured")]
    MissingReturnAddress,
}

/// Configuration of the wallet.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub protocol: ProtocolParameters,
    pub wallet: AccountConfig,
}

/// The addresses the wallet controls.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// The bech32 address storage deposits are returned to.
    pub return_address: String,
    /// Further bech32 addresses owned by the wallet.
    pub addresses: Vec<String>,
}

impl WalletConfig {
    /// Reads the config from the file located at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        fs::read_to_string(&path)
            .map_err(|e| ConfigError::FileRead(path.as_ref().display().to_string(), e))
            .and_then(|contents| toml::from_str::<Self>(&contents).map_err(ConfigError::TomlDeserialization))
    }

    fn parse_address(&self, address: &str) -> Result<Address, ConfigError> {
        Address::try_from_bech32(address, &self.protocol.bech32_hrp)
            .map_err(|e| ConfigError::InvalidAddress(address.to_string(), e))
    }

    /// The context outputs are built in.
    pub fn build_context(&self) -> Result<BuildContext, ConfigError> {
        if self.wallet.return_address.is_empty() {
            return Err(ConfigError::MissingReturnAddress);
        }
        Ok(BuildContext {
            protocol_parameters: self.protocol.clone(),
            return_address: self.parse_address(&self.wallet.return_address)?,
        })
    }

    /// All addresses owned by the wallet, including the return address.
    pub fn owned_addresses(&self) -> Result<HashSet<Address>, ConfigError> {
        std::iter::once(&self.wallet.return_address)
            .filter(|a| !a.is_empty())
            .chain(&self.wallet.addresses)
            .map(|a| self.parse_address(a))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn config_file_conformity() -> Result<(), ConfigError> {
        let config = WalletConfig::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/config.template.toml"))?;
        assert_eq!(config.protocol, ProtocolParameters::default());
        config.build_context()?;
        assert_eq!(config.owned_addresses()?.len(), 2);

        Ok(())
    }

    #[test]
    fn missing_return_address() {
        assert!(matches!(
            WalletConfig::default().build_context(),
            Err(ConfigError::MissingReturnAddress)
        ));
        assert!(WalletConfig::default().owned_addresses().unwrap().is_empty());
    }
}
