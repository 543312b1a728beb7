// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use std::{fs, path::Path};

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use stardust_wallet::{
    types::{ledger::InMemoryLedger, stardust::UnixTimestamp},
    wallet::{balance_from_source, Funding, OutputBuilder, OutputParams},
};
use tracing::info;

use crate::{
    config::{ConfigError, WalletConfig},
    error::Error,
};

/// Prepares Stardust outputs and computes base coin balances.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct ClArgs {
    /// The location of the configuration file.
    #[arg(short, long, env = "CONFIG_PATH")]
    pub config: Option<String>,
    /// The human readable part of addresses on the target network.
    #[arg(long = "protocol.bech32-hrp", env = "BECH32_HRP")]
    pub bech32_hrp: Option<String>,
    /// The address storage deposits are returned to.
    #[arg(long = "wallet.return-address", env = "RETURN_ADDRESS")]
    pub return_address: Option<String>,
    /// Subcommands.
    #[command(subcommand)]
    pub subcommand: Subcommands,
}

impl ClArgs {
    /// Get a config file with CLI args applied.
    pub fn get_config(&self) -> Result<WalletConfig, ConfigError> {
        let mut config = self
            .config
            .as_ref()
            .map(WalletConfig::from_file)
            .transpose()?
            .unwrap_or_default();

        if let Some(hrp) = &self.bech32_hrp {
            config.protocol.bech32_hrp = hrp.clone();
        }
        if let Some(return_address) = &self.return_address {
            config.wallet.return_address = return_address.clone();
        }

        Ok(config)
    }

    /// Runs the selected subcommand and prints its result as JSON.
    pub fn process_subcommand(&self, config: &WalletConfig) -> Result<(), Error> {
        match &self.subcommand {
            Subcommands::PrepareOutput {
                params,
                disposable,
                excess,
            } => {
                let params = read_json::<OutputParams>(params)?;
                let context = config.build_context()?;
                let builder = OutputBuilder::new(&context);
                let prepared = if disposable.is_some() || excess.is_some() {
                    builder.build_with_funds(
                        &params,
                        Funding {
                            disposable: disposable.unwrap_or_default(),
                            excess: excess.unwrap_or_default(),
                        },
                    )?
                } else {
                    builder.build(&params)?
                };
                print_json(&prepared)
            }
            Subcommands::Balance { ledger, now } => {
                let ledger = read_json::<InMemoryLedger>(ledger)?;
                let owned = config.owned_addresses()?;
                let now = now.map(UnixTimestamp).unwrap_or_else(UnixTimestamp::now);
                info!("computing balance of {} addresses over {} outputs", owned.len(), ledger.len());
                let balance = balance_from_source(&ledger, &owned, now).unwrap_or_else(|e| match e {});
                print_json(&balance)
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Subcommands {
    /// Build the output described by a JSON request file.
    PrepareOutput {
        /// Path to the JSON encoded output parameters.
        params: String,
        /// Funds already earmarked for the transfer.
        #[arg(long)]
        disposable: Option<u64>,
        /// Other available funds that may cover a shortfall.
        #[arg(long)]
        excess: Option<u64>,
    },
    /// Compute the base coin balance of the configured addresses over a JSON ledger snapshot.
    Balance {
        /// Path to the JSON encoded list of unspent outputs.
        ledger: String,
        /// The unix time to evaluate time based unlock conditions at. Defaults to now.
        #[arg(long)]
        now: Option<u32>,
    },
}

fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, Error> {
    let display = path.as_ref().display().to_string();
    let contents = fs::read_to_string(&path).map_err(|e| Error::FileRead(display.clone(), e))?;
    serde_json::from_str(&contents).map_err(|e| Error::Json(display, e))
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::Json("<stdout>".to_string(), e))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        ClArgs::command().debug_assert();
    }

    #[test]
    fn overrides_apply() {
        let args = ClArgs::parse_from([
            "stardust-wallet",
            "--protocol.bech32-hrp",
            "rms",
            "balance",
            "ledger.json",
            "--now",
            "5",
        ]);
        let config = args.get_config().unwrap();
        assert_eq!(config.protocol.bech32_hrp, "rms");
        assert!(matches!(args.subcommand, Subcommands::Balance { now: Some(5), .. }));
    }
}
