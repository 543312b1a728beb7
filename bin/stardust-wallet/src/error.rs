// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use stardust_wallet::wallet::WalletError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read '{0}': {1}")]
    FileRead(String, std::io::Error),
    #[error("invalid json in '{0}': {1}")]
    Json(String, serde_json::Error),
    #[error(transparent)]
    Wallet(#[from] WalletError),
}
