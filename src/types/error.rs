// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors raised while decoding ledger types or handing them to the protocol crate.
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Error {
    #[error("invalid bech32 encoding: {0}")]
    Bech32(String),
    #[error("expected bech32 hrp `{expected}`, found `{found}`")]
    Bech32Hrp { expected: String, found: String },
    #[error("invalid hex: {0}")]
    Hex(String),
    #[error("rejected by the protocol: {0}")]
    Block(String),
    #[error("invalid address kind {0}")]
    InvalidAddressKind(u8),
    #[error("expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
}

impl From<bech32::Error> for Error {
    fn from(value: bech32::Error) -> Self {
        Self::Bech32(value.to_string())
    }
}

impl From<bee_block_stardust::Error> for Error {
    fn from(value: bee_block_stardust::Error) -> Self {
        Self::Block(value.to_string())
    }
}

impl From<prefix_hex::Error> for Error {
    fn from(value: prefix_hex::Error) -> Self {
        Self::Hex(value.to_string())
    }
}
