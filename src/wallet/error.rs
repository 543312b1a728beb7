// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

use crate::types::stardust::block::output::TokenId;

/// Errors raised while validating an output request or building the output.
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum WalletError {
    #[error("invalid amount in `{field}`: {reason}")]
    InvalidAmount { field: String, reason: String },
    #[error("native token {token_id} appears more than once")]
    DuplicateNativeToken { token_id: TokenId },
    #[error("{feature} feature of {len} bytes is outside the allowed range 1..={max}")]
    FeatureTooLarge {
        feature: &'static str,
        len: usize,
        max: usize,
    },
    #[error("invalid unlock times: {reason}")]
    InvalidUnlockOrdering { reason: String },
    #[error("invalid address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("incompatible feature set: {reason}")]
    IncompatibleFeatureSet { reason: String },
    #[error("amount {amount} is below the minimum storage deposit {minimum} and no return strategy is set")]
    MissingStorageDepositPolicy { amount: u64, minimum: u64 },
    #[error("insufficient funds: {required} required, {available} available")]
    InsufficientFunds { required: u64, available: u64 },
}

impl WalletError {
    pub(crate) fn invalid_amount(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidAmount {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}
