// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Output construction and balance accounting.

mod balance;
mod builder;
mod error;
mod params;
mod storage_deposit;

pub use self::{
    balance::{balance_from_source, compute_balance, BaseCoinBalance},
    builder::{BuildContext, OutputBuilder, PreparedOutput},
    error::WalletError,
    params::{Assets, Features, NativeTokenParams, OutputParams, StorageDeposit, StorageDepositPolicy, Unlocks},
    storage_deposit::{Funding, ReturnStrategy, StorageDepositDecision},
};
