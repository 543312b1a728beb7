// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Construction of Stardust transaction outputs and accounting of base coin balances.

/// Module that contains the ledger types.
pub mod types;
/// Module that contains output construction and balance computation.
pub mod wallet;
