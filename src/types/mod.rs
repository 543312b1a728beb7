// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module that contains the types.

mod error;
pub mod ledger;
pub mod stardust;
pub mod util;

pub use self::error::Error;
