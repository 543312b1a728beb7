// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing Stardust data models.

/// Module containing the ledger objects.
pub mod block;
/// Module containing the protocol parameters.
pub mod protocol;
/// Module containing the time model of time-based unlock conditions.
pub mod timestamp;

pub use self::{
    protocol::{ProtocolParameters, RentStructure},
    timestamp::UnixTimestamp,
};
