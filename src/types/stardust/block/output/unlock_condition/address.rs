// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use bee_block_stardust::output::unlock_condition as bee;
use serde::{Deserialize, Serialize};

use crate::types::stardust::block::Address;

/// Defines the address that is in control of an output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressUnlockCondition {
    /// The owning address.
    pub address: Address,
}

impl AddressUnlockCondition {
    /// The kind byte of the unlock condition.
    pub const KIND: u8 = 0;
}

impl From<Address> for AddressUnlockCondition {
    fn from(address: Address) -> Self {
        Self { address }
    }
}

impl From<AddressUnlockCondition> for bee::AddressUnlockCondition {
    fn from(value: AddressUnlockCondition) -> Self {
        Self::new(value.address.into())
    }
}
