// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use bee_block_stardust::output::unlock_condition as bee;
use serde::{Deserialize, Serialize};

use crate::types::stardust::{block::Address, timestamp::UnixTimestamp};

/// Hands control of an output over to the return address once a point in time has passed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpirationUnlockCondition {
    /// The address that can unlock the expired output.
    pub return_address: Address,
    /// The time from which on only `return_address` can unlock the output.
    pub timestamp: UnixTimestamp,
}

impl ExpirationUnlockCondition {
    /// The kind byte of the unlock condition.
    pub const KIND: u8 = 3;

    /// Returns `true` if control has passed to the return address at `now`.
    pub fn is_expired(&self, now: UnixTimestamp) -> bool {
        now >= self.timestamp
    }
}

impl TryFrom<ExpirationUnlockCondition> for bee::ExpirationUnlockCondition {
    type Error = bee_block_stardust::Error;

    fn try_from(value: ExpirationUnlockCondition) -> Result<Self, Self::Error> {
        Self::new(value.return_address.into(), value.timestamp.0)
    }
}
