// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use bee_block_stardust::output::unlock_condition as bee;
use serde::{Deserialize, Serialize};

use crate::types::stardust::timestamp::UnixTimestamp;

/// Prevents an output from being unlocked before a certain point in time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimelockUnlockCondition {
    /// The output can be unlocked from this time on.
    pub timestamp: UnixTimestamp,
}

impl TimelockUnlockCondition {
    /// The kind byte of the unlock condition.
    pub const KIND: u8 = 2;

    /// Returns `true` if the output cannot be unlocked yet at `now`.
    pub fn is_locked(&self, now: UnixTimestamp) -> bool {
        now < self.timestamp
    }
}

impl TryFrom<TimelockUnlockCondition> for bee::TimelockUnlockCondition {
    type Error = bee_block_stardust::Error;

    fn try_from(value: TimelockUnlockCondition) -> Result<Self, Self::Error> {
        Self::new(value.timestamp.0)
    }
}
