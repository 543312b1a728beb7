// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use bee_block_stardust::output::unlock_condition as bee;
use serde::{Deserialize, Serialize};

use crate::types::stardust::block::Address;

/// Defines the amount of tokens used as storage deposit that have to be returned to the return address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageDepositReturnUnlockCondition {
    /// The address the deposit is returned to.
    pub return_address: Address,
    /// The amount the consuming transaction has to deposit to `return_address`.
    #[serde(with = "crate::types::util::stringify")]
    pub amount: u64,
}

impl StorageDepositReturnUnlockCondition {
    /// The kind byte of the unlock condition.
    pub const KIND: u8 = 1;
}

impl TryFrom<StorageDepositReturnUnlockCondition> for bee::StorageDepositReturnUnlockCondition {
    type Error = bee_block_stardust::Error;

    fn try_from(value: StorageDepositReturnUnlockCondition) -> Result<Self, Self::Error> {
        Self::new(value.return_address.into(), value.amount)
    }
}
