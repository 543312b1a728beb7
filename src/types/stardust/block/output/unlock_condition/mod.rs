// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the unlock conditions that basic and NFT outputs can carry.

mod address;
mod expiration;
mod storage_deposit_return;
mod timelock;

pub use self::{
    address::AddressUnlockCondition, expiration::ExpirationUnlockCondition,
    storage_deposit_return::StorageDepositReturnUnlockCondition, timelock::TimelockUnlockCondition,
};

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::stardust::{
        block::address::{Address, Ed25519Address},
        timestamp::UnixTimestamp,
    };

    #[test]
    fn test_time_checks() {
        let timelock = TimelockUnlockCondition {
            timestamp: UnixTimestamp(100),
        };
        assert!(timelock.is_locked(UnixTimestamp(99)));
        assert!(!timelock.is_locked(UnixTimestamp(100)));

        let expiration = ExpirationUnlockCondition {
            return_address: Address::Ed25519(Ed25519Address::new([2; 32])),
            timestamp: UnixTimestamp(100),
        };
        assert!(!expiration.is_expired(UnixTimestamp(99)));
        assert!(expiration.is_expired(UnixTimestamp(100)));
    }
}
