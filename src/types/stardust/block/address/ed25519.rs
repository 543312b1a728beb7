// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use bee_block_stardust::address as bee;

use crate::types::stardust::block::impl_id;

/// A regular Ed25519 address, the BLAKE2b-256 hash of an Ed25519 public key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ed25519Address(pub [u8; Self::LENGTH]);

impl_id!(Ed25519Address, 32);

impl Ed25519Address {
    /// The kind byte of an Ed25519 address.
    pub const KIND: u8 = 0;
}

impl From<Ed25519Address> for bee::Ed25519Address {
    fn from(value: Ed25519Address) -> Self {
        bee::Ed25519Address::new(value.0)
    }
}

#[cfg(feature = "rand")]
mod rand {
    use super::*;

    impl Ed25519Address {
        /// Generates a random [`Ed25519Address`].
        pub fn rand() -> Self {
            Self(::rand::random())
        }
    }
}
