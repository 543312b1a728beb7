// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use bee_block_stardust::{address as bee, output::AliasId as BeeAliasId};
use serde::{Deserialize, Serialize};

use crate::types::stardust::block::impl_id;

/// Uniquely identifies an alias chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AliasId(pub [u8; Self::LENGTH]);

impl_id!(AliasId, 32);

/// An address of an alias.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasAddress(pub AliasId);

impl AliasAddress {
    /// The kind byte of an alias address.
    pub const KIND: u8 = 8;
}

impl From<AliasAddress> for bee::AliasAddress {
    fn from(value: AliasAddress) -> Self {
        bee::AliasAddress::new(BeeAliasId::new(value.0 .0))
    }
}

#[cfg(feature = "rand")]
mod rand {
    use super::*;

    impl AliasAddress {
        /// Generates a random [`AliasAddress`].
        pub fn rand() -> Self {
            Self(AliasId(::rand::random()))
        }
    }
}
