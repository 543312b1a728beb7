// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use bee_block_stardust::address as bee;
use serde::{Deserialize, Serialize};

use crate::types::stardust::block::output::NftId;

/// An NFT address, which is controlled by whoever owns the NFT with the same id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NftAddress(pub NftId);

impl NftAddress {
    /// The kind byte of an NFT address.
    pub const KIND: u8 = 16;
}

impl From<NftId> for NftAddress {
    fn from(value: NftId) -> Self {
        Self(value)
    }
}

impl From<NftAddress> for bee::NftAddress {
    fn from(value: NftAddress) -> Self {
        bee::NftAddress::new(value.0.into())
    }
}

#[cfg(feature = "rand")]
mod rand {
    use super::*;

    impl NftAddress {
        /// Generates a random [`NftAddress`].
        pub fn rand() -> Self {
            Self(NftId::rand())
        }
    }
}
