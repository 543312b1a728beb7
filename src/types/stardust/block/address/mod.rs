// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Address`] types.

use bech32::{FromBase32, ToBase32, Variant};
use bee_block_stardust::address as bee;
use serde::{Deserialize, Serialize};

mod alias;
mod ed25519;
mod nft;

pub use self::{
    alias::{AliasAddress, AliasId},
    ed25519::Ed25519Address,
    nft::NftAddress,
};
use crate::types::error::Error;

/// The different [`Address`] types supported by the network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Address {
    /// An Ed25519 address.
    Ed25519(Ed25519Address),
    /// An alias address.
    Alias(AliasAddress),
    /// An NFT address.
    Nft(NftAddress),
}

impl Address {
    /// Length of the kind byte plus the 32 byte payload every address variant carries.
    pub const PACKED_LENGTH: usize = 33;

    /// The kind byte that prefixes the address in its binary form.
    pub fn kind(&self) -> u8 {
        match self {
            Self::Ed25519(_) => Ed25519Address::KIND,
            Self::Alias(_) => AliasAddress::KIND,
            Self::Nft(_) => NftAddress::KIND,
        }
    }

    fn payload(&self) -> &[u8] {
        match self {
            Self::Ed25519(a) => a.as_ref(),
            Self::Alias(a) => a.0.as_ref(),
            Self::Nft(a) => a.0.as_ref(),
        }
    }

    /// Encodes the address as a bech32 string with the given human readable part.
    pub fn to_bech32(&self, hrp: &str) -> Result<String, Error> {
        let bytes = [[self.kind()].as_slice(), self.payload()].concat();
        Ok(bech32::encode(hrp, bytes.to_base32(), Variant::Bech32)?)
    }

    /// Decodes a bech32 encoded address, requiring it to belong to the network identified by `expected_hrp`.
    pub fn try_from_bech32(address: &str, expected_hrp: &str) -> Result<Self, Error> {
        let (hrp, data, variant) = bech32::decode(address)?;
        if hrp != expected_hrp {
            return Err(Error::Bech32Hrp {
                expected: expected_hrp.to_string(),
                found: hrp,
            });
        }
        if variant != Variant::Bech32 {
            return Err(Error::Bech32("unsupported variant bech32m".to_string()));
        }
        let bytes = Vec::<u8>::from_base32(&data)?;
        Self::try_from(bytes.as_slice())
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let (&kind, payload) = value.split_first().ok_or(Error::InvalidLength {
            expected: Self::PACKED_LENGTH,
            found: 0,
        })?;
        if value.len() != Self::PACKED_LENGTH {
            return Err(Error::InvalidLength {
                expected: Self::PACKED_LENGTH,
                found: value.len(),
            });
        }
        Ok(match kind {
            Ed25519Address::KIND => Self::Ed25519(Ed25519Address::try_from(payload)?),
            AliasAddress::KIND => Self::Alias(AliasAddress(AliasId::try_from(payload)?)),
            NftAddress::KIND => Self::Nft(NftAddress(payload.try_into()?)),
            kind => return Err(Error::InvalidAddressKind(kind)),
        })
    }
}

impl From<Ed25519Address> for Address {
    fn from(value: Ed25519Address) -> Self {
        Self::Ed25519(value)
    }
}

impl From<AliasAddress> for Address {
    fn from(value: AliasAddress) -> Self {
        Self::Alias(value)
    }
}

impl From<NftAddress> for Address {
    fn from(value: NftAddress) -> Self {
        Self::Nft(value)
    }
}

impl From<Address> for bee::Address {
    fn from(value: Address) -> Self {
        match value {
            Address::Ed25519(a) => Self::Ed25519(a.into()),
            Address::Alias(a) => Self::Alias(a.into()),
            Address::Nft(a) => Self::Nft(a.into()),
        }
    }
}

#[cfg(feature = "rand")]
mod rand {
    use super::*;

    impl Address {
        /// Generates a random ed25519 [`Address`].
        pub fn rand_ed25519() -> Self {
            Self::Ed25519(Ed25519Address::rand())
        }

        /// Generates a random alias [`Address`].
        pub fn rand_alias() -> Self {
            Self::Alias(AliasAddress::rand())
        }

        /// Generates a random nft [`Address`].
        pub fn rand_nft() -> Self {
            Self::Nft(NftAddress::rand())
        }
    }
}
