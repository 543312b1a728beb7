// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the ledger objects that make up a transaction output.

pub mod address;
pub mod output;

pub use self::{address::Address, output::Output};

/// Implements the common plumbing of fixed-length identifiers: hex parsing and formatting, and serde as a
/// `0x`-prefixed hex string.
macro_rules! impl_id {
    ($name:ident, $len:expr) => {
        impl $name {
            /// The length of the identifier in bytes.
            pub const LENGTH: usize = $len;

            /// Creates the identifier from its raw bytes.
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Converts the identifier to its `0x`-prefixed hex representation.
            pub fn to_hex(&self) -> String {
                prefix_hex::encode(self.0.as_ref())
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = $crate::types::error::Error;

            fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
                Ok(Self(value.try_into().map_err(|_| {
                    $crate::types::error::Error::InvalidLength {
                        expected: $len,
                        found: value.len(),
                    }
                })?))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::types::error::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = prefix_hex::decode::<Vec<u8>>(s)?;
                Self::try_from(bytes.as_slice())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $crate::types::util::prefix_hex_array::serialize(&self.0, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                $crate::types::util::prefix_hex_array::deserialize(deserializer).map(Self)
            }
        }
    };
}
pub(crate) use impl_id;
