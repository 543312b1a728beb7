// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`NativeToken`] type.

use std::{fmt, str::FromStr};

use bee_block_stardust::output as bee;
use primitive_types::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{error::Error, stardust::block::impl_id};

/// The maximum number of distinct native tokens a single output may hold.
pub const NATIVE_TOKEN_COUNT_MAX: usize = 64;

/// Uniquely identifies a native token: the id of the foundry that minted it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(pub [u8; Self::LENGTH]);

impl_id!(TokenId, 38);

/// An amount of native tokens, an unsigned 256-bit integer.
///
/// Serialized as a `0x`-prefixed hex number without leading zeros.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(pub U256);

impl TokenAmount {
    /// Parses a `0x`-prefixed hex number of at most 256 bits.
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| Error::Hex(format!("missing `0x` prefix in `{s}`")))?;
        if digits.is_empty() || digits.len() > 64 {
            return Err(Error::Hex(format!("`{s}` is not a 256-bit hex number")));
        }
        U256::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| Error::Hex(format!("`{s}`: {e:?}")))
    }

    /// Returns `true` if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl FromStr for TokenAmount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}

/// An amount of a specific native token held by an output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeToken {
    /// The token id.
    pub token_id: TokenId,
    /// The amount of tokens.
    pub amount: TokenAmount,
}

impl TryFrom<NativeToken> for bee::NativeToken {
    type Error = bee_block_stardust::Error;

    fn try_from(value: NativeToken) -> Result<Self, Self::Error> {
        Self::new(bee::TokenId::new(value.token_id.0), value.amount.0)
    }
}

#[cfg(feature = "rand")]
mod rand {
    use ::rand::Rng;

    use super::*;

    impl TokenId {
        /// Generates a random [`TokenId`].
        pub fn rand() -> Self {
            let mut bytes = [0u8; Self::LENGTH];
            ::rand::thread_rng().fill(&mut bytes[..]);
            Self(bytes)
        }
    }

    impl NativeToken {
        /// Generates a random [`NativeToken`] with a nonzero amount.
        pub fn rand() -> Self {
            Self {
                token_id: TokenId::rand(),
                amount: ::rand::thread_rng().gen_range(1..u64::MAX).into(),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_token_amount_hex() {
        assert_eq!(TokenAmount::from_hex("0x64").unwrap(), TokenAmount::from(100));
        assert_eq!(TokenAmount::from(100).to_string(), "0x64");
        let max = format!("0x{}", "f".repeat(64));
        assert_eq!(TokenAmount::from_hex(&max).unwrap(), TokenAmount(U256::MAX));
        assert!(TokenAmount::from_hex(&format!("0x1{}", "0".repeat(64))).is_err());
        assert!(TokenAmount::from_hex("100").is_err());
        assert!(TokenAmount::from_hex("0x").is_err());
        assert!(TokenAmount::from_hex("0xzz").is_err());
    }

    #[test]
    fn test_native_token_conversion() {
        let token = NativeToken {
            token_id: TokenId::new([1; 38]),
            amount: 5.into(),
        };
        assert_eq!(
            bee::NativeToken::try_from(token).unwrap(),
            bee::NativeToken::new(bee::TokenId::new([1; 38]), U256::from(5)).unwrap()
        );
    }

    #[test]
    fn test_native_token_json() {
        let token = NativeToken {
            token_id: TokenId::new([0xab; 38]),
            amount: 255.into(),
        };
        let json = serde_json::to_value(token).unwrap();
        assert_eq!(json["amount"], "0xff");
        assert_eq!(serde_json::from_value::<NativeToken>(json).unwrap(), token);
    }
}
