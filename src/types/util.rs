// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Serde helpers for the wire representation of ledger values.

/// Serializes values through their [`Display`](std::fmt::Display) impl and parses them back with
/// [`FromStr`](std::str::FromStr).
///
/// Used for `u64` amounts, which are transported as decimal strings so that JSON consumers without 64-bit integers
/// do not lose precision.
pub mod stringify {
    use std::{fmt::Display, marker::PhantomData, str::FromStr};

    use serde::{de::Visitor, Deserializer, Serializer};

    /// Deserialize T using [`FromStr`]
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        struct Helper<S>(PhantomData<S>);

        impl<'de, S> Visitor<'de> for Helper<S>
        where
            S: FromStr,
            <S as FromStr>::Err: Display,
        {
            type Value = S;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "a decimal string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse::<Self::Value>().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(Helper(PhantomData))
    }

    /// Serialize T using [`Display`]
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(&value)
    }
}

/// Serializes fixed-size byte arrays as `0x`-prefixed hex strings.
pub mod prefix_hex_array {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    /// Deserialize a `[u8; N]` from a `0x`-prefixed hex string.
    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        let bytes = prefix_hex::decode::<Vec<u8>>(&hex).map_err(Error::custom)?;
        let len = bytes.len();
        bytes
            .try_into()
            .map_err(|_| Error::custom(format!("expected {N} bytes, found {len}")))
    }

    /// Serialize a `[u8; N]` as a `0x`-prefixed hex string.
    pub fn serialize<S, const N: usize>(value: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&prefix_hex::encode(value.as_ref()))
    }
}

/// Serializes boxed byte slices as `0x`-prefixed hex strings.
pub mod prefix_hex_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    /// Deserialize a `Box<[u8]>` from a `0x`-prefixed hex string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Box<[u8]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        prefix_hex::decode::<Vec<u8>>(&hex)
            .map(Vec::into_boxed_slice)
            .map_err(Error::custom)
    }

    /// Serialize a byte slice as a `0x`-prefixed hex string.
    pub fn serialize<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&prefix_hex::encode(value))
    }
}
