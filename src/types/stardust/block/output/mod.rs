// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Output`] types.

mod feature;
mod native_token;
pub mod unlock_condition;

// The different output types
pub mod basic;
pub mod nft;

use std::str::FromStr;

use bee_block_stardust::output::{self as bee, Rent};
use serde::{Deserialize, Serialize};

pub use self::{
    basic::BasicOutput,
    feature::Feature,
    native_token::{NativeToken, TokenAmount, TokenId, NATIVE_TOKEN_COUNT_MAX},
    nft::{NftId, NftOutput},
    unlock_condition::{
        AddressUnlockCondition, ExpirationUnlockCondition, StorageDepositReturnUnlockCondition,
        TimelockUnlockCondition,
    },
};
use super::{impl_id, Address};
use crate::types::{
    error::Error,
    stardust::{protocol::RentStructure, timestamp::UnixTimestamp},
};

/// The amount of base coins held by an output.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct OutputAmount(#[serde(with = "crate::types::util::stringify")] pub u64);

/// Identifies the transaction that created an output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(pub [u8; Self::LENGTH]);

impl_id!(TransactionId, 32);

/// The index of an output within a transaction.
pub type OutputIndex = u16;

/// An id which uniquely identifies an output. It is computed from the corresponding [`TransactionId`], as well as the
/// [`OutputIndex`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutputId {
    /// The transaction id part of the [`OutputId`].
    pub transaction_id: TransactionId,
    /// The output index part of the [`OutputId`].
    pub index: OutputIndex,
}

impl OutputId {
    /// Converts the [`OutputId`] to its `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        prefix_hex::encode([self.transaction_id.0.as_ref(), &self.index.to_le_bytes()].concat())
    }
}

impl From<(TransactionId, OutputIndex)> for OutputId {
    fn from((transaction_id, index): (TransactionId, OutputIndex)) -> Self {
        Self { transaction_id, index }
    }
}

impl FromStr for OutputId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = prefix_hex::decode::<Vec<u8>>(s)?;
        if bytes.len() != TransactionId::LENGTH + 2 {
            return Err(Error::InvalidLength {
                expected: TransactionId::LENGTH + 2,
                found: bytes.len(),
            });
        }
        let (transaction_id, index) = bytes.split_at(TransactionId::LENGTH);
        Ok(Self {
            transaction_id: transaction_id.try_into()?,
            index: u16::from_le_bytes([index[0], index[1]]),
        })
    }
}

/// Represents the different output types a wallet sends and receives base coins with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Output {
    /// The [`BasicOutput`] variant.
    Basic(BasicOutput),
    /// The [`NftOutput`] variant.
    Nft(NftOutput),
}

impl Output {
    /// Returns the [`Address`] in the address unlock condition of the output.
    pub fn owning_address(&self) -> &Address {
        match self {
            Self::Basic(BasicOutput {
                address_unlock_condition,
                ..
            })
            | Self::Nft(NftOutput {
                address_unlock_condition,
                ..
            }) => &address_unlock_condition.address,
        }
    }

    /// Returns the amount associated with an output.
    pub fn amount(&self) -> OutputAmount {
        match self {
            Self::Basic(BasicOutput { amount, .. }) | Self::Nft(NftOutput { amount, .. }) => *amount,
        }
    }

    /// Returns the native tokens held by the output.
    pub fn native_tokens(&self) -> &[NativeToken] {
        match self {
            Self::Basic(BasicOutput { native_tokens, .. }) | Self::Nft(NftOutput { native_tokens, .. }) => {
                native_tokens
            }
        }
    }

    /// Returns the mutable features of the output.
    pub fn features(&self) -> &[Feature] {
        match self {
            Self::Basic(BasicOutput { features, .. }) | Self::Nft(NftOutput { features, .. }) => features,
        }
    }

    /// Returns the storage deposit return unlock condition, if any.
    pub fn storage_deposit_return(&self) -> Option<&StorageDepositReturnUnlockCondition> {
        match self {
            Self::Basic(BasicOutput {
                storage_deposit_return_unlock_condition,
                ..
            })
            | Self::Nft(NftOutput {
                storage_deposit_return_unlock_condition,
                ..
            }) => storage_deposit_return_unlock_condition.as_ref(),
        }
    }

    /// Returns the timelock unlock condition, if any.
    pub fn timelock(&self) -> Option<&TimelockUnlockCondition> {
        match self {
            Self::Basic(BasicOutput {
                timelock_unlock_condition,
                ..
            })
            | Self::Nft(NftOutput {
                timelock_unlock_condition,
                ..
            }) => timelock_unlock_condition.as_ref(),
        }
    }

    /// Returns the expiration unlock condition, if any.
    pub fn expiration(&self) -> Option<&ExpirationUnlockCondition> {
        match self {
            Self::Basic(BasicOutput {
                expiration_unlock_condition,
                ..
            })
            | Self::Nft(NftOutput {
                expiration_unlock_condition,
                ..
            }) => expiration_unlock_condition.as_ref(),
        }
    }

    /// Returns the NFT id if this is an NFT output.
    pub fn nft_id(&self) -> Option<&NftId> {
        match self {
            Self::Basic(_) => None,
            Self::Nft(NftOutput { nft_id, .. }) => Some(nft_id),
        }
    }

    /// Checks if an output is trivially unlockable by only providing a signature.
    pub fn is_trivial_unlock(&self) -> bool {
        self.storage_deposit_return().is_none() && self.timelock().is_none() && self.expiration().is_none()
    }

    /// Returns the address that is able to unlock the output at `now`, ignoring any timelock.
    pub fn controller_at(&self, now: UnixTimestamp) -> &Address {
        match self.expiration() {
            Some(expiration) if expiration.is_expired(now) => &expiration.return_address,
            _ => self.owning_address(),
        }
    }

    /// Returns `true` if a timelock prevents unlocking the output at `now`.
    pub fn is_timelocked_at(&self, now: UnixTimestamp) -> bool {
        self.timelock().map_or(false, |timelock| timelock.is_locked(now))
    }

    pub(crate) fn amount_mut(&mut self) -> &mut OutputAmount {
        match self {
            Self::Basic(BasicOutput { amount, .. }) | Self::Nft(NftOutput { amount, .. }) => amount,
        }
    }

    pub(crate) fn storage_deposit_return_mut(&mut self) -> &mut Option<StorageDepositReturnUnlockCondition> {
        match self {
            Self::Basic(BasicOutput {
                storage_deposit_return_unlock_condition,
                ..
            })
            | Self::Nft(NftOutput {
                storage_deposit_return_unlock_condition,
                ..
            }) => storage_deposit_return_unlock_condition,
        }
    }

    /// The minimum amount of base coins the output has to hold to be stored in the ledger.
    ///
    /// Fails if the protocol rejects the output for reasons other than its amounts, e.g. an oversized feature.
    pub fn min_storage_deposit(&self, rent_structure: &RentStructure) -> Result<u64, Error> {
        // Amounts are packed with a fixed width, so the byte cost does not depend on them.
        let mut output = self.clone();
        *output.amount_mut() = OutputAmount(*bee::Output::AMOUNT_RANGE.end());
        if let Some(sdruc) = output.storage_deposit_return_mut() {
            sdruc.amount = *bee::Output::AMOUNT_RANGE.start();
        }
        Ok(bee::Output::try_from(output)?.rent_cost(&(*rent_structure).into()))
    }
}

impl From<BasicOutput> for Output {
    fn from(value: BasicOutput) -> Self {
        Self::Basic(value)
    }
}

impl From<NftOutput> for Output {
    fn from(value: NftOutput) -> Self {
        Self::Nft(value)
    }
}

impl TryFrom<Output> for bee::Output {
    type Error = bee_block_stardust::Error;

    fn try_from(value: Output) -> Result<Self, Self::Error> {
        Ok(match value {
            Output::Basic(o) => bee::Output::Basic(o.try_into()?),
            Output::Nft(o) => bee::Output::Nft(o.try_into()?),
        })
    }
}

#[cfg(feature = "rand")]
mod rand {
    use super::*;

    impl TransactionId {
        /// Generates a random [`TransactionId`].
        pub fn rand() -> Self {
            Self(::rand::random())
        }
    }

    impl OutputId {
        /// Generates a random [`OutputId`].
        pub fn rand() -> Self {
            Self {
                transaction_id: TransactionId::rand(),
                index: ::rand::random::<u16>() % 128,
            }
        }
    }
}
