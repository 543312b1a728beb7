// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`NftOutput`].

use bee_block_stardust::output as bee;
use serde::{Deserialize, Serialize};

use super::{
    unlock_condition::{
        AddressUnlockCondition, ExpirationUnlockCondition, StorageDepositReturnUnlockCondition, TimelockUnlockCondition,
    },
    Feature, NativeToken, OutputAmount,
};
use crate::types::stardust::block::{address::NftAddress, impl_id, Address};

/// Uniquely identifies an NFT.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NftId(pub [u8; Self::LENGTH]);

impl_id!(NftId, 32);

impl NftId {
    /// The id an NFT output carries in the transaction that mints it, before it has an id of its own.
    pub fn null() -> Self {
        Self([0; Self::LENGTH])
    }

    /// Returns `true` if this is the placeholder id of an NFT that is yet to be minted.
    pub fn is_null(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// The address controlled by the owner of this NFT.
    pub fn address(&self) -> Address {
        Address::Nft(NftAddress(*self))
    }
}

impl From<NftId> for bee::NftId {
    fn from(value: NftId) -> Self {
        bee::NftId::new(value.0)
    }
}

/// Represents an NFT in the UTXO model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftOutput {
    /// Amount of base coins held by the output.
    pub amount: OutputAmount,
    /// Native tokens held by the output, ordered by token id.
    pub native_tokens: Box<[NativeToken]>,
    /// The id of the NFT.
    pub nft_id: NftId,
    /// The address unlock condition.
    pub address_unlock_condition: AddressUnlockCondition,
    /// The storage deposit return unlock condition (SDRUC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_deposit_return_unlock_condition: Option<StorageDepositReturnUnlockCondition>,
    /// The timelock unlock condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timelock_unlock_condition: Option<TimelockUnlockCondition>,
    /// The expiration unlock condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_unlock_condition: Option<ExpirationUnlockCondition>,
    /// The mutable features, ordered by kind.
    pub features: Box<[Feature]>,
    /// The features fixed when the NFT was minted, ordered by kind.
    pub immutable_features: Box<[Feature]>,
}

impl NftOutput {
    /// The kind byte of an NFT output.
    pub const KIND: u8 = 6;
}

impl TryFrom<NftOutput> for bee::NftOutput {
    type Error = bee_block_stardust::Error;

    fn try_from(value: NftOutput) -> Result<Self, Self::Error> {
        // Unlock conditions have to be sorted by kind.
        let unlock_conditions = [
            Some(bee::unlock_condition::AddressUnlockCondition::from(value.address_unlock_condition).into()),
            value
                .storage_deposit_return_unlock_condition
                .map(bee::unlock_condition::StorageDepositReturnUnlockCondition::try_from)
                .transpose()?
                .map(Into::into),
            value
                .timelock_unlock_condition
                .map(bee::unlock_condition::TimelockUnlockCondition::try_from)
                .transpose()?
                .map(Into::into),
            value
                .expiration_unlock_condition
                .map(bee::unlock_condition::ExpirationUnlockCondition::try_from)
                .transpose()?
                .map(Into::into),
        ];

        Self::build_with_amount(value.amount.0, value.nft_id.into())?
            .with_native_tokens(
                Vec::from(value.native_tokens)
                    .into_iter()
                    .map(TryInto::try_into)
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .with_unlock_conditions(unlock_conditions.into_iter().flatten())
            .with_features(
                Vec::from(value.features)
                    .into_iter()
                    .map(TryInto::try_into)
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .with_immutable_features(
                Vec::from(value.immutable_features)
                    .into_iter()
                    .map(TryInto::try_into)
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .finish()
    }
}

#[cfg(feature = "rand")]
mod rand {
    use super::*;

    impl NftId {
        /// Generates a random [`NftId`].
        pub fn rand() -> Self {
            Self(::rand::random())
        }
    }
}
