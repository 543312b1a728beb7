// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`BasicOutput`].

use bee_block_stardust::output as bee;
use serde::{Deserialize, Serialize};

use super::{
    unlock_condition::{
        AddressUnlockCondition, ExpirationUnlockCondition, StorageDepositReturnUnlockCondition, TimelockUnlockCondition,
    },
    Feature, NativeToken, OutputAmount,
};

/// Represents a basic output in the UTXO model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicOutput {
    /// Amount of base coins held by the output.
    pub amount: OutputAmount,
    /// Native tokens held by the output, ordered by token id.
    pub native_tokens: Box<[NativeToken]>,
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
    /// The corresponding list of [`Feature`]s, ordered by kind.
    pub features: Box<[Feature]>,
}

impl BasicOutput {
    /// The kind byte of a basic output.
    pub const KIND: u8 = 3;
}

impl TryFrom<BasicOutput> for bee::BasicOutput {
    type Error = bee_block_stardust::Error;

    fn try_from(value: BasicOutput) -> Result<Self, Self::Error> {
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

        Self::build_with_amount(value.amount.0)?
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
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::stardust::block::{address::Ed25519Address, Address};

    fn minimal(amount: u64) -> BasicOutput {
        BasicOutput {
            amount: OutputAmount(amount),
            native_tokens: Box::default(),
            address_unlock_condition: Address::Ed25519(Ed25519Address::new([0; 32])).into(),
            storage_deposit_return_unlock_condition: None,
            timelock_unlock_condition: None,
            expiration_unlock_condition: None,
            features: Box::default(),
        }
    }

    #[test]
    fn test_basic_output_conversion() {
        let mut output = minimal(42600);
        output.storage_deposit_return_unlock_condition = Some(StorageDepositReturnUnlockCondition {
            return_address: Address::Ed25519(Ed25519Address::new([1; 32])),
            amount: 42600,
        });
        let converted = bee::BasicOutput::try_from(output).unwrap();
        assert_eq!(converted.amount(), 42600);
        assert!(converted.unlock_conditions().storage_deposit_return().is_some());
    }

    #[test]
    fn test_basic_output_conversion_rejects_zero_amount() {
        assert!(bee::BasicOutput::try_from(minimal(0)).is_err());
    }
}
