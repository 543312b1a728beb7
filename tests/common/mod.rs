// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use stardust_wallet::{
    types::stardust::{
        block::{
            address::Ed25519Address,
            output::{
                BasicOutput, ExpirationUnlockCondition, OutputAmount, StorageDepositReturnUnlockCondition,
                TimelockUnlockCondition,
            },
            Address,
        },
        ProtocolParameters, RentStructure, UnixTimestamp,
    },
    wallet::{BuildContext, OutputParams},
};

pub const HRP: &str = "rms";

#[allow(unused)]
pub fn address(byte: u8) -> Address {
    Address::Ed25519(Ed25519Address::new([byte; 32]))
}

/// A context whose rent structure makes a plain basic output to an ed25519 address cost exactly 50000.
#[allow(unused)]
pub fn context() -> BuildContext {
    BuildContext {
        protocol_parameters: ProtocolParameters {
            bech32_hrp: HRP.to_string(),
            rent_structure: RentStructure {
                v_byte_cost: 20,
                v_byte_factor_data: 1,
                v_byte_factor_key: 71,
            },
            ..Default::default()
        },
        return_address: address(0xee),
    }
}

#[allow(unused)]
pub fn request(amount: u64) -> OutputParams {
    OutputParams::new(address(1).to_bech32(HRP).unwrap(), amount)
}

#[allow(unused)]
pub fn basic_output(owner: Address, amount: u64) -> BasicOutput {
    BasicOutput {
        amount: OutputAmount(amount),
        native_tokens: Box::default(),
        address_unlock_condition: owner.into(),
        storage_deposit_return_unlock_condition: None,
        timelock_unlock_condition: None,
        expiration_unlock_condition: None,
        features: Box::default(),
    }
}

#[allow(unused)]
pub fn with_timelock(mut output: BasicOutput, until: u32) -> BasicOutput {
    output.timelock_unlock_condition = Some(TimelockUnlockCondition {
        timestamp: UnixTimestamp(until),
    });
    output
}

#[allow(unused)]
pub fn with_expiration(mut output: BasicOutput, return_address: Address, at: u32) -> BasicOutput {
    output.expiration_unlock_condition = Some(ExpirationUnlockCondition {
        return_address,
        timestamp: UnixTimestamp(at),
    });
    output
}

#[allow(unused)]
pub fn with_storage_deposit_return(mut output: BasicOutput, return_address: Address, amount: u64) -> BasicOutput {
    output.storage_deposit_return_unlock_condition = Some(StorageDepositReturnUnlockCondition {
        return_address,
        amount,
    });
    output
}
