// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Protocol constants that influence how outputs are built and sized.

use bee_block_stardust::output as bee;
use serde::{Deserialize, Serialize};

/// Parameters relevant to byte cost calculations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RentStructure {
    pub v_byte_cost: u32,
    pub v_byte_factor_data: u8,
    pub v_byte_factor_key: u8,
}

impl Default for RentStructure {
    fn default() -> Self {
        Self {
            v_byte_cost: 100,
            v_byte_factor_data: 1,
            v_byte_factor_key: 10,
        }
    }
}

impl From<RentStructure> for bee::RentStructure {
    fn from(value: RentStructure) -> Self {
        bee::RentStructureBuilder::new()
            .byte_cost(value.v_byte_cost)
            .data_factor(value.v_byte_factor_data)
            .key_factor(value.v_byte_factor_key)
            .finish()
    }
}

/// Protocol parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ProtocolParameters {
    pub version: u8,
    pub network_name: String,
    pub bech32_hrp: String,
    pub rent_structure: RentStructure,
    #[serde(with = "crate::types::util::stringify")]
    pub token_supply: u64,
}

impl Default for ProtocolParameters {
    fn default() -> Self {
        Self {
            version: 2,
            network_name: "shimmer".to_string(),
            bech32_hrp: "smr".to_string(),
            rent_structure: RentStructure::default(),
            token_supply: 1_813_620_509_061_365,
        }
    }
}
