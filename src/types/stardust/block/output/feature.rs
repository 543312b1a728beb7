// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Feature`]s an output can carry.

use bee_block_stardust::output::feature as bee;
use serde::{Deserialize, Serialize};

use crate::types::stardust::block::Address;

/// The different [`Feature`] variants.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Feature {
    /// The sender feature.
    Sender {
        /// The address associated with the feature.
        address: Address,
    },
    /// The issuer feature.
    Issuer {
        /// The address associated with the feature.
        address: Address,
    },
    /// The metadata feature.
    Metadata {
        /// The data of the feature.
        #[serde(with = "crate::types::util::prefix_hex_bytes")]
        data: Box<[u8]>,
    },
    /// The tag feature.
    Tag {
        /// The data of the feature.
        #[serde(with = "crate::types::util::prefix_hex_bytes")]
        data: Box<[u8]>,
    },
}

impl Feature {
    /// The maximum length of the data in a [`Feature::Metadata`].
    pub const METADATA_LENGTH_MAX: usize = 8192;
    /// The maximum length of the data in a [`Feature::Tag`].
    pub const TAG_LENGTH_MAX: usize = 64;

    /// The kind byte of the feature. Features within an output are ordered by it.
    pub fn kind(&self) -> u8 {
        match self {
            Self::Sender { .. } => 0,
            Self::Issuer { .. } => 1,
            Self::Metadata { .. } => 2,
            Self::Tag { .. } => 3,
        }
    }
}

impl TryFrom<Feature> for bee::Feature {
    type Error = bee_block_stardust::Error;

    fn try_from(value: Feature) -> Result<Self, Self::Error> {
        Ok(match value {
            Feature::Sender { address } => bee::Feature::Sender(bee::SenderFeature::new(address.into())),
            Feature::Issuer { address } => bee::Feature::Issuer(bee::IssuerFeature::new(address.into())),
            Feature::Metadata { data } => bee::Feature::Metadata(bee::MetadataFeature::new(data.into())?),
            Feature::Tag { data } => bee::Feature::Tag(bee::TagFeature::new(data.into())?),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_feature_conversion() {
        let tag = Feature::Tag {
            data: vec![1; Feature::TAG_LENGTH_MAX].into_boxed_slice(),
        };
        assert_eq!(bee::Feature::try_from(tag.clone()).unwrap().kind(), tag.kind());
        assert!(bee::Feature::try_from(Feature::Tag {
            data: vec![1; Feature::TAG_LENGTH_MAX + 1].into_boxed_slice(),
        })
        .is_err());

        let metadata = Feature::Metadata {
            data: vec![0; Feature::METADATA_LENGTH_MAX].into_boxed_slice(),
        };
        assert!(bee::Feature::try_from(metadata).is_ok());
        assert!(bee::Feature::try_from(Feature::Metadata {
            data: Box::default(),
        })
        .is_err());
    }

    #[test]
    fn test_feature_json() {
        let tag = Feature::Tag {
            data: b"hi".to_vec().into_boxed_slice(),
        };
        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "tag", "data": "0x6869" }));
        assert_eq!(serde_json::from_value::<Feature>(json).unwrap(), tag);
    }
}
