// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! The request shape used to describe an output, and its validation.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::{error::WalletError, storage_deposit::ReturnStrategy};
use crate::types::stardust::{
    block::{
        output::{Feature, NativeToken, NftId, TokenAmount, TokenId, NATIVE_TOKEN_COUNT_MAX},
        Address,
    },
    protocol::ProtocolParameters,
    timestamp::UnixTimestamp,
};

/// Describes an output to be sent to a recipient.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputParams {
    /// The bech32 encoded address of the recipient.
    pub recipient_address: String,
    /// The amount of base coins, as a decimal string.
    pub amount: String,
    /// Native tokens and NFT to send along.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Assets>,
    /// Tag and metadata features.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
    /// Time based unlock conditions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocks: Option<Unlocks>,
    /// How to proceed if `amount` does not cover the storage deposit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_deposit: Option<StorageDeposit>,
}

/// Assets attached to an output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assets {
    /// Native tokens to send.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_tokens: Option<Vec<NativeTokenParams>>,
    /// The `0x`-prefixed hex id of an NFT to send. Its presence turns the output into an NFT output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nft_id: Option<String>,
}

/// A native token entry of [`Assets`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeTokenParams {
    /// The `0x`-prefixed hex token id.
    pub id: String,
    /// The `0x`-prefixed hex amount.
    pub amount: String,
}

/// Optional features of an output. Values are `0x`-prefixed hex, anything else is taken as UTF-8 text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// Time based unlock conditions of an output, in seconds since the Unix epoch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unlocks {
    /// After this time the output can only be unlocked by the sender's return address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_unix_time: Option<i64>,
    /// Before this time the output cannot be unlocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timelock_unix_time: Option<i64>,
}

/// The storage deposit policy of a request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageDeposit {
    /// How an amount below the minimum storage deposit is made up for. Unknown values count as unset.
    #[serde(
        default,
        deserialize_with = "deserialize_return_strategy",
        skip_serializing_if = "Option::is_none"
    )]
    pub return_strategy: Option<ReturnStrategy>,
    /// Whether a shortfall may be drawn from the sender's other available funds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_excess_if_low: Option<bool>,
}

fn deserialize_return_strategy<'de, D>(deserializer: D) -> Result<Option<ReturnStrategy>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|s| match s.as_str() {
        "Return" => Some(ReturnStrategy::Return),
        "Gift" => Some(ReturnStrategy::Gift),
        _ => None,
    }))
}

/// The resolved storage deposit policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageDepositPolicy {
    /// `None` if the request did not name a usable strategy.
    pub return_strategy: Option<ReturnStrategy>,
    #[allow(missing_docs)]
    pub use_excess_if_low: bool,
}

impl OutputParams {
    /// Creates a request for `amount` base coins to `recipient_address`.
    pub fn new(recipient_address: impl Into<String>, amount: u64) -> Self {
        Self {
            recipient_address: recipient_address.into(),
            amount: amount.to_string(),
            ..Default::default()
        }
    }

    /// Adds a native token.
    pub fn with_native_token(mut self, token_id: TokenId, amount: TokenAmount) -> Self {
        self.assets
            .get_or_insert_with(Default::default)
            .native_tokens
            .get_or_insert_with(Default::default)
            .push(NativeTokenParams {
                id: token_id.to_hex(),
                amount: amount.to_string(),
            });
        self
    }

    /// Sends an NFT instead of a basic output.
    pub fn with_nft_id(mut self, nft_id: NftId) -> Self {
        self.assets.get_or_insert_with(Default::default).nft_id = Some(nft_id.to_hex());
        self
    }

    /// Sets the tag feature.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.features.get_or_insert_with(Default::default).tag = Some(tag.into());
        self
    }

    /// Sets the metadata feature.
    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.features.get_or_insert_with(Default::default).metadata = Some(metadata.into());
        self
    }

    /// Sets the expiration time.
    pub fn with_expiration(mut self, unix_time: i64) -> Self {
        self.unlocks.get_or_insert_with(Default::default).expiration_unix_time = Some(unix_time);
        self
    }

    /// Sets the timelock.
    pub fn with_timelock(mut self, unix_time: i64) -> Self {
        self.unlocks.get_or_insert_with(Default::default).timelock_unix_time = Some(unix_time);
        self
    }

    /// Sets the storage deposit policy.
    pub fn with_storage_deposit(mut self, return_strategy: ReturnStrategy, use_excess_if_low: bool) -> Self {
        self.storage_deposit = Some(StorageDeposit {
            return_strategy: Some(return_strategy),
            use_excess_if_low: Some(use_excess_if_low),
        });
        self
    }

    /// Checks the request against the protocol and converts it into ledger types.
    pub(crate) fn validate(&self, protocol: &ProtocolParameters) -> Result<ValidatedParams, WalletError> {
        let recipient = Address::try_from_bech32(&self.recipient_address, &protocol.bech32_hrp).map_err(|e| {
            WalletError::InvalidAddress {
                address: self.recipient_address.clone(),
                reason: e.to_string(),
            }
        })?;
        let amount = parse_amount("amount", &self.amount, protocol.token_supply)?;

        let assets = self.assets.as_ref();
        let native_tokens = validate_native_tokens(
            assets
                .and_then(|a| a.native_tokens.as_deref())
                .unwrap_or_default(),
        )?;
        let nft_id = assets
            .and_then(|a| a.nft_id.as_deref())
            .map(|nft_id| {
                nft_id
                    .parse::<NftId>()
                    .map_err(|e| WalletError::IncompatibleFeatureSet {
                        reason: format!("invalid nft id `{nft_id}`: {e}"),
                    })
            })
            .transpose()?;

        let features = self.features.as_ref().map(validate_features).transpose()?.unwrap_or_default();

        let unlocks = self.unlocks.as_ref();
        let expiration = unlocks
            .and_then(|u| u.expiration_unix_time)
            .map(|t| unix_time("expirationUnixTime", t))
            .transpose()?;
        let timelock = unlocks
            .and_then(|u| u.timelock_unix_time)
            .map(|t| unix_time("timelockUnixTime", t))
            .transpose()?;
        if let (Some(timelock), Some(expiration)) = (timelock, expiration) {
            if timelock >= expiration {
                return Err(WalletError::InvalidUnlockOrdering {
                    reason: format!(
                        "timelock {} must be earlier than expiration {}",
                        timelock.0, expiration.0
                    ),
                });
            }
        }

        let policy = self
            .storage_deposit
            .as_ref()
            .map(|sd| StorageDepositPolicy {
                return_strategy: sd.return_strategy,
                use_excess_if_low: sd.use_excess_if_low.unwrap_or_default(),
            })
            .unwrap_or_default();

        Ok(ValidatedParams {
            recipient,
            amount,
            native_tokens,
            nft_id,
            features,
            timelock,
            expiration,
            policy,
        })
    }
}

/// A request whose values have been checked and converted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ValidatedParams {
    pub(crate) recipient: Address,
    pub(crate) amount: u64,
    /// Ordered by token id.
    pub(crate) native_tokens: Vec<NativeToken>,
    pub(crate) nft_id: Option<NftId>,
    /// Ordered by kind.
    pub(crate) features: Vec<Feature>,
    pub(crate) timelock: Option<UnixTimestamp>,
    pub(crate) expiration: Option<UnixTimestamp>,
    pub(crate) policy: StorageDepositPolicy,
}

pub(crate) fn parse_amount(field: &str, value: &str, token_supply: u64) -> Result<u64, WalletError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WalletError::invalid_amount(field, format!("`{value}` is not a decimal number")));
    }
    let amount = value
        .parse::<u64>()
        .map_err(|e| WalletError::invalid_amount(field, e))?;
    if amount > token_supply {
        return Err(WalletError::invalid_amount(
            field,
            format!("{amount} exceeds the token supply {token_supply}"),
        ));
    }
    Ok(amount)
}

fn validate_native_tokens(params: &[NativeTokenParams]) -> Result<Vec<NativeToken>, WalletError> {
    if params.len() > NATIVE_TOKEN_COUNT_MAX {
        return Err(WalletError::invalid_amount(
            "assets.nativeTokens",
            format!("{} native tokens exceed the maximum of {NATIVE_TOKEN_COUNT_MAX}", params.len()),
        ));
    }
    let mut seen = HashSet::with_capacity(params.len());
    let mut native_tokens = params
        .iter()
        .enumerate()
        .map(|(i, NativeTokenParams { id, amount })| {
            let token_id = id
                .parse::<TokenId>()
                .map_err(|e| WalletError::invalid_amount(format!("assets.nativeTokens[{i}].id"), e))?;
            let amount = TokenAmount::from_hex(amount)
                .map_err(|e| WalletError::invalid_amount(format!("assets.nativeTokens[{i}].amount"), e))?;
            if amount.is_zero() {
                return Err(WalletError::invalid_amount(
                    format!("assets.nativeTokens[{i}].amount"),
                    "native token amounts must be nonzero",
                ));
            }
            if !seen.insert(token_id) {
                return Err(WalletError::DuplicateNativeToken { token_id });
            }
            Ok(NativeToken { token_id, amount })
        })
        .collect::<Result<Vec<_>, _>>()?;
    native_tokens.sort_by_key(|t| t.token_id);
    Ok(native_tokens)
}

/// Decodes a feature value: `0x`-prefixed hex if it is valid hex, the UTF-8 bytes of the string otherwise.
fn feature_data(value: &str) -> Vec<u8> {
    prefix_hex::decode::<Vec<u8>>(value).unwrap_or_else(|_| value.as_bytes().to_vec())
}

fn bounded_data(feature: &'static str, value: &str, max: usize) -> Result<Box<[u8]>, WalletError> {
    let data = feature_data(value);
    if data.is_empty() || data.len() > max {
        return Err(WalletError::FeatureTooLarge {
            feature,
            len: data.len(),
            max,
        });
    }
    Ok(data.into_boxed_slice())
}

fn validate_features(features: &Features) -> Result<Vec<Feature>, WalletError> {
    let mut res = Vec::new();
    if let Some(metadata) = &features.metadata {
        res.push(Feature::Metadata {
            data: bounded_data("metadata", metadata, Feature::METADATA_LENGTH_MAX)?,
        });
    }
    if let Some(tag) = &features.tag {
        res.push(Feature::Tag {
            data: bounded_data("tag", tag, Feature::TAG_LENGTH_MAX)?,
        });
    }
    Ok(res)
}

fn unix_time(field: &str, value: i64) -> Result<UnixTimestamp, WalletError> {
    u32::try_from(value)
        .ok()
        .filter(|&t| t > 0)
        .map(UnixTimestamp)
        .ok_or_else(|| WalletError::InvalidUnlockOrdering {
            reason: format!("`{field}` {value} is not a valid unix time"),
        })
}
