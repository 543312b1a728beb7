// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Builds outputs from [`OutputParams`].

use serde::Serialize;
use tracing::{debug, instrument};

use super::{
    error::WalletError,
    params::{OutputParams, ValidatedParams},
    storage_deposit::{Funding, Settlement, StorageDepositDecision, StorageDepositResolver},
};
use crate::types::{
    ledger::NftOutputSource,
    stardust::{
        block::{
            output::{
                BasicOutput, ExpirationUnlockCondition, Feature, NativeToken, NftId, NftOutput, OutputAmount,
                TimelockUnlockCondition, NATIVE_TOKEN_COUNT_MAX,
            },
            Address, Output,
        },
        protocol::ProtocolParameters,
    },
};

/// What the builder needs to know about the network and the sender.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildContext {
    /// Parameters of the network the output is built for.
    pub protocol_parameters: ProtocolParameters,
    /// The sender's address that storage deposits are returned to and that expired outputs fall back to.
    pub return_address: Address,
}

/// An output ready to be put into a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PreparedOutput {
    output: Output,
    #[serde(with = "crate::types::util::stringify")]
    min_storage_deposit: u64,
    decision: StorageDepositDecision,
    #[serde(with = "crate::types::util::stringify")]
    drawn_from_excess: u64,
    #[serde(with = "crate::types::util::stringify")]
    folded_remainder: u64,
}

impl PreparedOutput {
    /// The built output.
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Consumes `self`, returning the built output.
    pub fn into_output(self) -> Output {
        self.output
    }

    /// The minimum storage deposit the output was sized with.
    pub fn min_storage_deposit(&self) -> u64 {
        self.min_storage_deposit
    }

    /// How the amount was reconciled with the storage deposit.
    pub fn decision(&self) -> StorageDepositDecision {
        self.decision
    }

    /// The part of the amount that is paid from the sender's excess funds.
    pub fn drawn_from_excess(&self) -> u64 {
        self.drawn_from_excess
    }

    /// The leftover of the sender's disposable funds that was added to the output.
    pub fn folded_remainder(&self) -> u64 {
        self.folded_remainder
    }
}

/// Builds protocol-valid outputs.
#[derive(Clone, Copy)]
pub struct OutputBuilder<'a> {
    context: &'a BuildContext,
    nft_source: Option<&'a dyn NftOutputSource>,
}

impl<'a> OutputBuilder<'a> {
    /// Creates a builder for the given context.
    pub fn new(context: &'a BuildContext) -> Self {
        Self {
            context,
            nft_source: None,
        }
    }

    /// Sets the source used to look up the current state of NFTs that are sent.
    pub fn with_nft_source(mut self, nft_source: &'a dyn NftOutputSource) -> Self {
        self.nft_source = Some(nft_source);
        self
    }

    /// Builds the output described by `params`, raising its amount to the storage deposit as the request's policy
    /// dictates.
    #[instrument(skip_all, fields(recipient = %params.recipient_address), level = "trace")]
    pub fn build(&self, params: &OutputParams) -> Result<PreparedOutput, WalletError> {
        self.prepare(params, None)
    }

    /// Like [`build`](Self::build), but also checks that the sender can pay for the output.
    #[instrument(skip_all, fields(recipient = %params.recipient_address), level = "trace")]
    pub fn build_with_funds(&self, params: &OutputParams, funding: Funding) -> Result<PreparedOutput, WalletError> {
        self.prepare(params, Some(funding))
    }

    fn prepare(&self, params: &OutputParams, funding: Option<Funding>) -> Result<PreparedOutput, WalletError> {
        let params = params.validate(&self.context.protocol_parameters)?;
        let policy = params.policy;
        let candidate = self.candidate(params)?;

        let resolver = StorageDepositResolver {
            rent_structure: &self.context.protocol_parameters.rent_structure,
            return_address: &self.context.return_address,
        };
        let mut resolution = resolver.resolve(candidate, &policy)?;
        let token_supply = self.context.protocol_parameters.token_supply;
        check_token_supply(&resolution.output, token_supply)?;

        let Settlement {
            drawn_from_excess,
            folded_remainder,
        } = match funding {
            Some(funding) => {
                let settlement = resolver.settle(&mut resolution, &policy, funding)?;
                // Folding a remainder raises the amounts again.
                check_token_supply(&resolution.output, token_supply)?;
                settlement
            }
            None => Settlement::default(),
        };

        debug!(
            amount = resolution.output.amount().0,
            min_storage_deposit = resolution.min_storage_deposit,
            decision = ?resolution.decision,
            drawn_from_excess,
            folded_remainder,
            "prepared output"
        );

        Ok(PreparedOutput {
            output: resolution.output,
            min_storage_deposit: resolution.min_storage_deposit,
            decision: resolution.decision,
            drawn_from_excess,
            folded_remainder,
        })
    }

    /// Assembles the output with the requested amount.
    fn candidate(&self, params: ValidatedParams) -> Result<Output, WalletError> {
        let ValidatedParams {
            recipient,
            amount,
            native_tokens,
            nft_id,
            features,
            timelock,
            expiration,
            ..
        } = params;

        let timelock_unlock_condition = timelock.map(|timestamp| TimelockUnlockCondition { timestamp });
        let expiration_unlock_condition = expiration.map(|timestamp| ExpirationUnlockCondition {
            return_address: self.context.return_address,
            timestamp,
        });

        Ok(match nft_id {
            None => BasicOutput {
                amount: OutputAmount(amount),
                native_tokens: native_tokens.into_boxed_slice(),
                address_unlock_condition: recipient.into(),
                storage_deposit_return_unlock_condition: None,
                timelock_unlock_condition,
                expiration_unlock_condition,
                features: features.into_boxed_slice(),
            }
            .into(),
            Some(nft_id) => {
                check_nft_recipient(&nft_id, &recipient)?;
                let existing = self.nft_source.and_then(|source| source.nft_output(&nft_id));
                let (native_tokens, features, immutable_features) = match existing {
                    Some(existing) => (
                        merge_native_tokens(existing.native_tokens.into_vec(), native_tokens)?,
                        merge_features(existing.features.into_vec(), features),
                        existing.immutable_features,
                    ),
                    None => (native_tokens, features, Box::default()),
                };
                NftOutput {
                    amount: OutputAmount(amount),
                    native_tokens: native_tokens.into_boxed_slice(),
                    nft_id,
                    address_unlock_condition: recipient.into(),
                    storage_deposit_return_unlock_condition: None,
                    timelock_unlock_condition,
                    expiration_unlock_condition,
                    features: features.into_boxed_slice(),
                    immutable_features,
                }
                .into()
            }
        })
    }
}

fn check_token_supply(output: &Output, token_supply: u64) -> Result<(), WalletError> {
    let amount = output.amount().0;
    if amount > token_supply {
        return Err(WalletError::invalid_amount(
            "amount",
            format!("amount {amount} exceeds the token supply {token_supply}"),
        ));
    }
    if let Some(sdruc) = output.storage_deposit_return() {
        if sdruc.amount > token_supply {
            return Err(WalletError::invalid_amount(
                "storageDeposit",
                format!("return amount {} exceeds the token supply {token_supply}", sdruc.amount),
            ));
        }
    }
    Ok(())
}

fn check_nft_recipient(nft_id: &NftId, recipient: &Address) -> Result<(), WalletError> {
    if nft_id.is_null() {
        return Err(WalletError::IncompatibleFeatureSet {
            reason: "cannot send an nft that has not been minted yet".to_string(),
        });
    }
    if &nft_id.address() == recipient {
        return Err(WalletError::IncompatibleFeatureSet {
            reason: format!("nft {nft_id} cannot be sent to its own address"),
        });
    }
    Ok(())
}

fn merge_native_tokens(
    mut native_tokens: Vec<NativeToken>,
    requested: Vec<NativeToken>,
) -> Result<Vec<NativeToken>, WalletError> {
    for token in requested {
        if native_tokens.iter().any(|t| t.token_id == token.token_id) {
            return Err(WalletError::DuplicateNativeToken {
                token_id: token.token_id,
            });
        }
        native_tokens.push(token);
    }
    if native_tokens.len() > NATIVE_TOKEN_COUNT_MAX {
        return Err(WalletError::invalid_amount(
            "assets.nativeTokens",
            format!(
                "{} native tokens including those held by the nft exceed the maximum of {NATIVE_TOKEN_COUNT_MAX}",
                native_tokens.len()
            ),
        ));
    }
    native_tokens.sort_by_key(|t| t.token_id);
    Ok(native_tokens)
}

/// Replaces the features of the kinds in `requested`, keeping the others.
fn merge_features(mut features: Vec<Feature>, requested: Vec<Feature>) -> Vec<Feature> {
    features.retain(|f| requested.iter().all(|r| r.kind() != f.kind()));
    features.extend(requested);
    features.sort_by_key(Feature::kind);
    features
}
