// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the read-only view of the ledger that a wallet works against.

use std::{collections::HashSet, convert::Infallible};

use serde::{Deserialize, Serialize};

use crate::types::stardust::block::{
    output::{NftId, NftOutput, OutputId},
    Address, Output,
};

/// An unspent output together with the id it is booked under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct LedgerOutput {
    pub output_id: OutputId,
    pub output: Output,
}

impl LedgerOutput {
    /// Returns `true` if any of `addresses` can currently or eventually unlock the output.
    pub fn is_owned_by(&self, addresses: &HashSet<Address>) -> bool {
        addresses.contains(self.output.owning_address())
            || self
                .output
                .expiration()
                .map_or(false, |expiration| addresses.contains(&expiration.return_address))
    }
}

/// Defines a type as a source of unspent outputs.
///
/// Implementations hand out a frozen snapshot: the outputs returned by one call must not change while a computation
/// over them is in progress.
pub trait OutputSource {
    /// The error type for this output source.
    type Error: 'static + std::error::Error + std::fmt::Debug;

    /// Lists the unspent outputs that are unlockable by any of `addresses`, either directly or as the return address
    /// of an expiration unlock condition.
    fn owned_outputs(&self, addresses: &HashSet<Address>) -> Result<Vec<LedgerOutput>, Self::Error>;
}

/// Looks up the current state of an NFT.
pub trait NftOutputSource {
    /// Returns the unspent output holding the NFT with the given id, if any.
    fn nft_output(&self, nft_id: &NftId) -> Option<NftOutput>;
}

/// A ledger snapshot held in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryLedger {
    outputs: Vec<LedgerOutput>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Books an output, replacing any output previously booked under the same id.
    pub fn insert(&mut self, output_id: OutputId, output: impl Into<Output>) {
        let output = output.into();
        match self.outputs.iter_mut().find(|o| o.output_id == output_id) {
            Some(existing) => existing.output = output,
            None => self.outputs.push(LedgerOutput { output_id, output }),
        }
    }

    /// Removes a spent output.
    pub fn remove(&mut self, output_id: &OutputId) -> Option<Output> {
        let index = self.outputs.iter().position(|o| &o.output_id == output_id)?;
        Some(self.outputs.remove(index).output)
    }

    /// The number of unspent outputs.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Returns `true` if no output is booked.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl FromIterator<LedgerOutput> for InMemoryLedger {
    fn from_iter<T: IntoIterator<Item = LedgerOutput>>(iter: T) -> Self {
        let mut ledger = Self::new();
        for LedgerOutput { output_id, output } in iter {
            ledger.insert(output_id, output);
        }
        ledger
    }
}

impl OutputSource for InMemoryLedger {
    type Error = Infallible;

    fn owned_outputs(&self, addresses: &HashSet<Address>) -> Result<Vec<LedgerOutput>, Self::Error> {
        Ok(self
            .outputs
            .iter()
            .filter(|o| o.is_owned_by(addresses))
            .cloned()
            .collect())
    }
}

impl NftOutputSource for InMemoryLedger {
    fn nft_output(&self, nft_id: &NftId) -> Option<NftOutput> {
        self.outputs.iter().find_map(|o| match &o.output {
            Output::Nft(nft) if &nft.nft_id == nft_id => Some(nft.clone()),
            _ => None,
        })
    }
}
