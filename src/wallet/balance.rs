// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Computes the base coin balance of a set of addresses.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::types::{
    ledger::OutputSource,
    stardust::{
        block::{Address, Output},
        timestamp::UnixTimestamp,
    },
};

/// The base coin balance of a wallet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseCoinBalance {
    /// Everything held by outputs the wallet can currently or eventually unlock.
    #[serde(with = "crate::types::util::stringify")]
    pub total: u64,
    /// What the wallet can spend right now.
    #[serde(with = "crate::types::util::stringify")]
    pub available: u64,
    /// The part of `available` that is held by outputs without time based unlock conditions.
    #[serde(with = "crate::types::util::stringify")]
    pub voting_power: u64,
}

/// Computes the balance of the `owned` addresses over `outputs` at time `now`.
///
/// Outputs that no owned address can unlock are ignored. Sums saturate at `u64::MAX`.
#[instrument(skip_all, fields(owned = owned.len(), now = now.0), level = "trace")]
pub fn compute_balance<'a>(
    outputs: impl IntoIterator<Item = &'a Output>,
    owned: &HashSet<Address>,
    now: UnixTimestamp,
) -> BaseCoinBalance {
    let mut balance = BaseCoinBalance::default();
    for output in outputs {
        let expiration_return_address = output.expiration().map(|expiration| &expiration.return_address);
        if !owned.contains(output.owning_address()) && !expiration_return_address.map_or(false, |a| owned.contains(a)) {
            continue;
        }
        let amount = output.amount().0;
        balance.total = balance.total.saturating_add(amount);

        let controller = output.controller_at(now);
        if !owned.contains(controller) || output.is_timelocked_at(now) {
            continue;
        }
        let spendable = match output.storage_deposit_return() {
            // The deposit is owed to a counterparty when the output is claimed through its address unlock condition.
            Some(sdruc) if controller == output.owning_address() && !owned.contains(&sdruc.return_address) => {
                amount.saturating_sub(sdruc.amount)
            }
            _ => amount,
        };
        balance.available = balance.available.saturating_add(spendable);
        if output.timelock().is_none() && output.expiration().is_none() {
            balance.voting_power = balance.voting_power.saturating_add(spendable);
        }
    }
    trace!(?balance);
    balance
}

/// Fetches the outputs of the `owned` addresses from `source` and computes their balance at time `now`.
pub fn balance_from_source<S: OutputSource>(
    source: &S,
    owned: &HashSet<Address>,
    now: UnixTimestamp,
) -> Result<BaseCoinBalance, S::Error> {
    let outputs = source.owned_outputs(owned)?;
    Ok(compute_balance(outputs.iter().map(|o| &o.output), owned, now))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::stardust::block::{
        address::Ed25519Address,
        output::{
            BasicOutput, ExpirationUnlockCondition, OutputAmount, StorageDepositReturnUnlockCondition,
            TimelockUnlockCondition,
        },
    };

    fn address(byte: u8) -> Address {
        Address::Ed25519(Ed25519Address::new([byte; 32]))
    }

    fn output(owner: u8, amount: u64) -> BasicOutput {
        BasicOutput {
            amount: OutputAmount(amount),
            native_tokens: Box::default(),
            address_unlock_condition: address(owner).into(),
            storage_deposit_return_unlock_condition: None,
            timelock_unlock_condition: None,
            expiration_unlock_condition: None,
            features: Box::default(),
        }
    }

    fn timelocked(mut output: BasicOutput, until: u32) -> BasicOutput {
        output.timelock_unlock_condition = Some(TimelockUnlockCondition {
            timestamp: UnixTimestamp(until),
        });
        output
    }

    fn expiring(mut output: BasicOutput, return_to: u8, at: u32) -> BasicOutput {
        output.expiration_unlock_condition = Some(ExpirationUnlockCondition {
            return_address: address(return_to),
            timestamp: UnixTimestamp(at),
        });
        output
    }

    fn with_return(mut output: BasicOutput, return_to: u8, amount: u64) -> BasicOutput {
        output.storage_deposit_return_unlock_condition = Some(StorageDepositReturnUnlockCondition {
            return_address: address(return_to),
            amount,
        });
        output
    }

    fn balance(outputs: Vec<BasicOutput>, now: u32) -> BaseCoinBalance {
        let outputs = outputs.into_iter().map(Output::from).collect::<Vec<_>>();
        compute_balance(&outputs, &HashSet::from([address(1)]), UnixTimestamp(now))
    }

    fn expected(total: u64, available: u64, voting_power: u64) -> BaseCoinBalance {
        BaseCoinBalance {
            total,
            available,
            voting_power,
        }
    }

    #[test]
    fn test_timelock() {
        assert_eq!(
            balance(vec![timelocked(output(1, 1000), 100), output(1, 2000)], 50),
            expected(3000, 2000, 2000)
        );
        // Once the timelock has passed the output is available but still carries no voting weight.
        assert_eq!(
            balance(vec![timelocked(output(1, 1000), 100), output(1, 2000)], 100),
            expected(3000, 3000, 2000)
        );
    }

    #[test]
    fn test_foreign_outputs_ignored() {
        assert_eq!(balance(vec![output(2, 1000), output(1, 5)], 0), expected(5, 5, 5));
    }

    #[test]
    fn test_expiration() {
        // Received, not yet expired: claimable by us.
        assert_eq!(balance(vec![expiring(output(1, 1000), 2, 100)], 50), expected(1000, 1000, 0));
        // Received and expired: it went back to the sender.
        assert_eq!(balance(vec![expiring(output(1, 1000), 2, 100)], 100), expected(1000, 0, 0));
        // Sent by us, pending: the recipient may still claim it.
        assert_eq!(balance(vec![expiring(output(2, 1000), 1, 100)], 50), expected(1000, 0, 0));
        // Sent by us and expired: ours again.
        assert_eq!(balance(vec![expiring(output(2, 1000), 1, 100)], 100), expected(1000, 1000, 0));
    }

    #[test]
    fn test_storage_deposit_return() {
        // The deposit is owed to someone else.
        assert_eq!(balance(vec![with_return(output(1, 50_000), 2, 42_600)], 0), expected(50_000, 7_400, 7_400));
        // The deposit is returned to ourselves.
        assert_eq!(balance(vec![with_return(output(1, 50_000), 1, 42_600)], 0), expected(50_000, 50_000, 50_000));
        // Expired in our favour: the return condition no longer applies.
        assert_eq!(
            balance(vec![expiring(with_return(output(2, 50_000), 3, 42_600), 1, 10)], 10),
            expected(50_000, 50_000, 0)
        );
    }

    #[test]
    fn test_saturation() {
        assert_eq!(
            balance(vec![output(1, u64::MAX), output(1, 1)], 0),
            expected(u64::MAX, u64::MAX, u64::MAX)
        );
    }

    #[test]
    fn test_balance_json() {
        let balance = expected(0, 1, u64::MAX);
        let json = serde_json::to_value(balance).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "total": "0", "available": "1", "votingPower": "18446744073709551615" })
        );
        assert_eq!(serde_json::from_value::<BaseCoinBalance>(json).unwrap(), balance);
    }
}
