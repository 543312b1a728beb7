// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Reconciles the amount of an output with the storage deposit its size requires.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{error::WalletError, params::StorageDepositPolicy};
use crate::types::stardust::{
    block::{
        output::{BasicOutput, OutputAmount, StorageDepositReturnUnlockCondition},
        Address, Output,
    },
    protocol::RentStructure,
};

/// How an amount below the minimum storage deposit is made up for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnStrategy {
    /// The recipient has to return the missing deposit to the sender when claiming the output.
    Return,
    /// The missing deposit is given to the recipient.
    Gift,
}

/// What the resolver did to the amount of an output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StorageDepositDecision {
    /// The requested amount covers the deposit and is used unchanged.
    Sufficient,
    /// A storage deposit return unlock condition over `return_amount` was added.
    Return {
        /// The amount the recipient has to send back to the sender when claiming the output.
        #[serde(with = "crate::types::util::stringify")]
        return_amount: u64,
    },
    /// The amount was raised by `gifted`.
    Gift {
        /// The amount added on top of the requested one at the sender's expense.
        #[serde(with = "crate::types::util::stringify")]
        gifted: u64,
    },
}

/// The funds of the sender that can pay for an output.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Funding {
    /// Funds already earmarked for the transfer.
    pub disposable: u64,
    /// Other available funds of the sender that are not reserved for anything else.
    pub excess: u64,
}

/// A candidate output whose amount covers its storage deposit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub(crate) output: Output,
    pub(crate) min_storage_deposit: u64,
    pub(crate) decision: StorageDepositDecision,
}

/// How a [`Resolution`] is paid for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Settlement {
    pub(crate) drawn_from_excess: u64,
    pub(crate) folded_remainder: u64,
}

/// Sizes candidate outputs and applies the storage deposit policy of a request.
#[derive(Copy, Clone, Debug)]
pub(crate) struct StorageDepositResolver<'a> {
    pub(crate) rent_structure: &'a RentStructure,
    pub(crate) return_address: &'a Address,
}

impl<'a> StorageDepositResolver<'a> {
    /// Raises the amount of `candidate` to its minimum storage deposit as the policy dictates.
    ///
    /// The candidate must hold the requested amount.
    pub(crate) fn resolve(
        &self,
        mut candidate: Output,
        policy: &StorageDepositPolicy,
    ) -> Result<Resolution, WalletError> {
        let requested = candidate.amount().0;
        let min_storage_deposit = self.min_storage_deposit(&candidate)?;
        trace!("requested {requested}, minimum storage deposit {min_storage_deposit}");

        if requested >= min_storage_deposit {
            return Ok(Resolution {
                output: candidate,
                min_storage_deposit,
                decision: StorageDepositDecision::Sufficient,
            });
        }

        match policy.return_strategy {
            None => Err(WalletError::MissingStorageDepositPolicy {
                amount: requested,
                minimum: min_storage_deposit,
            }),
            Some(ReturnStrategy::Gift) => {
                *candidate.amount_mut() = OutputAmount(min_storage_deposit);
                Ok(Resolution {
                    output: candidate,
                    min_storage_deposit,
                    decision: StorageDepositDecision::Gift {
                        gifted: min_storage_deposit - requested,
                    },
                })
            }
            Some(ReturnStrategy::Return) => {
                // The return condition adds to the size, so the deposit is computed with it in place. Its amount does
                // not affect the size.
                *candidate.storage_deposit_return_mut() = Some(StorageDepositReturnUnlockCondition {
                    return_address: *self.return_address,
                    amount: 0,
                });
                let min_storage_deposit = self.min_storage_deposit(&candidate)?;
                let return_amount = min_storage_deposit - requested;
                *candidate.storage_deposit_return_mut() = Some(StorageDepositReturnUnlockCondition {
                    return_address: *self.return_address,
                    amount: return_amount,
                });
                *candidate.amount_mut() = OutputAmount(min_storage_deposit);
                Ok(Resolution {
                    output: candidate,
                    min_storage_deposit,
                    decision: StorageDepositDecision::Return { return_amount },
                })
            }
        }
    }

    /// Pays for a resolved output from the sender's funds.
    ///
    /// If the policy allows drawing on excess funds and paying would leave the sender with a remainder too small to
    /// be stored in an output of its own, the remainder is added to the output instead. With a return condition the
    /// sender gets it back on claim, otherwise it is gifted.
    pub(crate) fn settle(
        &self,
        resolution: &mut Resolution,
        policy: &StorageDepositPolicy,
        funding: Funding,
    ) -> Result<Settlement, WalletError> {
        let required = resolution.output.amount().0;

        if required > funding.disposable {
            let shortfall = required - funding.disposable;
            if !policy.use_excess_if_low || shortfall > funding.excess {
                return Err(WalletError::InsufficientFunds {
                    required,
                    available: if policy.use_excess_if_low {
                        funding.disposable.saturating_add(funding.excess)
                    } else {
                        funding.disposable
                    },
                });
            }
            trace!("drawing {shortfall} from excess funds");
            return Ok(Settlement {
                drawn_from_excess: shortfall,
                folded_remainder: 0,
            });
        }

        let remainder = funding.disposable - required;
        if !policy.use_excess_if_low || remainder == 0 || remainder >= self.dust_threshold()? {
            return Ok(Settlement::default());
        }

        trace!("folding remainder of {remainder} into the output");
        *resolution.output.amount_mut() += OutputAmount(remainder);
        resolution.decision = match resolution.output.storage_deposit_return_mut() {
            Some(sdruc) => {
                sdruc.amount += remainder;
                StorageDepositDecision::Return {
                    return_amount: sdruc.amount,
                }
            }
            None => match resolution.decision {
                StorageDepositDecision::Gift { gifted } => StorageDepositDecision::Gift {
                    gifted: gifted + remainder,
                },
                _ => StorageDepositDecision::Gift { gifted: remainder },
            },
        };
        Ok(Settlement {
            drawn_from_excess: 0,
            folded_remainder: remainder,
        })
    }

    fn min_storage_deposit(&self, output: &Output) -> Result<u64, WalletError> {
        output
            .min_storage_deposit(self.rent_structure)
            .map_err(|e| WalletError::IncompatibleFeatureSet { reason: e.to_string() })
    }

    /// The minimum storage deposit of a plain output to the return address. Smaller amounts cannot be kept as change.
    fn dust_threshold(&self) -> Result<u64, WalletError> {
        self.min_storage_deposit(&Output::from(BasicOutput {
            amount: OutputAmount::default(),
            native_tokens: Box::default(),
            address_unlock_condition: (*self.return_address).into(),
            storage_deposit_return_unlock_condition: None,
            timelock_unlock_condition: None,
            expiration_unlock_condition: None,
            features: Box::default(),
        }))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::stardust::block::{address::Ed25519Address, output::Feature};

    const MIN: u64 = 42600;
    const MIN_WITH_RETURN: u64 = MIN + 42 * 100;

    fn address(byte: u8) -> Address {
        Address::Ed25519(Ed25519Address::new([byte; 32]))
    }

    fn candidate(amount: u64) -> Output {
        BasicOutput {
            amount: OutputAmount(amount),
            native_tokens: Box::default(),
            address_unlock_condition: address(1).into(),
            storage_deposit_return_unlock_condition: None,
            timelock_unlock_condition: None,
            expiration_unlock_condition: None,
            features: Box::default(),
        }
        .into()
    }

    fn policy(return_strategy: Option<ReturnStrategy>, use_excess_if_low: bool) -> StorageDepositPolicy {
        StorageDepositPolicy {
            return_strategy,
            use_excess_if_low,
        }
    }

    fn with_resolver<T>(f: impl FnOnce(StorageDepositResolver) -> T) -> T {
        let rent_structure = RentStructure::default();
        let return_address = address(2);
        f(StorageDepositResolver {
            rent_structure: &rent_structure,
            return_address: &return_address,
        })
    }

    #[test]
    fn test_sufficient_amount_unchanged() {
        with_resolver(|resolver| {
            let resolution = resolver.resolve(candidate(MIN), &policy(None, false)).unwrap();
            assert_eq!(resolution.output, candidate(MIN));
            assert_eq!(resolution.min_storage_deposit, MIN);
            assert_eq!(resolution.decision, StorageDepositDecision::Sufficient);
        })
    }

    #[test]
    fn test_gift() {
        with_resolver(|resolver| {
            let resolution = resolver
                .resolve(candidate(1), &policy(Some(ReturnStrategy::Gift), false))
                .unwrap();
            assert_eq!(resolution.output.amount(), OutputAmount(MIN));
            assert!(resolution.output.storage_deposit_return().is_none());
            assert_eq!(resolution.decision, StorageDepositDecision::Gift { gifted: MIN - 1 });
        })
    }

    #[test]
    fn test_return() {
        with_resolver(|resolver| {
            let resolution = resolver
                .resolve(candidate(100), &policy(Some(ReturnStrategy::Return), false))
                .unwrap();
            assert_eq!(resolution.min_storage_deposit, MIN_WITH_RETURN);
            assert_eq!(resolution.output.amount(), OutputAmount(MIN_WITH_RETURN));
            assert_eq!(
                resolution.output.storage_deposit_return(),
                Some(&StorageDepositReturnUnlockCondition {
                    return_address: address(2),
                    amount: MIN_WITH_RETURN - 100,
                })
            );
            assert_eq!(
                resolution.output.min_storage_deposit(&RentStructure::default()).unwrap(),
                resolution.min_storage_deposit
            );
        })
    }

    #[test]
    fn test_missing_policy() {
        with_resolver(|resolver| {
            assert_eq!(
                resolver.resolve(candidate(0), &policy(None, true)),
                Err(WalletError::MissingStorageDepositPolicy {
                    amount: 0,
                    minimum: MIN
                })
            );
        })
    }

    #[test]
    fn test_settle_from_excess() {
        with_resolver(|resolver| {
            let policy = policy(Some(ReturnStrategy::Gift), true);
            let mut resolution = resolver.resolve(candidate(1), &policy).unwrap();
            let funding = Funding {
                disposable: 40_000,
                excess: 10_000,
            };
            assert_eq!(
                resolver.settle(&mut resolution, &policy, funding).unwrap(),
                Settlement {
                    drawn_from_excess: MIN - 40_000,
                    folded_remainder: 0
                }
            );
            assert_eq!(resolution.output.amount(), OutputAmount(MIN));
        })
    }

    #[test]
    fn test_insufficient_funds() {
        with_resolver(|resolver| {
            let funding = Funding {
                disposable: 40_000,
                excess: 1_000,
            };
            let strict = policy(Some(ReturnStrategy::Gift), false);
            let mut resolution = resolver.resolve(candidate(1), &strict).unwrap();
            assert_eq!(
                resolver.settle(&mut resolution, &strict, funding),
                Err(WalletError::InsufficientFunds {
                    required: MIN,
                    available: 40_000
                })
            );

            let lenient = policy(Some(ReturnStrategy::Gift), true);
            assert_eq!(
                resolver.settle(&mut resolution, &lenient, funding),
                Err(WalletError::InsufficientFunds {
                    required: MIN,
                    available: 41_000
                })
            );
        })
    }

    #[test]
    fn test_fold_remainder() {
        with_resolver(|resolver| {
            let funding = Funding {
                disposable: MIN_WITH_RETURN + 500,
                excess: 0,
            };

            let policy = policy(Some(ReturnStrategy::Return), true);
            let mut resolution = resolver.resolve(candidate(100), &policy).unwrap();
            let settlement = resolver.settle(&mut resolution, &policy, funding).unwrap();
            assert_eq!(settlement.folded_remainder, 500);
            assert_eq!(resolution.output.amount(), OutputAmount(MIN_WITH_RETURN + 500));
            assert_eq!(
                resolution.decision,
                StorageDepositDecision::Return {
                    return_amount: MIN_WITH_RETURN - 100 + 500
                }
            );
            assert_eq!(
                resolution.output.storage_deposit_return().map(|sdruc| sdruc.amount),
                Some(MIN_WITH_RETURN - 100 + 500)
            );
        })
    }

    #[test]
    fn test_fold_remainder_into_gift() {
        with_resolver(|resolver| {
            let policy = policy(Some(ReturnStrategy::Gift), true);
            let mut resolution = resolver.resolve(candidate(1), &policy).unwrap();
            let funding = Funding {
                disposable: MIN + 300,
                excess: 0,
            };
            resolver.settle(&mut resolution, &policy, funding).unwrap();
            assert_eq!(resolution.output.amount(), OutputAmount(MIN + 300));
            assert_eq!(resolution.decision, StorageDepositDecision::Gift { gifted: MIN - 1 + 300 });
        })
    }

    #[test]
    fn test_fold_remainder_into_sufficient_amount() {
        with_resolver(|resolver| {
            let policy = policy(None, true);
            let mut resolution = resolver.resolve(candidate(MIN), &policy).unwrap();
            assert_eq!(resolution.decision, StorageDepositDecision::Sufficient);
            let funding = Funding {
                disposable: MIN + 300,
                excess: 0,
            };
            resolver.settle(&mut resolution, &policy, funding).unwrap();
            assert_eq!(resolution.output.amount(), OutputAmount(MIN + 300));
            assert!(resolution.output.storage_deposit_return().is_none());
            assert_eq!(resolution.decision, StorageDepositDecision::Gift { gifted: 300 });
        })
    }

    #[test]
    fn test_oversized_feature_is_incompatible() {
        with_resolver(|resolver| {
            let mut output = candidate(MIN);
            if let Output::Basic(basic) = &mut output {
                basic.features = vec![Feature::Tag {
                    data: vec![0; Feature::TAG_LENGTH_MAX + 1].into_boxed_slice(),
                }]
                .into_boxed_slice();
            }
            assert!(matches!(
                resolver.resolve(output, &policy(None, false)),
                Err(WalletError::IncompatibleFeatureSet { .. })
            ));
        })
    }

    #[test]
    fn test_remainder_kept_when_large_or_not_allowed() {
        with_resolver(|resolver| {
            let lenient = policy(None, true);
            let mut resolution = resolver.resolve(candidate(MIN), &lenient).unwrap();
            let funding = Funding {
                disposable: 2 * MIN,
                excess: 0,
            };
            assert_eq!(
                resolver.settle(&mut resolution, &lenient, funding).unwrap(),
                Settlement::default()
            );
            assert_eq!(resolution.output.amount(), OutputAmount(MIN));

            let strict = policy(None, false);
            let funding = Funding {
                disposable: MIN + 1,
                excess: 0,
            };
            assert_eq!(
                resolver.settle(&mut resolution, &strict, funding).unwrap(),
                Settlement::default()
            );
            assert_eq!(resolution.output.amount(), OutputAmount(MIN));
        })
    }
}
