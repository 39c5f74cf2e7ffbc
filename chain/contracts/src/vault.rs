//! Token vault — in-memory multi-token custody ledger
//!
//! Reference implementation of the `TokenCustody` capability:
//! - Unit balances tracked by (account, unit id)
//! - Operator approvals by (owner, operator)
//! - Checked credit/debit with overflow protection
//! - Batch transfer validated up front so a failure leaves no partial effect

use std::collections::{HashMap, HashSet};
use types::ids::{AccountId, RewardUnitId};

use crate::errors::CustodyError;
use crate::interfaces::TokenCustody;

/// In-memory multi-token ledger.
///
/// Balances are stored as `HashMap<AccountId, HashMap<RewardUnitId, u64>>`.
/// Used by integration tests and local deployments; external reward
/// contracts implement the same `TokenCustody` trait.
#[derive(Debug, Default)]
pub struct TokenVault {
    /// Balances: account -> (unit id -> count)
    balances: HashMap<AccountId, HashMap<RewardUnitId, u64>>,
    /// Operator approvals: (owner, operator)
    approvals: HashSet<(AccountId, AccountId)>,
}

impl TokenVault {
    /// Create a new empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit units to an account with overflow protection.
    pub fn credit(
        &mut self,
        account: AccountId,
        unit_id: RewardUnitId,
        amount: u64,
    ) -> Result<(), CustodyError> {
        let balance = self
            .balances
            .entry(account)
            .or_default()
            .entry(unit_id)
            .or_insert(0);

        *balance = balance.checked_add(amount).ok_or(CustodyError::Overflow)?;
        Ok(())
    }

    /// Grant or revoke `operator`'s right to move any of `owner`'s units.
    pub fn set_approval_for_all(&mut self, owner: AccountId, operator: AccountId, approved: bool) {
        if approved {
            self.approvals.insert((owner, operator));
        } else {
            self.approvals.remove(&(owner, operator));
        }
    }

    /// Debit units from an account, failing without mutation if the balance
    /// is insufficient.
    fn debit(
        &mut self,
        account: &AccountId,
        unit_id: RewardUnitId,
        amount: u64,
    ) -> Result<(), CustodyError> {
        let available = self.balance_of(account, unit_id);
        if available < amount {
            return Err(CustodyError::InsufficientUnits {
                unit_id: unit_id.to_string(),
                required: amount,
                available,
            });
        }

        if let Some(balances) = self.balances.get_mut(account) {
            if let Some(balance) = balances.get_mut(&unit_id) {
                *balance -= amount;
            }
        }
        Ok(())
    }
}

impl TokenCustody for TokenVault {
    fn supports_batch_transfer(&self) -> bool {
        true
    }

    fn is_approved_for_all(&self, owner: &AccountId, operator: &AccountId) -> bool {
        self.approvals.contains(&(*owner, *operator))
    }

    fn balance_of(&self, holder: &AccountId, unit_id: RewardUnitId) -> u64 {
        self.balances
            .get(holder)
            .and_then(|units| units.get(&unit_id))
            .copied()
            .unwrap_or(0)
    }

    fn transfer_batch(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        unit_ids: &[RewardUnitId],
        amounts: &[u64],
    ) -> Result<(), CustodyError> {
        if unit_ids.len() != amounts.len() {
            return Err(CustodyError::BatchLengthMismatch {
                ids: unit_ids.len(),
                amounts: amounts.len(),
            });
        }

        // Validate the full batch before touching any balance. The same unit
        // id may appear more than once, so requirements are summed first.
        let mut required: HashMap<RewardUnitId, u64> = HashMap::new();
        for (unit_id, amount) in unit_ids.iter().zip(amounts) {
            let entry = required.entry(*unit_id).or_insert(0);
            *entry = entry.checked_add(*amount).ok_or(CustodyError::Overflow)?;
        }
        for (unit_id, total) in &required {
            let available = self.balance_of(from, *unit_id);
            if available < *total {
                return Err(CustodyError::InsufficientUnits {
                    unit_id: unit_id.to_string(),
                    required: *total,
                    available,
                });
            }
            // The recipient side must not overflow either.
            self.balance_of(to, *unit_id)
                .checked_add(*total)
                .ok_or(CustodyError::Overflow)?;
        }

        for (unit_id, total) in required {
            self.debit(from, unit_id, total)?;
            self.credit(*to, unit_id, total)?;
        }
        Ok(())
    }
}
