//! Supply tracker — pack-unit totals and holder balances
//!
//! The running total supply per pack changes only on mint (creation) and burn
//! (opening, either path). Holder balances live beside the totals because the
//! opening guard needs to know whether a caller holds a unit, and the custody
//! token's issuance layer is out of scope.

use std::collections::HashMap;
use types::ids::{AccountId, PackId};

use crate::errors::SupplyError;

/// Per-pack supply counters and per-holder unit balances.
#[derive(Debug, Default)]
pub struct SupplyTracker {
    totals: HashMap<PackId, u64>,
    holdings: HashMap<(PackId, AccountId), u64>,
}

impl SupplyTracker {
    /// Create a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` units of `pack_id` to `holder`.
    pub fn mint(
        &mut self,
        pack_id: PackId,
        holder: AccountId,
        amount: u64,
    ) -> Result<(), SupplyError> {
        let total = self.totals.entry(pack_id).or_insert(0);
        let new_total = total.checked_add(amount).ok_or(SupplyError::Overflow)?;

        let held = self.holdings.entry((pack_id, holder)).or_insert(0);
        *held = held.checked_add(amount).ok_or(SupplyError::Overflow)?;
        *total = new_total;
        Ok(())
    }

    /// Burn `amount` units of `pack_id` from `holder`.
    pub fn burn(
        &mut self,
        pack_id: PackId,
        holder: &AccountId,
        amount: u64,
    ) -> Result<(), SupplyError> {
        let available = self.balance_of(pack_id, holder);
        if available < amount {
            return Err(SupplyError::InsufficientUnits {
                required: amount,
                available,
            });
        }

        if let Some(held) = self.holdings.get_mut(&(pack_id, *holder)) {
            *held -= amount;
        }
        if let Some(total) = self.totals.get_mut(&pack_id) {
            // Holder balances never exceed the total they were minted from.
            *total -= amount;
        }
        Ok(())
    }

    /// Outstanding units of a pack across all holders.
    pub fn total_supply(&self, pack_id: PackId) -> u64 {
        self.totals.get(&pack_id).copied().unwrap_or(0)
    }

    /// Units of a pack held by one account.
    pub fn balance_of(&self, pack_id: PackId, holder: &AccountId) -> u64 {
        self.holdings
            .get(&(pack_id, *holder))
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_updates_total_and_holding() {
        let mut tracker = SupplyTracker::new();
        let pack = PackId::new(1);
        let holder = AccountId::new();

        tracker.mint(pack, holder, 10).unwrap();
        assert_eq!(tracker.total_supply(pack), 10);
        assert_eq!(tracker.balance_of(pack, &holder), 10);
    }

    #[test]
    fn test_burn_decrements_both() {
        let mut tracker = SupplyTracker::new();
        let pack = PackId::new(1);
        let holder = AccountId::new();

        tracker.mint(pack, holder, 10).unwrap();
        tracker.burn(pack, &holder, 1).unwrap();
        assert_eq!(tracker.total_supply(pack), 9);
        assert_eq!(tracker.balance_of(pack, &holder), 9);
    }

    #[test]
    fn test_burn_insufficient() {
        let mut tracker = SupplyTracker::new();
        let pack = PackId::new(1);
        let holder = AccountId::new();

        tracker.mint(pack, holder, 2).unwrap();
        let result = tracker.burn(pack, &holder, 3);
        assert_eq!(
            result,
            Err(SupplyError::InsufficientUnits {
                required: 3,
                available: 2
            })
        );
        assert_eq!(tracker.total_supply(pack), 2);
    }

    #[test]
    fn test_burn_unknown_holder() {
        let mut tracker = SupplyTracker::new();
        let pack = PackId::new(1);
        tracker.mint(pack, AccountId::new(), 5).unwrap();

        let stranger = AccountId::new();
        let result = tracker.burn(pack, &stranger, 1);
        assert!(matches!(result, Err(SupplyError::InsufficientUnits { .. })));
    }

    #[test]
    fn test_mint_overflow() {
        let mut tracker = SupplyTracker::new();
        let pack = PackId::new(1);
        let holder = AccountId::new();

        tracker.mint(pack, holder, u64::MAX).unwrap();
        let result = tracker.mint(pack, holder, 1);
        assert_eq!(result, Err(SupplyError::Overflow));
    }

    #[test]
    fn test_packs_isolated() {
        let mut tracker = SupplyTracker::new();
        let holder = AccountId::new();

        tracker.mint(PackId::new(1), holder, 4).unwrap();
        tracker.mint(PackId::new(2), holder, 7).unwrap();

        assert_eq!(tracker.total_supply(PackId::new(1)), 4);
        assert_eq!(tracker.total_supply(PackId::new(2)), 7);
        assert_eq!(tracker.balance_of(PackId::new(1), &holder), 4);
    }
}
