//! Reward ledger — per-pack bundle bookkeeping
//!
//! One `RewardBundle` per pack identifier: the source reward contract and the
//! parallel sequences of unit ids and remaining packed counts. The bundle is
//! owned exclusively by the orchestrator; the only mutation path is the
//! weighted selector decrementing a single count per completed opening.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::ids::{PackId, RewardUnitId};

use crate::errors::LedgerError;

/// The fixed set of reward units and remaining counts backing one pack.
///
/// Invariants: `unit_ids.len() == unit_counts.len()`; the sum of counts at
/// creation equals the minted pack supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBundle {
    reward_contract: String,
    unit_ids: Vec<RewardUnitId>,
    unit_counts: Vec<u64>,
}

impl RewardBundle {
    /// Build a bundle, validating that the parallel sequences line up and
    /// that the packed total does not overflow.
    pub fn new(
        reward_contract: impl Into<String>,
        unit_ids: Vec<RewardUnitId>,
        unit_counts: Vec<u64>,
    ) -> Result<Self, LedgerError> {
        if unit_ids.len() != unit_counts.len() {
            return Err(LedgerError::LengthMismatch {
                ids: unit_ids.len(),
                counts: unit_counts.len(),
            });
        }
        unit_counts
            .iter()
            .try_fold(0u64, |acc, count| acc.checked_add(*count))
            .ok_or(LedgerError::Overflow)?;

        Ok(Self {
            reward_contract: reward_contract.into(),
            unit_ids,
            unit_counts,
        })
    }

    /// Address of the contract holding the reward units.
    pub fn reward_contract(&self) -> &str {
        &self.reward_contract
    }

    /// Reward unit ids, in recorded order.
    pub fn unit_ids(&self) -> &[RewardUnitId] {
        &self.unit_ids
    }

    /// Remaining packed count per unit id, parallel to `unit_ids`.
    pub fn unit_counts(&self) -> &[u64] {
        &self.unit_counts
    }

    /// Sum of remaining packed counts.
    ///
    /// `RewardBundle::new` proves the creation-time sum fits in a u64, and
    /// counts only ever decrease, so plain summation cannot overflow here.
    pub fn total_packed(&self) -> u64 {
        self.unit_counts.iter().sum()
    }

    /// Consume one packed unit at `index`. Selector-only mutation path.
    pub(crate) fn consume_unit(&mut self, index: usize) {
        // The selector only lands on an index whose band is non-empty.
        self.unit_counts[index] -= 1;
    }
}

/// Per-pack bundle store.
#[derive(Debug, Default)]
pub struct RewardLedger {
    bundles: HashMap<PackId, RewardBundle>,
}

impl RewardLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the bundle for a newly created pack.
    ///
    /// Creation is the only caller, exactly once per pack identifier.
    /// Returns the packed total, which sizes the minted pack supply.
    pub fn record(&mut self, pack_id: PackId, bundle: RewardBundle) -> Result<u64, LedgerError> {
        if self.bundles.contains_key(&pack_id) {
            return Err(LedgerError::DuplicatePack { pack_id });
        }
        let total = bundle.total_packed();
        self.bundles.insert(pack_id, bundle);
        Ok(total)
    }

    /// Sum of remaining packed counts for a pack.
    pub fn total_packed(&self, pack_id: PackId) -> Result<u64, LedgerError> {
        Ok(self.bundle(pack_id)?.total_packed())
    }

    /// Read access to a pack's bundle.
    pub fn bundle(&self, pack_id: PackId) -> Result<&RewardBundle, LedgerError> {
        self.bundles
            .get(&pack_id)
            .ok_or(LedgerError::UnknownPack { pack_id })
    }

    /// Mutable access for the selector. Orchestrator-only.
    pub(crate) fn bundle_mut(&mut self, pack_id: PackId) -> Result<&mut RewardBundle, LedgerError> {
        self.bundles
            .get_mut(&pack_id)
            .ok_or(LedgerError::UnknownPack { pack_id })
    }
}
