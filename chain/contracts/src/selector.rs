//! Weighted selector — maps a random value to one remaining reward unit
//!
//! Pure with respect to its inputs: the same bundle state and the same random
//! value always produce the same selection, which makes settlement auditable
//! and lets tests assert exact outputs for fixed random inputs.

use types::ids::RewardUnitId;

use crate::errors::LedgerError;
use crate::ledger::RewardBundle;

/// Select one remaining reward unit and consume it from the bundle.
///
/// `target = random_value % total_packed` falls into exactly one band of the
/// cumulative-weight scan, so units with larger remaining counts are
/// proportionally more likely to be chosen and earlier-indexed units win on
/// equal bands. The chosen count is decremented in place.
///
/// Fails with `EmptyBundle` if no units remain; the orchestrator's supply
/// bookkeeping keeps that state unreachable.
pub fn select(
    bundle: &mut RewardBundle,
    random_value: u64,
) -> Result<(RewardUnitId, usize), LedgerError> {
    let total = bundle.total_packed();
    if total == 0 {
        return Err(LedgerError::EmptyBundle);
    }

    let target = random_value % total;
    let mut step = 0u64;
    for (index, &count) in bundle.unit_counts().iter().enumerate() {
        if target < step + count {
            let unit_id = bundle.unit_ids()[index];
            bundle.consume_unit(index);
            return Ok((unit_id, index));
        }
        step += count;
    }

    // Bands are disjoint and exhaustive; target < total guarantees a hit
    // above whenever the bundle invariants hold.
    Err(LedgerError::EmptyBundle)
}
