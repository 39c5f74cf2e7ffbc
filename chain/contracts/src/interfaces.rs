//! Injected collaborator capabilities
//!
//! The orchestrator never resolves a collaborator through a name-based
//! registry at call time. Each external contract is a capability passed per
//! call: the custody ledger holding reward units, the randomness provider,
//! the marketplace, and the fee token.

use rust_decimal::Decimal;
use types::ids::{AccountId, PackId, RequestId, RewardUnitId};

use crate::errors::CustodyError;

/// Multi-token custody ledger (reward contracts implement this).
///
/// Batch transfers are atomic: either every (id, amount) pair moves or none
/// does.
pub trait TokenCustody {
    /// Whether the contract exposes the expected multi-token batch interface.
    fn supports_batch_transfer(&self) -> bool;

    /// Whether `operator` may move any of `owner`'s units.
    fn is_approved_for_all(&self, owner: &AccountId, operator: &AccountId) -> bool;

    /// Units of `unit_id` held by `holder`.
    fn balance_of(&self, holder: &AccountId, unit_id: RewardUnitId) -> u64;

    /// Move `amounts[i]` units of `unit_ids[i]` from `from` to `to`, all or
    /// nothing.
    fn transfer_batch(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        unit_ids: &[RewardUnitId],
        amounts: &[u64],
    ) -> Result<(), CustodyError>;
}

/// Fee charged by a randomness provider per asynchronous request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFee {
    /// Fee token address
    pub token: String,
    /// Amount per request
    pub amount: Decimal,
}

/// External or local source of random values.
///
/// A source either resolves synchronously within the calling operation
/// (`uses_external_service() == false`) or issues an identifier for a value
/// delivered later through `fulfill_randomness`.
pub trait RandomnessSource {
    /// Whether random values arrive asynchronously from an external service.
    fn uses_external_service(&self) -> bool;

    /// Fee charged per asynchronous request, if any.
    fn request_fee(&self) -> Option<RequestFee>;

    /// Issue an asynchronous request. Returns the provider-assigned request
    /// identifier and the block at which the request was registered.
    fn request_random_value(&mut self) -> (RequestId, u64);

    /// Synchronously produce a value in `[0, range)` together with a flag
    /// reporting whether the provider considers its entropy sufficient.
    ///
    /// The value is used regardless of the flag; a `false` flag is a
    /// caller-visible quality signal, not a rejection.
    fn random_value(&mut self, range: u64) -> (u64, bool);
}

/// Listing terms supplied by a creator when listing a new pack for sale.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingTerms {
    pub currency: String,
    pub price_per_unit: Decimal,
    pub sale_start_offset: i64,
    pub sale_end_offset: i64,
}

/// A fully resolved marketplace listing call.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    /// Custody identity of the contract whose token is being listed
    pub asset_contract: AccountId,
    pub pack_id: PackId,
    pub currency: String,
    pub price_per_unit: Decimal,
    pub quantity: u64,
    pub sale_start_offset: i64,
    pub sale_end_offset: i64,
}

/// External marketplace collaborator. Listing is fire-and-forget.
pub trait Marketplace {
    fn list(&mut self, listing: ListingRequest);
}

/// Fungible fee token consumed by paid randomness providers.
pub trait FeeToken {
    /// Approve `spender` to draw `amount`. Returns false if the approval
    /// cannot be granted.
    fn approve(&mut self, spender: &str, amount: Decimal) -> bool;
}
