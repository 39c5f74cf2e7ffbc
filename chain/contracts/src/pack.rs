//! Pack lifecycle orchestrator — create, open, fulfill
//!
//! `PackContract` owns the reward ledger, supply tracker, and settlement
//! book, and sequences them against the injected collaborators: the custody
//! ledger holding reward units, the randomness provider, the marketplace,
//! and the fee token. All state-mutating operations are atomic: they either
//! commit their entire effect set or reject before touching anything, and
//! every mutating entry point holds the reentrancy guard for its duration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::ids::{AccountId, PackId, RequestId, RewardUnitId};
use types::window::OpenWindow;

use crate::errors::{PackError, SettlementError};
use crate::events::{ContractEvent, OpenRequested, PackCreated, PackOpened, RewardDistributed};
use crate::interfaces::{
    FeeToken, ListingRequest, ListingTerms, Marketplace, RandomnessSource, TokenCustody,
};
use crate::ledger::{RewardBundle, RewardLedger};
use crate::security::ReentrancyGuard;
use crate::selector;
use crate::settlement::{OpenRequest, SettlementBook};
use crate::supply::SupplyTracker;

/// Immutable per-pack metadata written at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackRecord {
    pub creator: AccountId,
    pub metadata_uri: String,
    pub window: OpenWindow,
    pub created_at: i64,
}

/// Pack custody and settlement orchestrator.
///
/// Holds its own custody identity (`custodian`) under which reward units are
/// held in external token contracts, and the identity of the one randomness
/// provider allowed to fulfill asynchronous requests.
#[derive(Debug)]
pub struct PackContract {
    /// This contract's account in external custody ledgers
    custodian: AccountId,
    /// Registered randomness provider; sole authorized fulfiller and the
    /// spender approved for request fees
    provider: String,
    /// Monotonic pack id counter; an issued id is never reused
    next_pack_id: u64,
    packs: HashMap<PackId, PackRecord>,
    ledger: RewardLedger,
    supply: SupplyTracker,
    settlement: SettlementBook,
    reentrancy_guard: ReentrancyGuard,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl PackContract {
    /// Create a new orchestrator with its custody identity and the
    /// registered randomness provider.
    pub fn new(custodian: AccountId, provider: impl Into<String>) -> Self {
        Self {
            custodian,
            provider: provider.into(),
            next_pack_id: 1,
            packs: HashMap::new(),
            ledger: RewardLedger::new(),
            supply: SupplyTracker::new(),
            settlement: SettlementBook::new(),
            reentrancy_guard: ReentrancyGuard::new(),
            events: Vec::new(),
        }
    }

    // ───────────────────────── Create ─────────────────────────

    /// Create a pack: pull the reward units into custody, record the bundle,
    /// and mint one pack unit per packed reward unit to the caller.
    ///
    /// `seconds_until_end = 0` resolves to a window that never closes.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        caller: AccountId,
        metadata_uri: &str,
        reward_custody: &mut dyn TokenCustody,
        reward_contract: &str,
        unit_ids: Vec<RewardUnitId>,
        unit_counts: Vec<u64>,
        open_start: i64,
        seconds_until_end: i64,
        current_time: i64,
    ) -> Result<PackId, PackError> {
        if !self.reentrancy_guard.acquire() {
            return Err(PackError::Reentrancy);
        }
        let result = self.create_locked(
            caller,
            metadata_uri,
            reward_custody,
            reward_contract,
            unit_ids,
            unit_counts,
            open_start,
            seconds_until_end,
            current_time,
        );
        self.reentrancy_guard.release();
        result
    }

    /// Create a pack and forward a fire-and-forget listing call to the
    /// marketplace collaborator.
    #[allow(clippy::too_many_arguments)]
    pub fn create_and_list(
        &mut self,
        caller: AccountId,
        metadata_uri: &str,
        reward_custody: &mut dyn TokenCustody,
        reward_contract: &str,
        unit_ids: Vec<RewardUnitId>,
        unit_counts: Vec<u64>,
        open_start: i64,
        seconds_until_end: i64,
        current_time: i64,
        marketplace: &mut dyn Marketplace,
        terms: ListingTerms,
    ) -> Result<PackId, PackError> {
        let pack_id = self.create(
            caller,
            metadata_uri,
            reward_custody,
            reward_contract,
            unit_ids,
            unit_counts,
            open_start,
            seconds_until_end,
            current_time,
        )?;

        marketplace.list(ListingRequest {
            asset_contract: self.custodian,
            pack_id,
            currency: terms.currency,
            price_per_unit: terms.price_per_unit,
            quantity: self.supply.total_supply(pack_id),
            sale_start_offset: terms.sale_start_offset,
            sale_end_offset: terms.sale_end_offset,
        });
        Ok(pack_id)
    }

    #[allow(clippy::too_many_arguments)]
    fn create_locked(
        &mut self,
        caller: AccountId,
        metadata_uri: &str,
        reward_custody: &mut dyn TokenCustody,
        reward_contract: &str,
        unit_ids: Vec<RewardUnitId>,
        unit_counts: Vec<u64>,
        open_start: i64,
        seconds_until_end: i64,
        current_time: i64,
    ) -> Result<PackId, PackError> {
        if !reward_custody.supports_batch_transfer() {
            return Err(PackError::RewardContractUnsupported);
        }
        if !reward_custody.is_approved_for_all(&caller, &self.custodian) {
            return Err(PackError::NotApprovedForTransfer);
        }

        let window = if seconds_until_end == 0 {
            OpenWindow::unbounded(open_start)
        } else {
            let end = open_start
                .checked_add(seconds_until_end)
                .ok_or(PackError::InvalidWindow)?;
            OpenWindow::try_new(open_start, Some(end)).ok_or(PackError::InvalidWindow)?
        };

        let bundle = RewardBundle::new(reward_contract, unit_ids, unit_counts)?;
        let total = bundle.total_packed();
        if total == 0 {
            return Err(PackError::NothingPacked);
        }

        // Pull the rewards into custody before any internal bookkeeping; a
        // failed transfer leaves this contract untouched.
        reward_custody.transfer_batch(
            &caller,
            &self.custodian,
            bundle.unit_ids(),
            bundle.unit_counts(),
        )?;

        let pack_id = PackId::new(self.next_pack_id);
        self.next_pack_id += 1;

        self.ledger.record(pack_id, bundle)?;
        self.supply.mint(pack_id, caller, total)?;
        self.packs.insert(
            pack_id,
            PackRecord {
                creator: caller,
                metadata_uri: metadata_uri.to_string(),
                window,
                created_at: current_time,
            },
        );

        self.events.push(ContractEvent::PackCreated(PackCreated {
            pack_id,
            creator: caller,
            reward_contract: reward_contract.to_string(),
            total_supply: total,
            metadata_uri: metadata_uri.to_string(),
        }));
        Ok(pack_id)
    }

    // ───────────────────────── Open ─────────────────────────

    /// Open one unit of a pack.
    ///
    /// With a synchronous provider the opening settles within this call and
    /// the returned event is the `RewardDistributed` record. With an
    /// asynchronous provider the call stores a pending request and returns
    /// the `OpenRequested` record; settlement happens when the provider
    /// calls [`fulfill_randomness`](Self::fulfill_randomness).
    ///
    /// Known risks inherited from the randomness interface: a provider
    /// reporting insufficient entropy still has its value used, and a
    /// provider that never fulfills leaves the (pack, opener) pair blocked —
    /// there is no cancellation path.
    pub fn open(
        &mut self,
        caller: AccountId,
        pack_id: PackId,
        reward_custody: &mut dyn TokenCustody,
        provider: &mut dyn RandomnessSource,
        fee_token: &mut dyn FeeToken,
        current_time: i64,
    ) -> Result<ContractEvent, PackError> {
        if !self.reentrancy_guard.acquire() {
            return Err(PackError::Reentrancy);
        }
        let result =
            self.open_locked(caller, pack_id, reward_custody, provider, fee_token, current_time);
        self.reentrancy_guard.release();
        result
    }

    fn open_locked(
        &mut self,
        caller: AccountId,
        pack_id: PackId,
        reward_custody: &mut dyn TokenCustody,
        provider: &mut dyn RandomnessSource,
        fee_token: &mut dyn FeeToken,
        current_time: i64,
    ) -> Result<ContractEvent, PackError> {
        let record = self
            .packs
            .get(&pack_id)
            .ok_or(PackError::PackNotFound { pack_id })?;
        if !record.window.contains(current_time) {
            return Err(PackError::WindowClosed { pack_id });
        }
        if self.supply.balance_of(pack_id, &caller) == 0 {
            return Err(PackError::NoUnitsHeld { pack_id });
        }
        if self.settlement.is_pending(pack_id, &caller) {
            return Err(SettlementError::RequestAlreadyPending { pack_id }.into());
        }

        if provider.uses_external_service() {
            if let Some(fee) = provider.request_fee() {
                if fee.amount > Decimal::ZERO && !fee_token.approve(&self.provider, fee.amount) {
                    return Err(PackError::FeeApprovalFailed);
                }
            }

            let (request_id, at_block) = provider.request_random_value();
            self.settlement.register(request_id, pack_id, caller)?;

            let event = ContractEvent::OpenRequested(OpenRequested {
                pack_id,
                opener: caller,
                request_id,
                at_block,
            });
            self.events.push(event.clone());
            return Ok(event);
        }

        // Synchronous path: the random value is available now, settle within
        // this call.
        let range = self.ledger.total_packed(pack_id)?;
        let (random_value, _sufficient_entropy) = provider.random_value(range);
        self.settle(pack_id, caller, random_value, reward_custody)
    }

    // ───────────────────────── Fulfill ─────────────────────────

    /// Deliver the random value for a stored request. Callable only by the
    /// registered randomness provider; a request identifier settles at most
    /// once.
    pub fn fulfill_randomness(
        &mut self,
        caller: &str,
        request_id: RequestId,
        random_value: u64,
        reward_custody: &mut dyn TokenCustody,
    ) -> Result<ContractEvent, PackError> {
        if !self.reentrancy_guard.acquire() {
            return Err(PackError::Reentrancy);
        }
        let result = self.fulfill_locked(caller, request_id, random_value, reward_custody);
        self.reentrancy_guard.release();
        result
    }

    fn fulfill_locked(
        &mut self,
        caller: &str,
        request_id: RequestId,
        random_value: u64,
        reward_custody: &mut dyn TokenCustody,
    ) -> Result<ContractEvent, PackError> {
        if caller != self.provider {
            return Err(SettlementError::UnauthorizedFulfiller.into());
        }

        let OpenRequest { opener, pack_id } = self.settlement.take(request_id)?;
        self.settle(pack_id, opener, random_value, reward_custody)
    }

    // ───────────────────────── Settlement ─────────────────────────

    /// Shared settlement tail for both paths: burn one pack unit from the
    /// opener, consume one reward unit from the bundle, and push it out of
    /// custody to the opener.
    fn settle(
        &mut self,
        pack_id: PackId,
        opener: AccountId,
        random_value: u64,
        reward_custody: &mut dyn TokenCustody,
    ) -> Result<ContractEvent, PackError> {
        self.supply.burn(pack_id, &opener, 1)?;

        let bundle = self.ledger.bundle_mut(pack_id)?;
        let (reward_unit_id, _index) = selector::select(bundle, random_value)?;
        let reward_contract = bundle.reward_contract().to_string();

        reward_custody.transfer_batch(&self.custodian, &opener, &[reward_unit_id], &[1])?;

        self.events
            .push(ContractEvent::PackOpened(PackOpened { pack_id, opener }));
        let event = ContractEvent::RewardDistributed(RewardDistributed {
            pack_id,
            opener,
            reward_contract,
            reward_unit_id,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    // ───────────────────────── Read Accessors ─────────────────────────

    /// Metadata record for a pack.
    pub fn pack(&self, pack_id: PackId) -> Option<&PackRecord> {
        self.packs.get(&pack_id)
    }

    /// Remaining bundle contents for a pack.
    pub fn bundle(&self, pack_id: PackId) -> Option<&RewardBundle> {
        self.ledger.bundle(pack_id).ok()
    }

    /// Outstanding pack units across all holders.
    pub fn total_supply(&self, pack_id: PackId) -> u64 {
        self.supply.total_supply(pack_id)
    }

    /// Pack units held by one account.
    pub fn balance_of(&self, pack_id: PackId, holder: &AccountId) -> u64 {
        self.supply.balance_of(pack_id, holder)
    }

    /// Whether an async open is in flight for (pack, opener).
    pub fn is_open_pending(&self, pack_id: PackId, opener: &AccountId) -> bool {
        self.settlement.is_pending(pack_id, opener)
    }

    /// Stored record for an unfulfilled request.
    pub fn pending_request(&self, request_id: RequestId) -> Option<&OpenRequest> {
        self.settlement.request(request_id)
    }

    /// Custody identity of this contract.
    pub fn custodian(&self) -> AccountId {
        self.custodian
    }

    /// Registered randomness provider identity.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }
}
