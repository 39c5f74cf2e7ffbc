//! Contract events
//!
//! Events are immutable records emitted by contract operations. Each carries
//! enough identifiers (pack id, opener, reward contract, reward unit id) to
//! reconstruct a settlement externally.

use serde::{Deserialize, Serialize};
use types::ids::{AccountId, PackId, RequestId, RewardUnitId};

/// A pack was created and its supply minted to the creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackCreated {
    pub pack_id: PackId,
    pub creator: AccountId,
    pub reward_contract: String,
    pub total_supply: u64,
    pub metadata_uri: String,
}

/// An asynchronous randomness request was issued for an open
///
/// The opener's settlement is pending until the provider fulfills
/// `request_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRequested {
    pub pack_id: PackId,
    pub opener: AccountId,
    pub request_id: RequestId,
    pub at_block: u64,
}

/// A pack unit was consumed by a completed opening (either path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackOpened {
    pub pack_id: PackId,
    pub opener: AccountId,
}

/// The selected reward unit was transferred out of custody to the opener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardDistributed {
    pub pack_id: PackId,
    pub opener: AccountId,
    pub reward_contract: String,
    pub reward_unit_id: RewardUnitId,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    PackCreated(PackCreated),
    OpenRequested(OpenRequested),
    PackOpened(PackOpened),
    RewardDistributed(RewardDistributed),
}
