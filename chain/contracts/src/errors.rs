//! Contract-specific error types
//!
//! Comprehensive error taxonomy for custody, ledger, supply, settlement, and
//! pack lifecycle operations. Every rejection happens before any state
//! mutation; callers can retry validation and temporal errors with corrected
//! input, while invariant errors signal internal bookkeeping bugs.

use thiserror::Error;
use types::ids::PackId;

/// Custody-layer errors (multi-token vault, batch transfer)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CustodyError {
    #[error("Batch length mismatch: {ids} unit ids, {amounts} amounts")]
    BatchLengthMismatch { ids: usize, amounts: usize },

    #[error("Insufficient units of {unit_id}: required {required}, available {available}")]
    InsufficientUnits {
        unit_id: String,
        required: u64,
        available: u64,
    },

    #[error("Arithmetic overflow in unit balance")]
    Overflow,
}

/// Reward-ledger errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Reward sequence length mismatch: {ids} unit ids, {counts} counts")]
    LengthMismatch { ids: usize, counts: usize },

    #[error("Bundle already recorded for pack {pack_id}")]
    DuplicatePack { pack_id: PackId },

    #[error("No bundle recorded for pack {pack_id}")]
    UnknownPack { pack_id: PackId },

    #[error("Bundle has no remaining units")]
    EmptyBundle,

    #[error("Arithmetic overflow in packed-count total")]
    Overflow,
}

/// Supply-tracker errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SupplyError {
    #[error("Insufficient pack units: required {required}, available {available}")]
    InsufficientUnits { required: u64, available: u64 },

    #[error("Arithmetic overflow in supply accounting")]
    Overflow,
}

/// Settlement state-machine errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("Open request already pending for pack {pack_id}")]
    RequestAlreadyPending { pack_id: PackId },

    #[error("Unknown or already fulfilled request: {request_id}")]
    UnknownRequest { request_id: String },

    #[error("Request identifier already in use: {request_id}")]
    RequestIdReused { request_id: String },

    #[error("Caller is not the registered randomness provider")]
    UnauthorizedFulfiller,
}

/// Pack lifecycle errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackError {
    #[error("Pack not found: {pack_id}")]
    PackNotFound { pack_id: PackId },

    #[error("Open window closed for pack {pack_id}")]
    WindowClosed { pack_id: PackId },

    #[error("Caller holds no units of pack {pack_id}")]
    NoUnitsHeld { pack_id: PackId },

    #[error("Reward contract does not support batch multi-token transfers")]
    RewardContractUnsupported,

    #[error("Pack contract is not approved to transfer the caller's reward units")]
    NotApprovedForTransfer,

    #[error("Pack must contain at least one reward unit")]
    NothingPacked,

    #[error("Invalid open window: negative duration")]
    InvalidWindow,

    #[error("Fee token approval failed for the randomness provider")]
    FeeApprovalFailed,

    #[error("Reentrancy detected")]
    Reentrancy,

    #[error("Custody error: {0}")]
    Custody(#[from] CustodyError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Supply error: {0}")]
    Supply(#[from] SupplyError),

    #[error("Settlement error: {0}")]
    Settlement(#[from] SettlementError),
}
