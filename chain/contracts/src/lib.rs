//! Contract Logic for Pack Custody & Randomized Settlement
//!
//! This crate implements the contract layer for the pack system: batches of
//! fungible reward units are locked behind a single issued pack token, and a
//! weighted random selection resolves which reward a pack redeemer receives,
//! either synchronously or through an asynchronous randomness fulfillment.
//!
//! # Modules
//! - `events`: Contract events (creation, open request, settlement)
//! - `errors`: Contract-specific error types
//! - `security`: Shared security primitives (reentrancy guard)
//! - `interfaces`: Injected collaborator capabilities (custody, randomness, marketplace, fee token)
//! - `vault`: In-memory multi-token custody ledger
//! - `ledger`: Per-pack reward bundle bookkeeping
//! - `selector`: Weighted random selection over a bundle
//! - `supply`: Pack-unit supply and holder tracking
//! - `settlement`: Pending-request state machine for asynchronous opens
//! - `randomness`: Deterministic local randomness source
//! - `pack`: Pack lifecycle orchestrator (create, open, fulfill)
//!
//! # Version
//! v0.1.0 — Spec-compliant initial implementation

pub mod errors;
pub mod events;
pub mod security;
pub mod interfaces;
pub mod vault;
pub mod ledger;
pub mod selector;
pub mod supply;
pub mod settlement;
pub mod randomness;
pub mod pack;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
