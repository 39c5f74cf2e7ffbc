//! Settlement state machine for asynchronous opens
//!
//! Per (pack, opener) the machine moves `Idle -> PendingAsync -> Idle`. The
//! pending flag is set when a randomness request is issued and cleared only
//! by the matching fulfillment, so one opener can never have two in-flight
//! requests racing for the same decrementing bundle state. Request records
//! are consumed exactly once: a second fulfillment for the same identifier
//! finds nothing to settle.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use types::ids::{AccountId, PackId, RequestId};

use crate::errors::SettlementError;

/// Stored (opener, pack) tuple for one in-flight randomness request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRequest {
    pub opener: AccountId,
    pub pack_id: PackId,
}

/// Pending flags and request records for asynchronous settlement.
#[derive(Debug, Default)]
pub struct SettlementBook {
    /// (pack, opener) pairs with an in-flight request
    pending: HashSet<(PackId, AccountId)>,
    /// Provider request id -> stored open request
    requests: HashMap<RequestId, OpenRequest>,
}

impl SettlementBook {
    /// Create a new empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `opener` has an in-flight request for `pack_id`.
    pub fn is_pending(&self, pack_id: PackId, opener: &AccountId) -> bool {
        self.pending.contains(&(pack_id, *opener))
    }

    /// Look up the stored record for an in-flight request.
    pub fn request(&self, request_id: RequestId) -> Option<&OpenRequest> {
        self.requests.get(&request_id)
    }

    /// Register an issued randomness request: store the record and set the
    /// pending flag.
    ///
    /// Fails with `RequestAlreadyPending` while a prior request for the same
    /// (pack, opener) is unfulfilled, and with `RequestIdReused` if the
    /// provider hands out an identifier that is still live.
    pub fn register(
        &mut self,
        request_id: RequestId,
        pack_id: PackId,
        opener: AccountId,
    ) -> Result<(), SettlementError> {
        if self.is_pending(pack_id, &opener) {
            return Err(SettlementError::RequestAlreadyPending { pack_id });
        }
        if self.requests.contains_key(&request_id) {
            return Err(SettlementError::RequestIdReused {
                request_id: request_id.to_string(),
            });
        }

        self.requests.insert(request_id, OpenRequest { opener, pack_id });
        self.pending.insert((pack_id, opener));
        Ok(())
    }

    /// Consume the record for a fulfilled request and clear its pending flag.
    ///
    /// A request identifier is meaningful exactly once; a repeat fulfillment
    /// fails with `UnknownRequest`.
    pub fn take(&mut self, request_id: RequestId) -> Result<OpenRequest, SettlementError> {
        let request = self
            .requests
            .remove(&request_id)
            .ok_or(SettlementError::UnknownRequest {
                request_id: request_id.to_string(),
            })?;

        self.pending.remove(&(request.pack_id, request.opener));
        Ok(request)
    }
}
