//! Request ledger.
//!
//! Three independently-typed collections - invitations, join requests and
//! collaboration requests - each a [`Shard`] over its record type. The
//! shard's [`transition_if_pending`](Shard::transition_if_pending) is the
//! single re-entrancy guard of the whole engine: checking `pending` and
//! writing the terminal status happen as one step under the write lock, so
//! two concurrent accepts on the same request cannot both commit.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{
    BoardId, CollaborationRequest, Invitation, JoinRequest, MembershipRequest, RequestId,
    RequestStatus, UserId,
};
use crate::error::{Error, Result};

/// One typed request collection.
#[derive(Clone)]
pub struct Shard<T> {
    records: Arc<RwLock<HashMap<RequestId, T>>>,
}

impl<T> Default for Shard<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: MembershipRequest> Shard<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: T) {
        self.records.write().await.insert(record.id(), record);
    }

    pub async fn get(&self, id: RequestId) -> Option<T> {
        self.records.read().await.get(&id).cloned()
    }

    /// The pending record for the (board, requester) natural key, if any.
    pub async fn pending_for(&self, board: BoardId, requester: UserId) -> Option<T> {
        self.records
            .read()
            .await
            .values()
            .find(|r| r.board() == board && r.requester() == requester && r.status().is_pending())
            .cloned()
    }

    /// All pending records for a board, newest first.
    pub async fn pending_for_board(&self, board: BoardId) -> Vec<T> {
        let records = self.records.read().await;
        let mut found: Vec<T> = records
            .values()
            .filter(|r| r.board() == board && r.status().is_pending())
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        found
    }

    /// Every record a requester has submitted, any status, newest first.
    pub async fn all_for_requester(&self, requester: UserId) -> Vec<T> {
        let records = self.records.read().await;
        let mut found: Vec<T> = records
            .values()
            .filter(|r| r.requester() == requester)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        found
    }

    /// Atomically move a record out of `pending`.
    ///
    /// The status check and the write are one step under the write lock;
    /// a request that already left `pending` fails with `Conflict` and is
    /// left untouched. `mutate` runs on the record in the same step, for
    /// fields bound at resolution time (e.g. a rejection reason). Returns
    /// the record as transitioned.
    pub async fn transition_if_pending(
        &self,
        id: RequestId,
        next: RequestStatus,
        mutate: impl FnOnce(&mut T),
    ) -> Result<T> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(format!("{} not found", T::KIND.label())))?;
        if !record.status().is_pending() {
            return Err(Error::conflict(format!(
                "{} already processed",
                T::KIND.label()
            )));
        }
        record.set_status(next);
        mutate(record);
        Ok(record.clone())
    }
}

impl Shard<Invitation> {
    /// The pending invitation for (board, recipient address), if any.
    ///
    /// Invitations key on the address rather than a resolved user id: the
    /// duplicate check must hold even if the address is later re-resolved.
    pub async fn pending_for_email(&self, board: BoardId, email: &str) -> Option<Invitation> {
        self.records
            .read()
            .await
            .values()
            .find(|r| r.board == board && r.recipient_email == email && r.status.is_pending())
            .cloned()
    }

    /// All pending invitations addressed to `email`, newest first.
    pub async fn pending_for_recipient_email(&self, email: &str) -> Vec<Invitation> {
        let records = self.records.read().await;
        let mut found: Vec<Invitation> = records
            .values()
            .filter(|r| r.recipient_email == email && r.status.is_pending())
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }
}

/// The three request collections.
#[derive(Clone, Default)]
pub struct RequestLedger {
    pub invitations: Shard<Invitation>,
    pub join_requests: Shard<JoinRequest>,
    pub collaborations: Shard<CollaborationRequest>,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }
}
