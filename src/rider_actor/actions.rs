//! Custom actions for the Rider actor.

use crate::model::{Rider, RiderStatus, WorkStatus};

/// Custom actions for Rider entities.
#[derive(Debug, Clone)]
pub enum RiderAction {
    /// Admin review decision: activate, reject or deactivate.
    ///
    /// # Errors
    /// Fails on an edge the review state machine lacks, when deactivating a rider who
    /// is in delivery, or when activation cannot promote the rider's user account.
    SetStatus(RiderStatus),
    /// `in_delivery` takes one more parcel; `available` hands one back.
    ///
    /// The rider stays `in_delivery` until every held parcel is handed back. Taking a
    /// parcel requires an active rider. Handing one back is always accepted.
    SetWorkStatus(WorkStatus),
}

/// Results from RiderActions - variants match 1:1 with RiderAction
#[derive(Debug, Clone)]
pub enum RiderActionResult {
    /// The rider after the review decision.
    SetStatus(Rider),
    /// The rider after the change. `counted` is false when an `available` request
    /// found no held parcel to hand back.
    SetWorkStatus { rider: Rider, counted: bool },
}
