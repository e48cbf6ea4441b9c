//! Custom actions for the Parcel actor.
//!
//! Every action returns the parcel as stored afterwards. See the `StoreEntity` impl in
//! [`entity`](super::entity) for the rules.

use crate::model::{DeliveryStatus, RiderId};

#[derive(Debug, Clone)]
pub enum ParcelAction {
    /// `created -> rider_assigned`, marking the rider `in_delivery`.
    ///
    /// The rider's name and email are copied from the rider directory.
    AssignRider { rider: RiderId, by: String },
    /// Any other forward move. Reaching a terminal status frees the rider.
    UpdateStatus { status: DeliveryStatus, by: String },
    /// `unpaid -> paid`. Fails if the parcel is already paid.
    MarkPaid,
    /// Settles the rider's earnings for a paid, completed parcel.
    MarkCashedOut,
}
