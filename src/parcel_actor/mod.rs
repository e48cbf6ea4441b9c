//! # Parcel Actor
//!
//! Owns every parcel and enforces its lifecycle.
//!
//! ```text
//! created -> rider_assigned -> in_transit -> delivered
//!                                        \-> service_center_delivered
//! ```
//!
//! ## Coupled updates
//! The parcel actor is the only writer of a parcel, and it drives the other kinds a
//! transition touches:
//! - assigning a rider marks that rider `in_delivery`,
//! - reaching a terminal status marks the rider `available` again,
//! - every status change appends a tracking event.
//!
//! A request either applies all of these or leaves the parcel unchanged. See
//! [`unit_of_work`] for how partial side effects are undone.
//!
//! ## Payment and cashout
//! [`ParcelAction::MarkPaid`] is the compare-and-set behind the payment recorder: the
//! actor handles one request at a time, so of two concurrent payments exactly one
//! sees `unpaid`.
//!
//! ## Dependencies
//! Runs with `(RiderClient, TrackingClient)` as context.

pub mod actions;
pub mod entity;
pub mod error;
pub(crate) mod unit_of_work;

pub use actions::*;
pub use error::*;

use crate::clients::ParcelClient;
use crate::model::Parcel;
use entity_store::EntityActor;

/// Creates a new Parcel actor and its client.
pub fn new(capacity: usize) -> (EntityActor<Parcel>, ParcelClient) {
    let (actor, generic_client) = EntityActor::new(capacity);
    (actor, ParcelClient::new(generic_client))
}
