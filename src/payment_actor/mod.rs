//! # Payment Actor
//!
//! Records confirmed payments. A record and the parcel's `paid` flag are written
//! together or not at all:
//!
//! 1. The transaction id is the natural key, so a replayed confirmation is refused
//!    before the parcel is touched.
//! 2. `on_create` asks the parcel actor to mark the parcel paid. If the parcel is
//!    missing or already paid, the create is aborted and nothing is stored.
//!
//! Records are immutable once written.
//!
//! ## Dependencies
//! Runs with a [`ParcelClient`](crate::clients::ParcelClient) as context.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::PaymentClient;
use crate::model::PaymentRecord;
use entity_store::EntityActor;

/// Creates a new Payment actor and its client.
pub fn new(capacity: usize) -> (EntityActor<PaymentRecord>, PaymentClient) {
    let (actor, generic_client) = EntityActor::new(capacity);
    (actor, PaymentClient::new(generic_client))
}
