//! # Rider Actor
//!
//! Owns rider applications and each rider's availability.
//!
//! ## Review
//! A rider registers as `pending`. An admin moves it to `active` (which also promotes
//! the user account with the same email to role `rider`) or `rejected`. An active
//! rider can later be deactivated to `rejected`, unless it is carrying a parcel.
//!
//! ## Availability
//! A rider counts the parcels it holds. `work_status` is `in_delivery` while that
//! count is above zero and `available` once the last held parcel reaches a terminal
//! status. The parcel actor moves the count through
//! [`RiderClient::set_work_status`](crate::clients::RiderClient::set_work_status).
//!
//! ## Dependencies
//! Runs with a [`UserClient`](crate::clients::UserClient) as context.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::RiderClient;
use crate::model::Rider;
use entity_store::EntityActor;

/// Creates a new Rider actor and its client.
pub fn new(capacity: usize) -> (EntityActor<Rider>, RiderClient) {
    let (actor, generic_client) = EntityActor::new(capacity);
    (actor, RiderClient::new(generic_client))
}
