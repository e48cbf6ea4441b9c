//! # Tracking Actor
//!
//! Append-only status log per tracking id. Events cannot be updated (`Update` is
//! `Infallible`) and deletes are refused.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::TrackingClient;
use crate::model::TrackingEvent;
use entity_store::EntityActor;

/// Creates a new Tracking actor and its client.
pub fn new(capacity: usize) -> (EntityActor<TrackingEvent>, TrackingClient) {
    let (actor, generic_client) = EntityActor::new(capacity);
    (actor, TrackingClient::new(generic_client))
}
