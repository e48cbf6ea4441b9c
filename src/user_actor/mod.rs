//! # User Actor
//!
//! Owns every account. A user is created on first login with role `user`; admins may
//! change roles later, and activating a rider application promotes the matching user
//! to `rider`.
//!
//! The actor has no dependencies, so it runs with `()` as context.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use entity_store::EntityActor;

/// Creates a new User actor and its client.
pub fn new(capacity: usize) -> (EntityActor<User>, UserClient) {
    let (actor, generic_client) = EntityActor::new(capacity);
    (actor, UserClient::new(generic_client))
}
