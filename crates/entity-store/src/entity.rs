//! # StoreEntity Trait
//!
//! The contract every stored kind implements. Associated types pin down the id, the
//! creation and update DTOs, the custom actions and the error type, so a rider payload
//! can never be sent to the parcel actor.
//!
//! Hooks with default implementations (`on_create`, `on_delete`, `natural_key`) only
//! need overriding when an entity has rules there.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any entity must implement to be owned by an [`EntityActor`](crate::EntityActor).
///
/// # Context
/// Hooks receive the `Context` passed to `run()`. Entities that must coordinate with
/// other kinds (a payment marking its parcel paid) get the other kinds' clients there.
#[async_trait]
pub trait StoreEntity: Clone + Send + Sync + 'static {
    /// Identifier, generated by the actor from a `u32` sequence.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Data required to edit an existing instance. Use `Infallible` for immutable kinds.
    type Update: Send + Sync + Debug;

    /// Entity-specific state transitions.
    type Action: Send + Sync + Debug;

    /// Result returned by [`StoreEntity::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()` time. Use `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per entity kind.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity from its id and payload. Validation of the payload belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// A key that must be unique across the store (e.g. an email address).
    ///
    /// Create requests whose key is already taken fail with
    /// [`StoreError::Duplicate`](crate::StoreError::Duplicate) before `on_create` runs.
    fn natural_key(&self) -> Option<String> {
        None
    }

    /// Runs after construction and before the entity becomes visible.
    /// An error here aborts the create; nothing is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update request in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before removal. An error here keeps the entity.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies a custom action. The actor handles nothing else while this runs.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
