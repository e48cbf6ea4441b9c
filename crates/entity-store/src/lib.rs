//! # Entity Store
//!
//! Actor-backed persistence for typed entities. Every entity kind (parcels, riders,
//! users, ...) is owned by one [`EntityActor`] running in its own Tokio task; callers talk
//! to it through a cheap, cloneable [`EntityStoreClient`].
//!
//! ## Why an actor per entity kind?
//!
//! - **Per-entity atomicity**: an actor processes one request at a time, so a custom
//!   [`StoreEntity::Action`] (e.g. "mark paid if still unpaid") is a compare-and-set by
//!   construction. No locks, no read-then-write races.
//! - **No cross-kind transactions**: two different kinds live in two different actors.
//!   Coordination between them happens in entity hooks through the injected `Context`.
//! - **Uniform surface**: create / get / update / delete / action / list work the same
//!   way for every entity kind.
//!
//! ## Layers
//!
//! 1. **Entity layer** ([`StoreEntity`]) - domain rules in lifecycle hooks and actions.
//! 2. **Runtime layer** ([`EntityActor`]) - message loop, id generation, natural keys.
//! 3. **Interface layer** ([`EntityStoreClient`], [`EntityClient`]) - typed async calls.
//!
//! ## Example
//!
//! ```rust
//! use entity_store::{EntityActor, Query, SortOrder, StoreEntity};
//! use async_trait::async_trait;
//! use std::convert::Infallible;
//!
//! #[derive(Clone, Debug)]
//! struct Crate { id: u32, label: String, weight: u32 }
//!
//! #[derive(Debug)] struct CrateCreate { label: String, weight: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("crate error")] struct CrateError;
//!
//! #[async_trait]
//! impl StoreEntity for Crate {
//!     type Id = u32;
//!     type Create = CrateCreate;
//!     type Update = Infallible;
//!     type Action = Infallible;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = CrateError;
//!
//!     fn from_create_params(id: u32, params: CrateCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, label: params.label, weight: params.weight })
//!     }
//!     async fn on_update(&mut self, update: Infallible, _: &()) -> Result<(), Self::Error> {
//!         match update {}
//!     }
//!     async fn handle_action(&mut self, action: Infallible, _: &()) -> Result<(), Self::Error> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = EntityActor::<Crate>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     client.create(CrateCreate { label: "a".into(), weight: 3 }).await.unwrap();
//!     client.create(CrateCreate { label: "b".into(), weight: 9 }).await.unwrap();
//!
//!     let heavy_first = client
//!         .list(Query::all().sort_by(|c: &Crate| c.weight, SortOrder::Descending))
//!         .await
//!         .unwrap();
//!     assert_eq!(heavy_first[0].label, "b");
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations, so domain
//! clients and entities with dependencies can be tested without spawning real actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;

pub use actor::EntityActor;
pub use client::{EntityClient, EntityStoreClient};
pub use entity::StoreEntity;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use query::{Query, SortOrder};
