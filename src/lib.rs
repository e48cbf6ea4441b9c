//! # Parcel Desk
//!
//! > **The core of a parcel-delivery backend, built from resource-oriented actors.**
//!
//! Customers create parcels and pay for them, admins review rider applications and
//! assign riders, riders move parcels to delivery, and every step lands in a
//! tracking log.
//!
//! ## Design
//!
//! ### One actor per entity kind
//! Users, riders, parcels, tracking events and payment records each live in their own
//! [`EntityActor`](entity_store::EntityActor). An actor handles one request at a time,
//! so a check-then-write inside one request (a parcel's `unpaid -> paid`, a state
//! transition) is atomic without locks. Different kinds run in parallel.
//!
//! ### Coupled updates go through the owning actor
//! When a change spans kinds, the actor that owns the change calls the others through
//! clients injected as its context: a payment marks its parcel paid before the record
//! is stored, a parcel marks its rider busy before it is assigned, an activated rider
//! promotes its user before it turns active. A refusal anywhere leaves the caller's
//! entity unchanged.
//!
//! ### Errors
//! Each actor has its own error enum. [`DeliveryError`](error::DeliveryError) unites
//! them and [`ErrorKind`](error::ErrorKind) sorts every failure into not-found,
//! validation, conflict, forbidden or store failure.
//!
//! ## Module Tour
//!
//! - [`model`]: the domain records and their ids and status labels.
//! - [`user_actor`], [`rider_actor`], [`parcel_actor`], [`tracking_actor`],
//!   [`payment_actor`]: the rules of each kind.
//! - [`clients`]: typed handles with the domain operations.
//! - [`auth`]: role and ownership checks.
//! - [`lifecycle`]: [`DeliverySystem`](lifecycle::DeliverySystem) startup and
//!   shutdown, and tracing setup.
//! - [`config`]: runtime settings.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod parcel_actor;
pub mod payment_actor;
pub mod rider_actor;
pub mod tracking_actor;
pub mod user_actor;
