//! Typed wrappers around [`EntityStoreClient`](entity_store::EntityStoreClient).
//!
//! Each client speaks its actor's error type and adds the domain operations on top of
//! the standard reads from [`EntityClient`](entity_store::EntityClient).

pub mod parcel_client;
pub mod payment_client;
pub mod rider_client;
pub mod tracking_client;
pub mod user_client;

pub use parcel_client::*;
pub use payment_client::*;
pub use rider_client::*;
pub use tracking_client::*;
pub use user_client::*;
