//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `fmt` subscriber filtered by `RUST_LOG`
//! (default `info`). Module paths are hidden; the actors log an `entity_type` field
//! instead, and client calls open a span per operation.
//!
//! ```bash
//! # One line per create, action and refusal
//! RUST_LOG=info cargo run
//!
//! # Full payloads and every store request
//! RUST_LOG=debug cargo run
//!
//! # Only the store machinery
//! RUST_LOG=entity_store=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`**, assigning a rider reads (timestamps trimmed):
//!
//! ```text
//! INFO Action ok entity_type="Rider" id=rider_1
//! INFO Created entity_type="TrackingEvent" id=tracking_event_2 size=2
//! INFO Action ok entity_type="Parcel" id=parcel_1
//! ```
//!
//! Each actor runs in its own task, so these lines carry no caller span. The client
//! spans (`assign_rider{id=parcel_1 ...}`) only appear on the client's own `debug`
//! lines.
//!
//! Refusals surface as `WARN ... Action failed` with the error as a field.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // actors log entity_type instead
        .compact()
        .init();
}
