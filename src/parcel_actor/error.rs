//! Error types for the Parcel actor.

use crate::error::ErrorKind;
use crate::model::{DeliveryStatus, MalformedId, ParcelId, UnknownValue};
use crate::rider_actor::RiderError;
use crate::tracking_actor::TrackingError;
use thiserror::Error;

/// Errors that can occur during parcel operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParcelError {
    /// The requested parcel was not found.
    #[error("Parcel not found: {0}")]
    NotFound(String),

    /// The parcel data provided is invalid.
    #[error("Parcel validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    MalformedId(#[from] MalformedId),

    #[error(transparent)]
    UnknownValue(#[from] UnknownValue),

    /// Another parcel already uses this tracking id.
    #[error("Tracking id already in use: {0}")]
    AlreadyExists(String),

    /// The delivery state machine has no such edge.
    #[error("Cannot move parcel from {from} to {to}")]
    InvalidTransition {
        from: DeliveryStatus,
        to: DeliveryStatus,
    },

    /// `rider_assigned` is only reachable by assigning a rider.
    #[error("Parcel {0} needs a rider to become rider_assigned")]
    RiderRequired(ParcelId),

    /// Edits and deletion are refused once the parcel has moved on.
    #[error("Parcel {id} is {status} and can no longer be changed")]
    Locked { id: ParcelId, status: DeliveryStatus },

    /// The payment compare-and-set lost.
    #[error("Parcel {0} is already paid")]
    AlreadyPaid(ParcelId),

    #[error("Parcel {id} cannot be cashed out: {reason}")]
    CashoutRefused { id: ParcelId, reason: &'static str },

    /// The rider directory refused the coupled update; the parcel is unchanged.
    #[error("Rider update for {parcel} failed: {source}")]
    Rider { parcel: ParcelId, source: RiderError },

    /// The tracking ledger refused the event; the parcel is unchanged.
    #[error("Tracking update for {parcel} failed: {source}")]
    Tracking {
        parcel: ParcelId,
        source: TrackingError,
    },

    /// A step failed and undoing the earlier steps failed too.
    ///
    /// The parcel itself is unchanged, but the rider directory may not be.
    #[error(
        "Parcel {parcel} transition failed ({failed}) and rollback was incomplete ({rollback})"
    )]
    PartialFailure {
        parcel: ParcelId,
        failed: String,
        rollback: String,
    },

    /// The store could not complete the request.
    #[error("Parcel store error: {0}")]
    StoreFailure(String),
}

impl ParcelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParcelError::NotFound(_) => ErrorKind::NotFound,
            ParcelError::ValidationError(_)
            | ParcelError::MalformedId(_)
            | ParcelError::UnknownValue(_)
            | ParcelError::RiderRequired(_) => ErrorKind::Validation,
            ParcelError::AlreadyExists(_)
            | ParcelError::InvalidTransition { .. }
            | ParcelError::Locked { .. }
            | ParcelError::AlreadyPaid(_)
            | ParcelError::CashoutRefused { .. } => ErrorKind::Conflict,
            ParcelError::Rider { source, .. } => source.kind(),
            ParcelError::Tracking { source, .. } => source.kind(),
            ParcelError::PartialFailure { .. } | ParcelError::StoreFailure(_) => {
                ErrorKind::StoreFailure
            }
        }
    }
}
