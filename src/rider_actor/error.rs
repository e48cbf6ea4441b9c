//! Error types for the Rider actor.

use crate::error::ErrorKind;
use crate::model::{MalformedId, RiderId, RiderStatus, UnknownValue};
use crate::user_actor::UserError;
use thiserror::Error;

/// Errors that can occur during rider operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RiderError {
    /// The requested rider was not found.
    #[error("Rider not found: {0}")]
    NotFound(String),

    /// The rider data provided is invalid.
    #[error("Rider validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    MalformedId(#[from] MalformedId),

    #[error(transparent)]
    UnknownValue(#[from] UnknownValue),

    /// An application already exists for this email.
    #[error("Rider already registered: {0}")]
    AlreadyRegistered(String),

    /// The review state machine has no such edge.
    #[error("Cannot move rider from {from} to {to}")]
    InvalidTransition { from: RiderStatus, to: RiderStatus },

    /// Only active riders take parcels.
    #[error("Rider {0} is not active")]
    NotActive(RiderId),

    /// A rider carrying a parcel cannot be deactivated.
    #[error("Rider {0} is in delivery")]
    Busy(RiderId),

    /// Activation needs the matching user account promoted first.
    #[error("Could not promote {email} to rider: {source}")]
    Promotion { email: String, source: UserError },

    /// The store could not complete the request.
    #[error("Rider store error: {0}")]
    StoreFailure(String),
}

impl RiderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RiderError::NotFound(_) => ErrorKind::NotFound,
            RiderError::ValidationError(_)
            | RiderError::MalformedId(_)
            | RiderError::UnknownValue(_) => ErrorKind::Validation,
            RiderError::AlreadyRegistered(_)
            | RiderError::InvalidTransition { .. }
            | RiderError::NotActive(_)
            | RiderError::Busy(_) => ErrorKind::Conflict,
            RiderError::Promotion { source, .. } => source.kind(),
            RiderError::StoreFailure(_) => ErrorKind::StoreFailure,
        }
    }
}
