//! Error types for the Tracking actor.

use crate::error::ErrorKind;
use crate::model::MalformedId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackingError {
    /// The requested event was not found.
    #[error("Tracking event not found: {0}")]
    NotFound(String),

    /// The event data provided is invalid.
    #[error("Tracking validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    MalformedId(#[from] MalformedId),

    /// Tracking events are never edited or removed.
    #[error("Tracking events are immutable")]
    Immutable,

    /// The store could not complete the request.
    #[error("Tracking store error: {0}")]
    StoreFailure(String),
}

impl TrackingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackingError::NotFound(_) => ErrorKind::NotFound,
            TrackingError::ValidationError(_) | TrackingError::MalformedId(_) => {
                ErrorKind::Validation
            }
            TrackingError::Immutable => ErrorKind::Conflict,
            TrackingError::StoreFailure(_) => ErrorKind::StoreFailure,
        }
    }
}
