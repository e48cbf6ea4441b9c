//! Crate-wide error taxonomy.
//!
//! Each actor has its own error enum (see `*_actor::error`). [`DeliveryError`] unites
//! them for callers that drive several kinds, and [`ErrorKind`] is the coarse category
//! a transport layer would map to a status code.

use crate::parcel_actor::ParcelError;
use crate::payment_actor::PaymentError;
use crate::rider_actor::RiderError;
use crate::tracking_actor::TrackingError;
use crate::user_actor::UserError;
use thiserror::Error;

/// Category of a failure, independent of which actor raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The referenced entity does not exist.
    NotFound,
    /// Input was malformed or incomplete.
    Validation,
    /// The request is well-formed but clashes with current state.
    Conflict,
    /// The caller lacks the required role or ownership.
    Forbidden,
    /// The store could not complete the request.
    StoreFailure,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeliveryError {
    #[error(transparent)]
    Parcel(#[from] ParcelError),

    #[error(transparent)]
    Rider(#[from] RiderError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Raised by the access guard before any store is touched.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl DeliveryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeliveryError::Parcel(e) => e.kind(),
            DeliveryError::Rider(e) => e.kind(),
            DeliveryError::User(e) => e.kind(),
            DeliveryError::Tracking(e) => e.kind(),
            DeliveryError::Payment(e) => e.kind(),
            DeliveryError::Forbidden(_) => ErrorKind::Forbidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeliveryStatus, ParcelId};

    #[test]
    fn test_kind_passes_through_wrapped_errors() {
        let err: DeliveryError = ParcelError::InvalidTransition {
            from: DeliveryStatus::Created,
            to: DeliveryStatus::Delivered,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err: DeliveryError = ParcelError::NotFound(ParcelId(3).to_string()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = DeliveryError::Forbidden("rider@x.com is not an admin".into());
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_wrapped_errors_keep_their_message() {
        let err: DeliveryError = UserError::NotFound("a@x.com".into()).into();
        assert_eq!(err.to_string(), "User not found: a@x.com");
    }
}
