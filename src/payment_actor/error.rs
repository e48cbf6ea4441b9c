//! Error types for the Payment actor.

use crate::error::ErrorKind;
use crate::model::MalformedId;
use crate::parcel_actor::ParcelError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    /// The requested payment record was not found.
    #[error("Payment not found: {0}")]
    NotFound(String),

    /// The payment data provided is invalid.
    #[error("Payment validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    MalformedId(#[from] MalformedId),

    /// The parcel is missing or was already paid; no record was written.
    #[error("Payment conflict: {0}")]
    Conflict(String),

    /// This processor transaction was already recorded.
    #[error("Transaction already recorded: {0}")]
    DuplicateTransaction(String),

    /// Payment records are never removed.
    #[error("Payment records are immutable")]
    Immutable,

    /// Marking the parcel paid failed for a reason other than a conflict.
    #[error("Payment for parcel failed: {0}")]
    Parcel(ParcelError),

    /// The store could not complete the request.
    #[error("Payment store error: {0}")]
    StoreFailure(String),
}

impl PaymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::NotFound(_) => ErrorKind::NotFound,
            PaymentError::ValidationError(_) | PaymentError::MalformedId(_) => {
                ErrorKind::Validation
            }
            PaymentError::Conflict(_)
            | PaymentError::DuplicateTransaction(_)
            | PaymentError::Immutable => ErrorKind::Conflict,
            PaymentError::Parcel(e) => e.kind(),
            PaymentError::StoreFailure(_) => ErrorKind::StoreFailure,
        }
    }
}
