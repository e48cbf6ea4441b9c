//! Error types for the User actor.

use crate::error::ErrorKind;
use crate::model::{MalformedId, UnknownValue};
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// No user with this id or email.
    #[error("User not found: {0}")]
    NotFound(String),

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    MalformedId(#[from] MalformedId),

    /// A user with the same email already exists.
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// Role updates only accept the known role labels.
    #[error("Invalid role: {0}")]
    InvalidRole(#[from] UnknownValue),

    /// The store could not complete the request.
    #[error("User store error: {0}")]
    StoreFailure(String),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::ValidationError(_) | UserError::MalformedId(_) => ErrorKind::Validation,
            UserError::AlreadyExists(_) | UserError::InvalidRole(_) => ErrorKind::Conflict,
            UserError::StoreFailure(_) => ErrorKind::StoreFailure,
        }
    }
}
