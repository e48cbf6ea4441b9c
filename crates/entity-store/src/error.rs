//! # Store Errors
//!
//! Failures raised by the store itself, as opposed to the entity's own rule violations,
//! which travel boxed inside [`StoreError::Rejected`].

/// Errors that can occur within the entity store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Entity actor closed")]
    Closed,
    #[error("Entity actor dropped response channel")]
    Dropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Duplicate key: {0}")]
    Duplicate(String),
    #[error("Rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Recovers the entity's typed error from a [`StoreError::Rejected`].
    ///
    /// Returns `Err(self)` unchanged for every other variant, or when the boxed error
    /// is of a different type.
    pub fn rejection<E>(self) -> Result<E, StoreError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            StoreError::Rejected(inner) => match inner.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(other) => Err(StoreError::Rejected(other)),
            },
            other => Err(other),
        }
    }

    /// True for failures of the store machinery rather than of a request.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Closed | StoreError::Dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("already paid")]
    struct AlreadyPaid;

    #[test]
    fn test_rejection_recovers_typed_error() {
        let err = StoreError::Rejected(Box::new(AlreadyPaid));
        assert_eq!(err.rejection::<AlreadyPaid>().unwrap(), AlreadyPaid);
    }

    #[test]
    fn test_rejection_leaves_other_errors_alone() {
        let err = StoreError::NotFound("parcel_1".into());
        assert!(matches!(
            err.rejection::<AlreadyPaid>(),
            Err(StoreError::NotFound(id)) if id == "parcel_1"
        ));

        let foreign = StoreError::Rejected(Box::new(std::io::Error::other("disk")));
        assert!(matches!(
            foreign.rejection::<AlreadyPaid>(),
            Err(StoreError::Rejected(_))
        ));
    }
}
