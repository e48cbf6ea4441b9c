//! Undo log for the side effects of one parcel transition.
//!
//! A transition may touch the rider directory and then the tracking ledger before the
//! parcel itself changes. When a later step fails, the earlier steps are undone in
//! reverse order. The parcel's own fields need no undo: the actor discards the draft
//! of a failed action.

use super::ParcelError;
use crate::model::ParcelId;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

type Undo = Pin<Box<dyn Future<Output = Result<(), String>> + Send>>;

pub(crate) struct UnitOfWork {
    parcel: ParcelId,
    steps: Vec<(&'static str, Undo)>,
}

impl UnitOfWork {
    pub(crate) fn new(parcel: ParcelId) -> Self {
        Self {
            parcel,
            steps: Vec::new(),
        }
    }

    /// Records a finished step. `undo` only runs if the transition is aborted.
    pub(crate) fn completed(
        &mut self,
        step: &'static str,
        undo: impl Future<Output = Result<(), String>> + Send + 'static,
    ) {
        self.steps.push((step, Box::pin(undo)));
    }

    /// Undoes every recorded step and returns the error to report.
    ///
    /// That is `error` itself when the rollback succeeded, or a
    /// [`ParcelError::PartialFailure`] naming both failures when it did not.
    pub(crate) async fn abort(self, error: ParcelError) -> ParcelError {
        let UnitOfWork { parcel, steps } = self;
        let mut failures = Vec::new();

        for (step, undo) in steps.into_iter().rev() {
            match undo.await {
                Ok(()) => debug!(%parcel, step, "Step undone"),
                Err(e) => {
                    warn!(%parcel, step, error = %e, "Undo failed");
                    failures.push(format!("{step}: {e}"));
                }
            }
        }

        if failures.is_empty() {
            error
        } else {
            ParcelError::PartialFailure {
                parcel,
                failed: error.to_string(),
                rollback: failures.join("; "),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_abort_undoes_in_reverse_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut work = UnitOfWork::new(ParcelId(1));
        for step in ["first", "second"] {
            let order = order.clone();
            work.completed(step, async move {
                order.lock().unwrap().push(step);
                Ok(())
            });
        }

        let err = work.abort(ParcelError::AlreadyPaid(ParcelId(1))).await;
        assert_eq!(err, ParcelError::AlreadyPaid(ParcelId(1)));
        assert_eq!(*order.lock().unwrap(), vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_failed_undo_reports_partial_failure() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut work = UnitOfWork::new(ParcelId(2));
        let counter = runs.clone();
        work.completed("rider work status", async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err("rider actor closed".to_string())
        });

        let err = work
            .abort(ParcelError::StoreFailure("tracking down".into()))
            .await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        match err {
            ParcelError::PartialFailure { parcel, rollback, .. } => {
                assert_eq!(parcel, ParcelId(2));
                assert!(rollback.contains("rider actor closed"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unaborted_steps_never_run() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut work = UnitOfWork::new(ParcelId(3));
        let counter = runs.clone();
        work.completed("noop", async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        drop(work);
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
