use crate::model::{normalize_email, PaymentCreate, PaymentRecord};
use crate::payment_actor::PaymentError;
use async_trait::async_trait;
use entity_store::{EntityClient, EntityStoreClient, Query, SortOrder, StoreError};
use tracing::{debug, info, instrument};

/// Client for interacting with the Payment actor.
#[derive(Clone)]
pub struct PaymentClient {
    inner: EntityStoreClient<PaymentRecord>,
}

impl PaymentClient {
    pub fn new(inner: EntityStoreClient<PaymentRecord>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<PaymentRecord> for PaymentClient {
    type Error = PaymentError;

    fn inner(&self) -> &EntityStoreClient<PaymentRecord> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.rejection::<PaymentError>() {
            Ok(err) => err,
            Err(StoreError::NotFound(id)) => PaymentError::NotFound(id),
            Err(StoreError::Duplicate(transaction_id)) => {
                PaymentError::DuplicateTransaction(transaction_id)
            }
            Err(other) => PaymentError::StoreFailure(other.to_string()),
        }
    }
}

impl PaymentClient {
    /// Records a confirmed payment and marks its parcel paid, atomically.
    ///
    /// # Errors
    /// [`PaymentError::Conflict`] if the parcel is missing or already paid, in which
    /// case no record exists afterwards.
    #[instrument(skip(self))]
    pub async fn record_payment(
        &self,
        payment: PaymentCreate,
    ) -> Result<PaymentRecord, PaymentError> {
        debug!("Sending request");
        let id = self.inner.create(payment).await.map_err(Self::map_error)?;
        info!(%id, "Payment recorded");
        self.fetch(id).await
    }

    /// Payments, newest first, optionally only those of one payer.
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        payer_email: Option<&str>,
    ) -> Result<Vec<PaymentRecord>, PaymentError> {
        debug!("Sending request");
        let payer = payer_email.map(normalize_email);
        self.list(
            Query::<PaymentRecord>::all()
                .filter_opt(payer, |p, email: &String| &p.payer_email == email)
                .sort_by(|p| (p.paid_at, p.id), SortOrder::Descending),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{ParcelId, PaymentId};
    use entity_store::mock::MockClient;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let mut mock = MockClient::<PaymentRecord>::new();
        mock.expect_get(PaymentId(99)).return_ok(None);
        mock.expect_delete(PaymentId(99))
            .return_err(StoreError::NotFound("payment_99".into()));

        let client = PaymentClient::new(mock.client());
        let err = client.fetch(PaymentId(99)).await.unwrap_err();
        assert_eq!(err, PaymentError::NotFound("payment_99".into()));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = client.delete(PaymentId(99)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        mock.verify();
    }

    #[tokio::test]
    async fn test_replayed_transaction_is_duplicate() {
        let mut mock = MockClient::<PaymentRecord>::new();
        mock.expect_create()
            .return_err(StoreError::Duplicate("txn_1".into()));

        let client = PaymentClient::new(mock.client());
        let err = client
            .record_payment(PaymentCreate {
                parcel_id: ParcelId(1),
                payer_email: "a@x.com".into(),
                amount: dec!(150),
                method: "card".into(),
                transaction_id: "txn_1".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, PaymentError::DuplicateTransaction("txn_1".into()));
        mock.verify();
    }
}
