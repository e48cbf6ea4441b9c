use crate::model::{TrackingAppend, TrackingEvent, TrackingEventId};
use crate::tracking_actor::TrackingError;
use async_trait::async_trait;
use entity_store::{EntityClient, EntityStoreClient, Query, SortOrder, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the Tracking actor.
#[derive(Clone)]
pub struct TrackingClient {
    inner: EntityStoreClient<TrackingEvent>,
}

impl TrackingClient {
    pub fn new(inner: EntityStoreClient<TrackingEvent>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<TrackingEvent> for TrackingClient {
    type Error = TrackingError;

    fn inner(&self) -> &EntityStoreClient<TrackingEvent> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.rejection::<TrackingError>() {
            Ok(err) => err,
            Err(StoreError::NotFound(id)) => TrackingError::NotFound(id),
            Err(other) => TrackingError::StoreFailure(other.to_string()),
        }
    }
}

impl TrackingClient {
    #[instrument(skip(self))]
    pub async fn append(&self, event: TrackingAppend) -> Result<TrackingEventId, TrackingError> {
        debug!("Sending request");
        self.inner.create(event).await.map_err(Self::map_error)
    }

    /// Events for one tracking id, oldest first. Unknown ids have an empty history.
    #[instrument(skip(self))]
    pub async fn history(&self, tracking_id: &str) -> Result<Vec<TrackingEvent>, TrackingError> {
        debug!("Sending request");
        let tracking_id = tracking_id.trim().to_string();
        self.list(
            Query::<TrackingEvent>::all()
                .filter(move |e| e.tracking_id == tracking_id)
                .sort_by(|e| (e.timestamp, e.id), SortOrder::Ascending),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use entity_store::mock::MockClient;

    #[tokio::test]
    async fn test_missing_event_is_not_found() {
        let mut mock = MockClient::<TrackingEvent>::new();
        mock.expect_get(TrackingEventId(99)).return_ok(None);
        mock.expect_delete(TrackingEventId(99))
            .return_err(StoreError::NotFound("tracking_event_99".into()));

        let client = TrackingClient::new(mock.client());
        let err = client.fetch(TrackingEventId(99)).await.unwrap_err();
        assert_eq!(err, TrackingError::NotFound("tracking_event_99".into()));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = client.delete(TrackingEventId(99)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        mock.verify();
    }
}
