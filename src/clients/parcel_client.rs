use crate::model::{
    normalize_email, DeliveryStatus, Parcel, ParcelCreate, ParcelFilter, ParcelId, ParcelUpdate,
    RiderId, RiderParcelGroup,
};
use crate::parcel_actor::{ParcelAction, ParcelError};
use async_trait::async_trait;
use entity_store::{EntityClient, EntityStoreClient, Query, SortOrder, StoreError};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Client for interacting with the Parcel actor.
#[derive(Clone)]
pub struct ParcelClient {
    inner: EntityStoreClient<Parcel>,
}

impl ParcelClient {
    pub fn new(inner: EntityStoreClient<Parcel>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<Parcel> for ParcelClient {
    type Error = ParcelError;

    fn inner(&self) -> &EntityStoreClient<Parcel> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.rejection::<ParcelError>() {
            Ok(err) => err,
            Err(StoreError::NotFound(id)) => ParcelError::NotFound(id),
            Err(StoreError::Duplicate(tracking_id)) => ParcelError::AlreadyExists(tracking_id),
            Err(other) => ParcelError::StoreFailure(other.to_string()),
        }
    }
}

fn newest_first(query: Query<Parcel>) -> Query<Parcel> {
    query.sort_by(|p| (p.created_at, p.id), SortOrder::Descending)
}

impl ParcelClient {
    async fn act(&self, id: ParcelId, action: ParcelAction) -> Result<Parcel, ParcelError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Creates a parcel in `created`/`unpaid`/`not_cashed_out` and opens its tracking
    /// history.
    #[instrument(skip(self))]
    pub async fn create_parcel(&self, params: ParcelCreate) -> Result<ParcelId, ParcelError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Edits title or cost. Only accepted while the parcel is `created`.
    #[instrument(skip(self))]
    pub async fn update_details(
        &self,
        id: ParcelId,
        update: ParcelUpdate,
    ) -> Result<Parcel, ParcelError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Parcels matching every present filter, newest first.
    #[instrument(skip(self))]
    pub async fn list_by_filters(&self, filter: ParcelFilter) -> Result<Vec<Parcel>, ParcelError> {
        debug!("Sending request");
        let created_by = filter.created_by.as_deref().map(normalize_email);
        let query = Query::<Parcel>::all()
            .filter_opt(created_by, |p, email: &String| &p.created_by == email)
            .filter_opt(filter.payment_status, |p, status| p.payment_status == *status)
            .filter_opt(filter.delivery_status, |p, status| p.delivery_status == *status);
        self.list(newest_first(query)).await
    }

    /// A rider's parcels in one group, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_rider(
        &self,
        rider_email: &str,
        group: RiderParcelGroup,
    ) -> Result<Vec<Parcel>, ParcelError> {
        debug!("Sending request");
        let email = normalize_email(rider_email);
        let statuses = group.statuses();
        let query = Query::<Parcel>::all().filter(move |p| {
            p.rider_email() == Some(email.as_str()) && statuses.contains(&p.delivery_status)
        });
        self.list(newest_first(query)).await
    }

    /// Number of parcels per delivery status. Statuses with no parcels are omitted.
    #[instrument(skip(self))]
    pub async fn status_counts(&self) -> Result<Vec<(DeliveryStatus, usize)>, ParcelError> {
        debug!("Sending request");
        let parcels = self.list(Query::all()).await?;
        let mut counts = BTreeMap::new();
        for parcel in &parcels {
            *counts.entry(parcel.delivery_status).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }

    /// Assigns a `created` parcel to an active rider and marks the rider `in_delivery`.
    ///
    /// The stored rider name and email are copied from the rider directory. If the
    /// rider cannot take the parcel, the parcel is left unchanged.
    #[instrument(skip(self))]
    pub async fn assign_rider(
        &self,
        id: ParcelId,
        rider: RiderId,
        by: &str,
    ) -> Result<Parcel, ParcelError> {
        debug!("Sending request");
        self.act(
            id,
            ParcelAction::AssignRider {
                rider,
                by: by.to_string(),
            },
        )
        .await
    }

    /// Advances the delivery status along the state machine.
    #[instrument(skip(self))]
    pub async fn update_delivery_status(
        &self,
        id: ParcelId,
        status: DeliveryStatus,
        by: &str,
    ) -> Result<Parcel, ParcelError> {
        debug!("Sending request");
        self.act(
            id,
            ParcelAction::UpdateStatus {
                status,
                by: by.to_string(),
            },
        )
        .await
    }

    /// `unpaid -> paid`; fails with [`ParcelError::AlreadyPaid`] otherwise.
    ///
    /// Payments should go through
    /// [`PaymentClient::record_payment`](crate::clients::PaymentClient::record_payment),
    /// which calls this and writes the record together with it.
    #[instrument(skip(self))]
    pub async fn mark_paid(&self, id: ParcelId) -> Result<Parcel, ParcelError> {
        debug!("Sending request");
        self.act(id, ParcelAction::MarkPaid).await
    }

    #[instrument(skip(self))]
    pub async fn mark_cashed_out(&self, id: ParcelId) -> Result<Parcel, ParcelError> {
        debug!("Sending request");
        self.act(id, ParcelAction::MarkCashedOut).await
    }
}
