use crate::model::{Rider, RiderCreate, RiderId, RiderStatus, RiderUpdate, WorkStatus};
use crate::rider_actor::{RiderAction, RiderActionResult, RiderError};
use async_trait::async_trait;
use entity_store::{EntityClient, EntityStoreClient, Query, SortOrder, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the Rider actor.
#[derive(Clone)]
pub struct RiderClient {
    inner: EntityStoreClient<Rider>,
}

impl RiderClient {
    pub fn new(inner: EntityStoreClient<Rider>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<Rider> for RiderClient {
    type Error = RiderError;

    fn inner(&self) -> &EntityStoreClient<Rider> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.rejection::<RiderError>() {
            Ok(err) => err,
            Err(StoreError::NotFound(id)) => RiderError::NotFound(id),
            Err(StoreError::Duplicate(email)) => RiderError::AlreadyRegistered(email),
            Err(other) => RiderError::StoreFailure(other.to_string()),
        }
    }
}

fn unexpected(result: RiderActionResult) -> RiderError {
    RiderError::StoreFailure(format!("unexpected action result: {result:?}"))
}

impl RiderClient {
    /// Files a rider application in `pending`.
    #[instrument(skip(self))]
    pub async fn register_rider(&self, params: RiderCreate) -> Result<RiderId, RiderError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        id: RiderId,
        update: RiderUpdate,
    ) -> Result<Rider, RiderError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Riders in `status`, oldest application first.
    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: RiderStatus) -> Result<Vec<Rider>, RiderError> {
        debug!("Sending request");
        self.list(
            Query::<Rider>::all()
                .filter(move |r| r.status == status)
                .sort_by(|r| (r.created_at, r.id), SortOrder::Ascending),
        )
        .await
    }

    /// Applications awaiting review.
    pub async fn list_pending(&self) -> Result<Vec<Rider>, RiderError> {
        self.list_by_status(RiderStatus::Pending).await
    }

    pub async fn list_active(&self) -> Result<Vec<Rider>, RiderError> {
        self.list_by_status(RiderStatus::Active).await
    }

    /// Active, available riders whose district matches exactly.
    #[instrument(skip(self))]
    pub async fn list_available(&self, district: &str) -> Result<Vec<Rider>, RiderError> {
        debug!("Sending request");
        let district = district.trim().to_string();
        self.list(
            Query::<Rider>::all()
                .filter(move |r| r.is_available() && r.district == district)
                .sort_by(|r| r.id, SortOrder::Ascending),
        )
        .await
    }

    /// Applies an admin review decision. Activation also promotes the rider's user.
    #[instrument(skip(self))]
    pub async fn set_rider_status(
        &self,
        id: RiderId,
        status: RiderStatus,
    ) -> Result<Rider, RiderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, RiderAction::SetStatus(status))
            .await
            .map_err(Self::map_error)?
        {
            RiderActionResult::SetStatus(rider) => Ok(rider),
            other => Err(unexpected(other)),
        }
    }

    /// Takes (`in_delivery`) or hands back (`available`) one parcel.
    ///
    /// Returns the rider and whether its held-parcel count moved. Called by the parcel
    /// actor on assignment and completion.
    #[instrument(skip(self))]
    pub async fn set_work_status(
        &self,
        id: RiderId,
        work_status: WorkStatus,
    ) -> Result<(Rider, bool), RiderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, RiderAction::SetWorkStatus(work_status))
            .await
            .map_err(Self::map_error)?
        {
            RiderActionResult::SetWorkStatus { rider, counted } => Ok((rider, counted)),
            other => Err(unexpected(other)),
        }
    }
}
