//! [`StoreEntity`] implementation for [`TrackingEvent`].

use super::TrackingError;
use crate::model::{TrackingAppend, TrackingEvent, TrackingEventId};
use async_trait::async_trait;
use chrono::Utc;
use entity_store::StoreEntity;
use std::convert::Infallible;

fn required(field: &str, value: String) -> Result<String, TrackingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TrackingError::ValidationError(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl StoreEntity for TrackingEvent {
    type Id = TrackingEventId;
    type Create = TrackingAppend;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = TrackingError;

    /// Stamps the event with the time the actor accepts it, so events of one shipment
    /// are timestamped in the order they were appended.
    fn from_create_params(
        id: TrackingEventId,
        params: TrackingAppend,
    ) -> Result<Self, TrackingError> {
        Ok(Self {
            id,
            tracking_id: required("tracking_id", params.tracking_id)?,
            parcel_id: params.parcel_id,
            status: required("status", params.status)?,
            message: params.message,
            updated_by: params.updated_by,
            timestamp: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), TrackingError> {
        match update {}
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), TrackingError> {
        Err(TrackingError::Immutable)
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), TrackingError> {
        match action {}
    }
}
