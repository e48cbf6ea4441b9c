use crate::model::ParcelId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for TrackingEvents.
    TrackingEventId,
    "tracking_event"
);

/// One immutable entry in a shipment's status log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub id: TrackingEventId,
    /// The shipment's tracking id, not necessarily its parcel id.
    pub tracking_id: String,
    pub parcel_id: Option<ParcelId>,
    pub status: String,
    pub message: String,
    pub updated_by: String,
    pub timestamp: DateTime<Utc>,
}

/// Payload for appending a tracking event.
#[derive(Debug, Clone)]
pub struct TrackingAppend {
    pub tracking_id: String,
    pub status: String,
    pub message: String,
    pub updated_by: String,
    pub parcel_id: Option<ParcelId>,
}
