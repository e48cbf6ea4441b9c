//! A shipment tracked from creation to delivery and cashout.
//!
//! Owned by an [`EntityActor`](entity_store::EntityActor); the transitions live in
//! [`crate::parcel_actor`].

use crate::model::RiderId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Parcels.
    ParcelId,
    "parcel"
);

/// Position of a parcel in its delivery state machine.
///
/// ```text
/// created -> rider_assigned -> in_transit -> delivered
///                                        \-> service_center_delivered
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Created,
    RiderAssigned,
    InTransit,
    Delivered,
    ServiceCenterDelivered,
}

labels!(DeliveryStatus, "delivery status", {
    Created => "created",
    RiderAssigned => "rider_assigned",
    InTransit => "in_transit",
    Delivered => "delivered",
    ServiceCenterDelivered => "service_center_delivered",
});

impl DeliveryStatus {
    /// No transition leaves a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::ServiceCenterDelivered)
    }

    /// Whether the state machine has an edge from `self` to `next`.
    pub fn can_advance_to(self, next: DeliveryStatus) -> bool {
        use DeliveryStatus::*;
        matches!(
            (self, next),
            (Created, RiderAssigned)
                | (RiderAssigned, InTransit)
                | (InTransit, Delivered)
                | (InTransit, ServiceCenterDelivered)
        )
    }

    /// A rider is holding the parcel.
    pub fn is_with_rider(self) -> bool {
        matches!(self, Self::RiderAssigned | Self::InTransit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

labels!(PaymentStatus, "payment status", {
    Unpaid => "unpaid",
    Paid => "paid",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashoutStatus {
    NotCashedOut,
    CashedOut,
}

labels!(CashoutStatus, "cashout status", {
    NotCashedOut => "not_cashed_out",
    CashedOut => "cashed_out",
});

/// The rider a parcel is assigned to.
///
/// Kept as one value so the id, name and email are always set or cleared together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedRider {
    pub id: RiderId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub id: ParcelId,
    pub tracking_id: String,
    pub title: String,
    pub created_by: String,
    pub cost: Decimal,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
    pub cashout_status: CashoutStatus,
    pub assigned_rider: Option<AssignedRider>,
    pub created_at: DateTime<Utc>,
    pub picked_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub cashed_out_at: Option<DateTime<Utc>>,
}

/// Prefix of issued tracking ids. Creators may not supply ids under it.
pub const ISSUED_TRACKING_PREFIX: &str = "TRK-";

impl Parcel {
    /// Tracking id issued when the creator does not bring one.
    pub fn default_tracking_id(id: ParcelId) -> String {
        format!("{ISSUED_TRACKING_PREFIX}{:06}", id.0)
    }

    /// True if `tracking_id` lies in the namespace of issued ids.
    pub fn is_issued_tracking_id(tracking_id: &str) -> bool {
        tracking_id
            .get(..ISSUED_TRACKING_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ISSUED_TRACKING_PREFIX))
    }

    /// Email of the assigned rider, if any.
    pub fn rider_email(&self) -> Option<&str> {
        self.assigned_rider.as_ref().map(|r| r.email.as_str())
    }
}

/// Payload for creating a new parcel.
#[derive(Debug, Clone)]
pub struct ParcelCreate {
    pub created_by: String,
    pub title: String,
    pub cost: Decimal,
    pub tracking_id: Option<String>,
}

/// Editable details. Only accepted while the parcel is still `created`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParcelUpdate {
    pub title: Option<String>,
    pub cost: Option<Decimal>,
}

/// Optional filters for parcel listings; present filters combine with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParcelFilter {
    pub created_by: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub delivery_status: Option<DeliveryStatus>,
}

/// The two views of a rider's workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderParcelGroup {
    Pending,
    Completed,
}

labels!(RiderParcelGroup, "parcel group", {
    Pending => "pending",
    Completed => "completed",
});

impl RiderParcelGroup {
    pub fn statuses(self) -> &'static [DeliveryStatus] {
        match self {
            Self::Pending => &[DeliveryStatus::RiderAssigned, DeliveryStatus::InTransit],
            Self::Completed => &[
                DeliveryStatus::Delivered,
                DeliveryStatus::ServiceCenterDelivered,
            ],
        }
    }
}
