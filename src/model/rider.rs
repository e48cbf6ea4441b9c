//! Couriers who can be assigned parcels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Riders.
    RiderId,
    "rider"
);

/// Admin review state of a rider application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderStatus {
    Pending,
    Active,
    Rejected,
}

labels!(RiderStatus, "rider status", {
    Pending => "pending",
    Active => "active",
    Rejected => "rejected",
});

impl RiderStatus {
    /// pending -> active | rejected, and active -> rejected to deactivate.
    pub fn can_become(self, next: RiderStatus) -> bool {
        use RiderStatus::*;
        matches!(
            (self, next),
            (Pending, Active) | (Pending, Rejected) | (Active, Rejected)
        )
    }
}

/// Whether an active rider is free for a new parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    Available,
    InDelivery,
}

labels!(WorkStatus, "work status", {
    Available => "available",
    InDelivery => "in_delivery",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rider {
    pub id: RiderId,
    pub name: String,
    pub email: String,
    pub district: String,
    pub status: RiderStatus,
    /// Only meaningful while `status` is active. `in_delivery` exactly while
    /// `held_parcels` is above zero.
    pub work_status: WorkStatus,
    /// Parcels assigned to this rider that have not reached a terminal status.
    pub held_parcels: u32,
    pub created_at: DateTime<Utc>,
}

impl Rider {
    pub fn is_available(&self) -> bool {
        self.status == RiderStatus::Active && self.work_status == WorkStatus::Available
    }

    /// Adds one held parcel.
    pub fn take_parcel(&mut self) {
        self.held_parcels += 1;
        self.work_status = WorkStatus::InDelivery;
    }

    /// Hands one parcel back. Returns false if the rider held none.
    pub fn release_parcel(&mut self) -> bool {
        let released = self.held_parcels > 0;
        self.held_parcels = self.held_parcels.saturating_sub(1);
        if self.held_parcels == 0 {
            self.work_status = WorkStatus::Available;
        }
        released
    }
}

/// Payload of a rider's self-registration.
#[derive(Debug, Clone)]
pub struct RiderCreate {
    pub name: String,
    pub email: String,
    pub district: String,
}

/// Profile edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiderUpdate {
    pub name: Option<String>,
    pub district: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rider() -> Rider {
        Rider {
            id: RiderId(1),
            name: "Rafi".into(),
            email: "r@x.com".into(),
            district: "Dhaka".into(),
            status: RiderStatus::Active,
            work_status: WorkStatus::Available,
            held_parcels: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rider_is_free_only_after_last_parcel() {
        let mut rider = rider();
        rider.take_parcel();
        rider.take_parcel();
        assert_eq!(rider.work_status, WorkStatus::InDelivery);

        assert!(rider.release_parcel());
        assert_eq!(rider.work_status, WorkStatus::InDelivery);
        assert!(!rider.is_available());

        assert!(rider.release_parcel());
        assert_eq!(rider.work_status, WorkStatus::Available);
        assert!(rider.is_available());

        assert!(!rider.release_parcel());
        assert_eq!(rider.held_parcels, 0);
    }
}
