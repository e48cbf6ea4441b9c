use crate::model::ParcelId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for PaymentRecords.
    PaymentId,
    "payment"
);

/// Proof that a parcel was paid. Exactly one exists per paid parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub parcel_id: ParcelId,
    pub payer_email: String,
    pub amount: Decimal,
    pub method: String,
    /// Identifier issued by the payment processor; unique across records.
    pub transaction_id: String,
    pub paid_at: DateTime<Utc>,
}

/// A confirmed payment handed over by the payment processor.
#[derive(Debug, Clone)]
pub struct PaymentCreate {
    pub parcel_id: ParcelId,
    pub payer_email: String,
    pub amount: Decimal,
    pub method: String,
    pub transaction_id: String,
}
