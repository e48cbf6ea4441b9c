//! [`StoreEntity`] implementation for [`PaymentRecord`].
//!
//! The context is the [`ParcelClient`]. `on_create` marks the parcel paid through the
//! parcel actor's compare-and-set, so a record is stored only if this payment is the
//! one that moved the parcel from `unpaid` to `paid`.

use super::PaymentError;
use crate::clients::ParcelClient;
use crate::model::{normalize_email, PaymentCreate, PaymentId, PaymentRecord};
use crate::parcel_actor::ParcelError;
use async_trait::async_trait;
use chrono::Utc;
use entity_store::StoreEntity;
use rust_decimal::Decimal;
use std::convert::Infallible;

#[async_trait]
impl StoreEntity for PaymentRecord {
    type Id = PaymentId;
    type Create = PaymentCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ParcelClient;
    type Error = PaymentError;

    fn from_create_params(id: PaymentId, params: PaymentCreate) -> Result<Self, PaymentError> {
        if params.amount <= Decimal::ZERO {
            return Err(PaymentError::ValidationError(format!(
                "amount must be positive, got {}",
                params.amount
            )));
        }
        let transaction_id = params.transaction_id.trim();
        if transaction_id.is_empty() {
            return Err(PaymentError::ValidationError("transaction_id is required".into()));
        }
        let payer_email = normalize_email(&params.payer_email);
        if !payer_email.contains('@') {
            return Err(PaymentError::ValidationError(format!(
                "payer must be an email address, got {:?}",
                params.payer_email
            )));
        }
        Ok(Self {
            id,
            parcel_id: params.parcel_id,
            payer_email,
            amount: params.amount,
            method: params.method.trim().to_string(),
            transaction_id: transaction_id.to_string(),
            paid_at: Utc::now(),
        })
    }

    fn natural_key(&self) -> Option<String> {
        Some(self.transaction_id.clone())
    }

    async fn on_create(&mut self, parcels: &ParcelClient) -> Result<(), PaymentError> {
        match parcels.mark_paid(self.parcel_id).await {
            Ok(parcel) => {
                if let Some(paid_at) = parcel.paid_at {
                    self.paid_at = paid_at;
                }
                Ok(())
            }
            Err(ParcelError::NotFound(_) | ParcelError::AlreadyPaid(_)) => Err(
                PaymentError::Conflict(format!("{} not found or already paid", self.parcel_id)),
            ),
            Err(other) => Err(PaymentError::Parcel(other)),
        }
    }

    async fn on_update(
        &mut self,
        update: Infallible,
        _ctx: &ParcelClient,
    ) -> Result<(), PaymentError> {
        match update {}
    }

    async fn on_delete(&self, _ctx: &ParcelClient) -> Result<(), PaymentError> {
        Err(PaymentError::Immutable)
    }

    async fn handle_action(
        &mut self,
        action: Infallible,
        _ctx: &ParcelClient,
    ) -> Result<(), PaymentError> {
        match action {}
    }
}
