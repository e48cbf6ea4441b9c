//! [`StoreEntity`] implementation for [`Parcel`].
//!
//! The context is `(RiderClient, TrackingClient)`. Every status change is written to
//! the tracking ledger, and assignment and completion also flip the rider's
//! availability. Those side effects happen before the parcel changes; if one fails,
//! the earlier ones are undone through a [`UnitOfWork`] and the parcel stays as it was.

use super::unit_of_work::UnitOfWork;
use super::{ParcelAction, ParcelError};
use crate::clients::{RiderClient, TrackingClient};
use crate::model::{
    normalize_email, AssignedRider, CashoutStatus, DeliveryStatus, Parcel, ParcelCreate,
    ParcelId, ParcelUpdate, PaymentStatus, RiderId, TrackingAppend, WorkStatus,
};
use crate::rider_actor::RiderError;
use async_trait::async_trait;
use chrono::Utc;
use entity_store::StoreEntity;
use rust_decimal::Decimal;
use tracing::warn;

type ParcelContext = (RiderClient, TrackingClient);

fn title(value: &str) -> Result<String, ParcelError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ParcelError::ValidationError("title is required".into()));
    }
    Ok(value.to_string())
}

fn cost(value: Decimal) -> Result<Decimal, ParcelError> {
    if value.is_sign_negative() {
        return Err(ParcelError::ValidationError(format!(
            "cost must not be negative, got {value}"
        )));
    }
    Ok(value)
}

impl Parcel {
    fn ensure_edge(&self, next: DeliveryStatus) -> Result<(), ParcelError> {
        if self.delivery_status.can_advance_to(next) {
            Ok(())
        } else {
            Err(ParcelError::InvalidTransition {
                from: self.delivery_status,
                to: next,
            })
        }
    }

    fn ensure_editable(&self) -> Result<(), ParcelError> {
        if self.delivery_status == DeliveryStatus::Created {
            Ok(())
        } else {
            Err(ParcelError::Locked {
                id: self.id,
                status: self.delivery_status,
            })
        }
    }

    fn status_message(&self, status: DeliveryStatus) -> String {
        let rider = self
            .assigned_rider
            .as_ref()
            .map(|r| r.name.as_str())
            .unwrap_or("rider");
        match status {
            DeliveryStatus::Created => format!("Parcel \"{}\" created", self.title),
            DeliveryStatus::RiderAssigned => format!("Assigned to {rider}"),
            DeliveryStatus::InTransit => format!("Picked up by {rider}"),
            DeliveryStatus::Delivered => "Delivered to recipient".to_string(),
            DeliveryStatus::ServiceCenterDelivered => "Delivered to service center".to_string(),
        }
    }

    async fn log_status(
        &self,
        tracking: &TrackingClient,
        status: DeliveryStatus,
        by: &str,
    ) -> Result<(), ParcelError> {
        tracking
            .append(TrackingAppend {
                tracking_id: self.tracking_id.clone(),
                status: status.to_string(),
                message: self.status_message(status),
                updated_by: by.to_string(),
                parcel_id: Some(self.id),
            })
            .await
            .map(drop)
            .map_err(|source| ParcelError::Tracking {
                parcel: self.id,
                source,
            })
    }
}

/// Registers the inverse work-status request, which moves the rider's count back.
fn undo_work_status(work: &mut UnitOfWork, riders: &RiderClient, rider: RiderId, undo: WorkStatus) {
    let riders = riders.clone();
    work.completed("rider work status", async move {
        riders
            .set_work_status(rider, undo)
            .await
            .map(drop)
            .map_err(|e| e.to_string())
    });
}

#[async_trait]
impl StoreEntity for Parcel {
    type Id = ParcelId;
    type Create = ParcelCreate;
    type Update = ParcelUpdate;
    type Action = ParcelAction;
    type ActionResult = Parcel;
    type Context = ParcelContext;
    type Error = ParcelError;

    fn from_create_params(id: ParcelId, params: ParcelCreate) -> Result<Self, ParcelError> {
        let created_by = normalize_email(&params.created_by);
        if !created_by.contains('@') {
            return Err(ParcelError::ValidationError(format!(
                "creator must be an email address, got {:?}",
                params.created_by
            )));
        }
        let tracking_id = match params.tracking_id.as_deref().map(str::trim) {
            Some(t) if Parcel::is_issued_tracking_id(t) => {
                return Err(ParcelError::ValidationError(format!(
                    "tracking id {t:?} is reserved for issued ids"
                )));
            }
            Some(t) if !t.is_empty() => t.to_string(),
            _ => Parcel::default_tracking_id(id),
        };
        Ok(Self {
            id,
            tracking_id,
            title: title(&params.title)?,
            created_by,
            cost: cost(params.cost)?,
            payment_status: PaymentStatus::Unpaid,
            delivery_status: DeliveryStatus::Created,
            cashout_status: CashoutStatus::NotCashedOut,
            assigned_rider: None,
            created_at: Utc::now(),
            picked_at: None,
            delivered_at: None,
            paid_at: None,
            cashed_out_at: None,
        })
    }

    fn natural_key(&self) -> Option<String> {
        Some(self.tracking_id.clone())
    }

    /// Opens the tracking history. If the ledger refuses, the parcel is not created.
    async fn on_create(&mut self, ctx: &ParcelContext) -> Result<(), ParcelError> {
        let (_, tracking) = ctx;
        let by = self.created_by.clone();
        self.log_status(tracking, DeliveryStatus::Created, &by).await
    }

    async fn on_update(
        &mut self,
        update: ParcelUpdate,
        _ctx: &ParcelContext,
    ) -> Result<(), ParcelError> {
        self.ensure_editable()?;
        if let Some(new_title) = update.title {
            self.title = title(&new_title)?;
        }
        if let Some(new_cost) = update.cost {
            self.cost = cost(new_cost)?;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &ParcelContext) -> Result<(), ParcelError> {
        if self.delivery_status.is_with_rider() {
            return Err(ParcelError::Locked {
                id: self.id,
                status: self.delivery_status,
            });
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ParcelAction,
        ctx: &ParcelContext,
    ) -> Result<Parcel, ParcelError> {
        let (riders, tracking) = ctx;
        match action {
            ParcelAction::AssignRider { rider, by } => {
                self.ensure_edge(DeliveryStatus::RiderAssigned)?;
                let mut work = UnitOfWork::new(self.id);

                let (record, _) = riders
                    .set_work_status(rider, WorkStatus::InDelivery)
                    .await
                    .map_err(|source| ParcelError::Rider {
                        parcel: self.id,
                        source,
                    })?;
                undo_work_status(&mut work, riders, rider, WorkStatus::Available);

                self.assigned_rider = Some(AssignedRider {
                    id: record.id,
                    name: record.name,
                    email: record.email,
                });
                if let Err(e) = self
                    .log_status(tracking, DeliveryStatus::RiderAssigned, &by)
                    .await
                {
                    return Err(work.abort(e).await);
                }
                self.delivery_status = DeliveryStatus::RiderAssigned;
            }
            ParcelAction::UpdateStatus { status, by } => {
                if status == DeliveryStatus::RiderAssigned {
                    return Err(ParcelError::RiderRequired(self.id));
                }
                self.ensure_edge(status)?;
                let mut work = UnitOfWork::new(self.id);

                if status.is_terminal() {
                    if let Some(assigned) = &self.assigned_rider {
                        let released = riders
                            .set_work_status(assigned.id, WorkStatus::Available)
                            .await;
                        match released {
                            Ok((_, true)) => undo_work_status(
                                &mut work,
                                riders,
                                assigned.id,
                                WorkStatus::InDelivery,
                            ),
                            Ok((_, false)) => {
                                warn!(
                                    parcel = %self.id,
                                    rider = %assigned.id,
                                    "Rider held no parcels"
                                );
                            }
                            Err(RiderError::NotFound(_)) => {
                                warn!(
                                    parcel = %self.id,
                                    rider = %assigned.id,
                                    "Assigned rider no longer exists"
                                );
                            }
                            Err(source) => {
                                return Err(ParcelError::Rider {
                                    parcel: self.id,
                                    source,
                                })
                            }
                        }
                    }
                }

                if let Err(e) = self.log_status(tracking, status, &by).await {
                    return Err(work.abort(e).await);
                }

                let now = Utc::now();
                match status {
                    DeliveryStatus::InTransit => self.picked_at = Some(now),
                    DeliveryStatus::Delivered | DeliveryStatus::ServiceCenterDelivered => {
                        self.delivered_at = Some(now)
                    }
                    DeliveryStatus::Created | DeliveryStatus::RiderAssigned => {}
                }
                self.delivery_status = status;
            }
            ParcelAction::MarkPaid => {
                if self.payment_status == PaymentStatus::Paid {
                    return Err(ParcelError::AlreadyPaid(self.id));
                }
                self.payment_status = PaymentStatus::Paid;
                self.paid_at = Some(Utc::now());
            }
            ParcelAction::MarkCashedOut => {
                let refused = |reason| ParcelError::CashoutRefused {
                    id: self.id,
                    reason,
                };
                if self.cashout_status == CashoutStatus::CashedOut {
                    return Err(refused("already cashed out"));
                }
                if self.payment_status != PaymentStatus::Paid {
                    return Err(refused("payment not received"));
                }
                if !self.delivery_status.is_terminal() {
                    return Err(refused("delivery not completed"));
                }
                self.cashout_status = CashoutStatus::CashedOut;
                self.cashed_out_at = Some(Utc::now());
            }
        }
        Ok(self.clone())
    }
}
