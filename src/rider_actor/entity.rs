//! [`StoreEntity`] implementation for [`Rider`].
//!
//! The context is the [`UserClient`]: activating a rider promotes the user account with
//! the same email before the rider itself changes.

use super::{RiderAction, RiderActionResult, RiderError};
use crate::clients::UserClient;
use crate::model::{
    normalize_email, Rider, RiderCreate, RiderId, RiderStatus, RiderUpdate, WorkStatus,
};
use async_trait::async_trait;
use chrono::Utc;
use entity_store::StoreEntity;

fn required(field: &str, value: &str) -> Result<String, RiderError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RiderError::ValidationError(format!("{field} is required")));
    }
    Ok(value.to_string())
}

#[async_trait]
impl StoreEntity for Rider {
    type Id = RiderId;
    type Create = RiderCreate;
    type Update = RiderUpdate;
    type Action = RiderAction;
    type ActionResult = RiderActionResult;
    type Context = UserClient;
    type Error = RiderError;

    fn from_create_params(id: RiderId, params: RiderCreate) -> Result<Self, RiderError> {
        let email = normalize_email(&params.email);
        if !email.contains('@') {
            return Err(RiderError::ValidationError(format!(
                "not an email address: {:?}",
                params.email
            )));
        }
        Ok(Self {
            id,
            name: required("name", &params.name)?,
            email,
            district: required("district", &params.district)?,
            status: RiderStatus::Pending,
            work_status: WorkStatus::Available,
            held_parcels: 0,
            created_at: Utc::now(),
        })
    }

    /// One application per email.
    fn natural_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    async fn on_update(
        &mut self,
        update: RiderUpdate,
        _users: &UserClient,
    ) -> Result<(), RiderError> {
        if let Some(name) = update.name {
            self.name = required("name", &name)?;
        }
        if let Some(district) = update.district {
            self.district = required("district", &district)?;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: RiderAction,
        users: &UserClient,
    ) -> Result<RiderActionResult, RiderError> {
        match action {
            RiderAction::SetStatus(next) => {
                if !self.status.can_become(next) {
                    return Err(RiderError::InvalidTransition {
                        from: self.status,
                        to: next,
                    });
                }
                if next == RiderStatus::Rejected && self.held_parcels > 0 {
                    return Err(RiderError::Busy(self.id));
                }
                if next == RiderStatus::Active {
                    users
                        .promote_to_rider(&self.email)
                        .await
                        .map_err(|source| RiderError::Promotion {
                            email: self.email.clone(),
                            source,
                        })?;
                    self.work_status = WorkStatus::Available;
                }
                self.status = next;
                Ok(RiderActionResult::SetStatus(self.clone()))
            }
            RiderAction::SetWorkStatus(WorkStatus::InDelivery) => {
                if self.status != RiderStatus::Active {
                    return Err(RiderError::NotActive(self.id));
                }
                self.take_parcel();
                Ok(RiderActionResult::SetWorkStatus {
                    rider: self.clone(),
                    counted: true,
                })
            }
            RiderAction::SetWorkStatus(WorkStatus::Available) => {
                let counted = self.release_parcel();
                Ok(RiderActionResult::SetWorkStatus {
                    rider: self.clone(),
                    counted,
                })
            }
        }
    }
}
