//! [`StoreEntity`] implementation for [`User`].
//!
//! Users are keyed by their normalized email, so the store itself refuses a second
//! account for the same address.

use super::{UserAction, UserError};
use crate::model::{normalize_email, Role, User, UserCreate, UserId};
use async_trait::async_trait;
use chrono::Utc;
use entity_store::StoreEntity;
use std::convert::Infallible;

#[async_trait]
impl StoreEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = Infallible;
    type Action = UserAction;
    type ActionResult = User;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        let email = normalize_email(&params.email);
        if email.is_empty() || !email.contains('@') {
            return Err(UserError::ValidationError(format!(
                "not an email address: {:?}",
                params.email
            )));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            email,
            role: Role::User,
            created_at: now,
            last_log_in: now,
        })
    }

    fn natural_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), UserError> {
        match update {}
    }

    async fn handle_action(&mut self, action: UserAction, _ctx: &()) -> Result<User, UserError> {
        match action {
            UserAction::SetRole(role) => self.role = role,
            UserAction::RecordLogin => self.last_log_in = Utc::now(),
        }
        Ok(self.clone())
    }
}
