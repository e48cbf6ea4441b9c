//! Role and ownership checks in front of the core operations.
//!
//! Identity comes from an upstream authenticator as a verified email. The guard
//! resolves it to a [`User`] and checks the role the operation needs:
//!
//! | Operation | Required |
//! |---|---|
//! | create parcel, pay, list own parcels | `user`, owning the parcel |
//! | rider views and status updates | `rider`, assigned to the parcel |
//! | assign rider, review riders, roles, stats | `admin` |
//!
//! Admins pass every check.

use crate::clients::UserClient;
use crate::error::DeliveryError;
use crate::model::{normalize_email, Role, User};
use tracing::{debug, instrument, warn};

/// What the caller is acting on.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    /// Nothing owned by anyone in particular.
    Any,
    /// Something created by this email, such as a parcel or a payment history.
    OwnedBy(&'a str),
    /// A parcel assigned to the rider with this email.
    AssignedTo(&'a str),
}

/// Whether `user` may perform an operation needing `required` on `resource`.
pub fn permits(user: &User, required: Role, resource: &Resource<'_>) -> bool {
    if user.role == Role::Admin {
        return true;
    }
    let role_ok = required == Role::User || user.role == required;
    let owner_ok = match resource {
        Resource::Any => true,
        Resource::OwnedBy(email) | Resource::AssignedTo(email) => {
            normalize_email(email) == user.email
        }
    };
    role_ok && owner_ok
}

#[derive(Clone)]
pub struct AccessGuard {
    users: UserClient,
}

impl AccessGuard {
    pub fn new(users: UserClient) -> Self {
        Self { users }
    }

    /// Resolves the caller and checks the requirement.
    ///
    /// Unknown callers and failed checks are both [`DeliveryError::Forbidden`].
    #[instrument(skip(self))]
    pub async fn authorize(
        &self,
        caller_email: &str,
        required: Role,
        resource: Resource<'_>,
    ) -> Result<User, DeliveryError> {
        debug!("Checking access");
        let Some(user) = self.users.find_by_email(caller_email).await? else {
            warn!("Unknown caller");
            return Err(DeliveryError::Forbidden(format!(
                "{} is not registered",
                normalize_email(caller_email)
            )));
        };
        if !permits(&user, required, &resource) {
            warn!(role = %user.role, "Access denied");
            return Err(DeliveryError::Forbidden(format!(
                "{} ({}) may not act as {required} on {resource:?}",
                user.email, user.role
            )));
        }
        Ok(user)
    }
}
