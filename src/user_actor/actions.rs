//! Custom actions for the User actor.

use crate::model::Role;

/// State changes on a [`User`](crate::model::User) beyond creation.
///
/// Both return the user as stored afterwards.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Replaces the user's role.
    SetRole(Role),
    /// Stamps `last_log_in` with the current time.
    RecordLogin,
}
