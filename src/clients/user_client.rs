use crate::model::{normalize_email, Role, User, UserCreate, UserId};
use crate::user_actor::{UserAction, UserError};
use async_trait::async_trait;
use entity_store::{EntityClient, EntityStoreClient, Query, SortOrder, StoreError};
use tracing::{debug, info, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: EntityStoreClient<User>,
}

impl UserClient {
    pub fn new(inner: EntityStoreClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &EntityStoreClient<User> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.rejection::<UserError>() {
            Ok(err) => err,
            Err(StoreError::NotFound(id)) => UserError::NotFound(id),
            Err(StoreError::Duplicate(email)) => UserError::AlreadyExists(email),
            Err(other) => UserError::StoreFailure(other.to_string()),
        }
    }
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let email = normalize_email(email);
        let found = self
            .list(Query::<User>::all().filter(move |u| u.email == email).limit(1))
            .await?;
        Ok(found.into_iter().next())
    }

    async fn require_by_email(&self, email: &str) -> Result<User, UserError> {
        self.find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFound(normalize_email(email)))
    }

    async fn act(&self, id: UserId, action: UserAction) -> Result<User, UserError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// Records a login, creating the account with role `user` on first sight.
    ///
    /// Two first logins of the same email race on the store's unique key; the loser
    /// falls back to recording a login on the winner's account.
    #[instrument(skip(self))]
    pub async fn upsert_on_login(&self, email: &str) -> Result<User, UserError> {
        debug!("Sending request");
        if let Some(user) = self.find_by_email(email).await? {
            return self.act(user.id, UserAction::RecordLogin).await;
        }
        match self
            .inner
            .create(UserCreate {
                email: email.to_string(),
            })
            .await
            .map_err(Self::map_error)
        {
            Ok(id) => {
                info!(%id, "Registered new user");
                self.fetch(id).await
            }
            Err(UserError::AlreadyExists(_)) => {
                let user = self.require_by_email(email).await?;
                self.act(user.id, UserAction::RecordLogin).await
            }
            Err(e) => Err(e),
        }
    }

    /// All users, newest first.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        self.list(
            Query::<User>::all().sort_by(|u| (u.created_at, u.id), SortOrder::Descending),
        )
        .await
    }

    /// Users whose email contains `partial`, case-insensitively.
    #[instrument(skip(self))]
    pub async fn search(&self, partial: &str) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        let needle = normalize_email(partial);
        self.list(
            Query::<User>::all()
                .filter(move |u| u.email.contains(&needle))
                .sort_by(|u| u.email.clone(), SortOrder::Ascending),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_role(&self, email: &str) -> Result<Role, UserError> {
        debug!("Sending request");
        Ok(self.require_by_email(email).await?.role)
    }

    /// Replaces a user's role. Parse raw labels with `str::parse::<Role>()?`, which maps
    /// an unknown role to [`UserError::InvalidRole`].
    #[instrument(skip(self))]
    pub async fn set_role(&self, id: UserId, role: Role) -> Result<User, UserError> {
        debug!("Sending request");
        self.act(id, UserAction::SetRole(role)).await
    }

    /// Gives the account with this email the `rider` role.
    #[instrument(skip(self))]
    pub async fn promote_to_rider(&self, email: &str) -> Result<User, UserError> {
        debug!("Sending request");
        let user = self.require_by_email(email).await?;
        self.act(user.id, UserAction::SetRole(Role::Rider)).await
    }
}
