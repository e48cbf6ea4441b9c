//! # Store Clients
//!
//! [`EntityStoreClient`] is the generic, cloneable handle to an
//! [`EntityActor`](crate::EntityActor).
//! [`EntityClient`] is the trait domain clients implement to inherit the standard reads
//! with their own error type.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::query::Query;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// Typed async handle to one entity actor. Holds only a sender, so clones are cheap.
pub struct EntityStoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoreEntity> Clone for EntityStoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: StoreEntity> EntityStoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R: Send>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> StoreRequest<T> + Send,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, StoreError> {
        self.request(|respond_to| StoreRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| StoreRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    pub async fn list(&self, query: Query<T>) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::List { query, respond_to })
            .await
    }
}

/// Standard reads for domain clients.
///
/// Implementors supply the inner client and an error mapping; `get`, `fetch`, `delete`
/// and `list` come for free and speak the domain's error type.
#[async_trait]
pub trait EntityClient<T: StoreEntity>: Send + Sync {
    /// The domain error type.
    type Error: Send + Sync;

    /// Access the generic store client.
    fn inner(&self) -> &EntityStoreClient<T>;

    /// Maps store failures into the domain error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetches an entity by id, `None` if absent.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetches an entity by id; absence is mapped through [`StoreError::NotFound`].
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        match self.inner().get(id.clone()).await {
            Ok(Some(item)) => Ok(item),
            Ok(None) => Err(Self::map_error(StoreError::NotFound(id.to_string()))),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Deletes an entity by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Lists entities matching `query`.
    #[tracing::instrument(skip(self))]
    async fn list(&self, query: Query<T>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(query).await.map_err(Self::map_error)
    }
}
