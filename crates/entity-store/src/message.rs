//! # Store Messages
//!
//! Requests sent from [`EntityStoreClient`](crate::EntityStoreClient) to
//! [`EntityActor`](crate::EntityActor). Each variant carries a oneshot sender for the reply.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::query::Query;
use tokio::sync::oneshot;

/// One-shot reply channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// The store's request vocabulary: CRUD, a custom action, and a filtered listing.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    List {
        query: Query<T>,
        respond_to: Response<Vec<T>>,
    },
}
