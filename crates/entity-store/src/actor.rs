//! # Entity Actor
//!
//! The server half of the store. An `EntityActor<T>` owns every `T` in a `HashMap` and
//! processes [`StoreRequest`]s one at a time, so each request sees and leaves a
//! consistent map. Different entity kinds run in different actors and make progress
//! in parallel.

use crate::client::EntityStoreClient;
use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns all entities of one kind.
///
/// # Usage Pattern
///
/// 1. **Create**: `EntityActor::new()` returns the actor and its client.
/// 2. **Wire**: hand other kinds' clients to `actor.run(context)`.
/// 3. **Run**: spawn the returned future on the Tokio runtime.
///
/// # Operations
///
/// * **Create**: next id from the counter, `from_create_params`, natural-key check,
///   `on_create`, insert.
/// * **Get**: clone of the entity, or `None`.
/// * **Update**: `on_update` in place, returns the new state.
/// * **Delete**: `on_delete`, then removal.
/// * **Action**: `handle_action` in place. Because nothing else runs meanwhile, an action
///   that checks and then writes is atomic with respect to every other request.
/// * **List**: evaluates a [`Query`](crate::Query) over the current entities.
pub struct EntityActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: StoreEntity> EntityActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` bounds the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, EntityStoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        (actor, EntityStoreClient::new(sender))
    }

    fn key_taken(&self, key: &str) -> bool {
        self.store
            .values()
            .any(|existing| existing.natural_key().as_deref() == Some(key))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to each hook of each entity.
    pub async fn run(mut self, context: T::Context) {
        // "Parcel" rather than "parcel_desk::model::parcel::Parcel"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                            continue;
                        }
                    };

                    if let Some(key) = item.natural_key() {
                        if self.key_taken(&key) {
                            warn!(entity_type, %key, "Duplicate key");
                            let _ = respond_to.send(Err(StoreError::Duplicate(key)));
                            continue;
                        }
                    }

                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        continue;
                    }

                    self.next_id += 1;
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    // Hooks mutate a copy so a failed update leaves no trace.
                    let mut draft = item.clone();
                    match draft.on_update(update, &context).await {
                        Ok(()) => {
                            *item = draft.clone();
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(draft));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = item.clone();
                    let result = draft.handle_action(action, &context).await;
                    match result {
                        Ok(outcome) => {
                            *item = draft;
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(outcome));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        }
                    }
                }
                StoreRequest::List { query, respond_to } => {
                    let items = query.apply(self.store.values());
                    debug!(entity_type, ?query, matched = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
