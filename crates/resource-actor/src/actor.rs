//! # Generic Actor Server
//!
//! The `ResourceActor` owns one collection of entities and processes requests for it
//! sequentially. It is the "server" half of the pattern; [`ResourceClient`] is the
//! "client" half.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::snapshot::{NoSnapshot, Snapshot};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The generic actor that manages a collection of entities.
///
/// **Concurrency Model**:
/// Each `ResourceActor` processes its own messages *sequentially* in a loop, so the
/// `store` needs no `Mutex` or `RwLock`. Safety comes from exclusive ownership of
/// state within the task.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Persist** (optional): `with_snapshot()` loads the durable collection.
/// 3.  **Run**: spawn `actor.run(context)` in a background task.
///
/// # Operations
///
/// * **Create**: asks `next_id_fn` for an id, refuses ids already in the store,
///   builds the entity, runs `on_create`, stores it.
/// * **Get** / **List**: clones out of the store; `List` keeps insertion order.
/// * **Update**: runs `on_update` on the stored entity and returns the new state.
/// * **Delete**: runs `on_delete`, then removes the entity.
/// * **Action**: runs `handle_action` and returns its result.
///
/// Every successful mutation is followed by a snapshot save. If the save fails the
/// caller gets [`FrameworkError::Persistence`]; the in-memory change stays applied.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn(&T::Create) -> T::Id + Send + Sync>,
    snapshot: Box<dyn Snapshot<T>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client wait until there is space.
    /// * `next_id_fn` - Derives the id for a create request. It may ignore the
    ///   payload (random ids) or derive the id from it (natural keys).
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn(&T::Create) -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
            snapshot: Box::new(NoSnapshot),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Attaches a snapshot and replaces the store with its persisted contents.
    ///
    /// Entities sharing an id keep the first occurrence.
    pub fn with_snapshot(
        mut self,
        snapshot: impl Snapshot<T> + 'static,
    ) -> Result<Self, FrameworkError> {
        let items = snapshot
            .load()
            .map_err(|e| FrameworkError::Persistence(e.to_string()))?;

        self.store.clear();
        self.order.clear();
        for item in items {
            let id = item.id().clone();
            if self.store.contains_key(&id) {
                warn!(%id, "Duplicate id in snapshot, keeping first");
                continue;
            }
            self.order.push(id.clone());
            self.store.insert(id, item);
        }
        debug!(size = self.store.len(), "Snapshot loaded");

        self.snapshot = Box::new(snapshot);
        Ok(self)
    }

    fn ordered(&self) -> Vec<&T> {
        self.order
            .iter()
            .filter_map(|id| self.store.get(id))
            .collect()
    }

    /// Saves the snapshot and hands `value` back on success.
    fn commit<R>(&self, entity_type: &str, value: R) -> Result<R, FrameworkError> {
        match self.snapshot.save(&self.ordered()) {
            Ok(()) => Ok(value),
            Err(e) => {
                error!(entity_type, error = %e, "Snapshot save failed");
                Err(FrameworkError::Persistence(e.to_string()))
            }
        }
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to reach dependencies that were created *after* the actor was instantiated but
    /// *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name ("Product" rather than "stockroom::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)(&params);

                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Already exists");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyExists(id.to_string())));
                        continue;
                    }

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            self.order.push(id.clone());
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(self.commit(entity_type, id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self.ordered().into_iter().cloned().collect();
                    debug!(entity_type, size = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let updated = item.clone();
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(self.commit(entity_type, updated));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    self.order.retain(|existing| existing != &id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(self.commit(entity_type, ()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let read_only = T::is_read_only(&action);
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let result = match result {
                        Ok(value) if !read_only => self.commit(entity_type, value),
                        other => other,
                    };
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
