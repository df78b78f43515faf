//! # Mock Framework
//!
//! Utilities for testing typed clients without spawning a real actor.
//!
//! | | `MockClient` | `create_mock_client` + `expect_*` | Real actor |
//! |---|---|---|---|
//! | **Replies** | queued up front | sent by the test | computed |
//! | **Inspects payloads** | no | yes | no |
//! | **Use case** | logic layered over several calls | exact request shape | the entity itself |
//!
//! ## Pattern 0: queued replies
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Account>::new();
//! mock.expect_action(id.clone()).return_ok(true);
//! mock.expect_get(id).return_ok(Some(account));
//! let client = AccountClient::new(mock.client());
//! // ... exercise the code under test ...
//! mock.verify();
//! ```
//!
//! ## Pattern 1: request-level assertions
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_client::<Product>(10);
//! let task = tokio::spawn(async move { ProductClient::new(client).increment(id).await });
//! let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
//! assert!(matches!(action, ProductAction::Increment));
//! responder.send(Ok(result)).unwrap();
//! ```

use crate::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A queued reply for the next request of a given kind.
enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "Get",
            Expectation::Create(_) => "Create",
            Expectation::List(_) => "List",
            Expectation::Update(_) => "Update",
            Expectation::Delete(_) => "Delete",
            Expectation::Action(_) => "Action",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<(Option<<T as ActorEntity>::Id>, Expectation<T>)>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are answered strictly in the order the expectations were queued. A
/// request that does not match the next expectation (wrong kind, or wrong id where
/// one was given) panics the background task, which the test observes as
/// [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                let Some((expected_id, expectation)) = next else {
                    panic!("Unexpected request: no expectations left");
                };
                let check_id = |id: &T::Id| {
                    if let Some(expected) = &expected_id {
                        assert_eq!(expected, id, "Request for unexpected id");
                    }
                };

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Expectation::Get(response)) => {
                        check_id(&id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Expectation::Create(response)) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Expectation::List(response)) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Expectation::Update(response),
                    ) => {
                        check_id(&id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Expectation::Delete(response)) => {
                        check_id(&id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Expectation::Action(response),
                    ) => {
                        check_id(&id);
                        let _ = respond_to.send(response);
                    }
                    (_, expectation) => {
                        panic!(
                            "Unexpected request, expected {}",
                            expectation.kind()
                        );
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Some(id), Expectation::Get)
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(None, Expectation::Create)
    }

    /// Expects a `list`.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(None, Expectation::List)
    }

    /// Expects an `update` for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(id), Expectation::Update)
    }

    /// Expects a `delete` for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Some(id), Expectation::Delete)
    }

    /// Expects an `action` for `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Some(id), Expectation::Action)
    }

    fn builder<R>(
        &self,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            id,
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder that queues the reply for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Replies with `value`.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Replies with `error`.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back((self.id, (self.wrap)(response)));
    }
}

// =============================================================================
// REQUEST-LEVEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
///
/// The test pulls each request with one of the `expect_*` helpers, inspects the
/// payload, and answers through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Returns the next request if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a List.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Returns the next request if it is an Update.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Tag {
        id: u32,
        text: String,
    }

    #[derive(Debug)]
    struct TagCreate {
        text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("tag error")]
    struct TagError;

    #[async_trait]
    impl ActorEntity for Tag {
        type Id = u32;
        type Create = TagCreate;
        type Update = ();
        type Action = ();
        type ActionResult = usize;
        type Context = ();
        type Error = TagError;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn from_create_params(id: u32, params: TagCreate) -> Result<Self, TagError> {
            Ok(Self {
                id,
                text: params.text,
            })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> {
            Ok(())
        }

        async fn handle_action(&mut self, _: (), _: &()) -> Result<usize, TagError> {
            Ok(self.text.len())
        }
    }

    #[tokio::test]
    async fn test_request_level_helpers() {
        let (client, mut receiver) = create_mock_client::<Tag>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(TagCreate {
                    text: "fragile".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.text, "fragile");
        responder.send(Ok(7)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(Tag {
            id: 1,
            text: "fragile".to_string(),
        }));
        mock.expect_action(1).return_ok(7);
        mock.expect_delete(2)
            .return_err(FrameworkError::NotFound("2".to_string()));

        let client = mock.client();
        let id = client
            .create(TagCreate {
                text: "fragile".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let fetched = client.get(1).await.unwrap().unwrap();
        assert_eq!(fetched.text, "fragile");
        assert_eq!(client.perform_action(1, ()).await.unwrap(), 7);
        assert!(matches!(
            client.delete(2).await,
            Err(FrameworkError::NotFound(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_the_reply() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_list().return_ok(Vec::new());

        let result = mock.client().get(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
