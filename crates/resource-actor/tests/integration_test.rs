use async_trait::async_trait;
use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceActor, ResourceClient};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Tally {
    id: u32,
    name: String,
    count: u64,
}

#[derive(Debug)]
struct TallyCreate {
    name: String,
}

#[derive(Debug)]
enum TallyAction {
    Bump,
}

#[derive(Debug, thiserror::Error)]
#[error("tally error")]
struct TallyError;

#[async_trait]
impl ActorEntity for Tally {
    type Id = u32;
    type Create = TallyCreate;
    type Update = ();
    type Action = TallyAction;
    type ActionResult = u64;
    type Context = ();
    type Error = TallyError;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn from_create_params(id: u32, params: TallyCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: params.name,
            count: 0,
        })
    }

    async fn on_update(&mut self, _: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, action: TallyAction, _ctx: &()) -> Result<u64, Self::Error> {
        match action {
            TallyAction::Bump => {
                self.count += 1;
                Ok(self.count)
            }
        }
    }
}

// --- Typed client using the provided trait methods ---

struct TallyClient {
    inner: ResourceClient<Tally>,
}

#[async_trait]
impl ActorClient<Tally> for TallyClient {
    type Error = String;

    fn inner(&self) -> &ResourceClient<Tally> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.to_string()
    }
}

fn sequential_ids() -> impl Fn(&TallyCreate) -> u32 + Send + Sync + 'static {
    let counter = Arc::new(AtomicU32::new(1));
    move |_| counter.fetch_add(1, Ordering::SeqCst)
}

#[tokio::test]
async fn test_concurrent_actions_are_serialized() {
    let (actor, client) = ResourceActor::<Tally>::new(8, sequential_ids());
    let handle = tokio::spawn(actor.run(()));

    let id = client
        .create(TallyCreate {
            name: "door".to_string(),
        })
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for _ in 0..50 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client.perform_action(id, TallyAction::Bump).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let tally = client.get(id).await.unwrap().unwrap();
    assert_eq!(tally.count, 50);

    // Dropping the last client stops the loop.
    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_provided_client_methods() {
    let (actor, inner) = ResourceActor::<Tally>::new(8, sequential_ids());
    tokio::spawn(actor.run(()));
    let client = TallyClient { inner };

    for name in ["front", "back"] {
        client
            .inner()
            .create(TallyCreate {
                name: name.to_string(),
            })
            .await
            .unwrap();
    }

    let names: Vec<String> = client.list().await.unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["front", "back"]);

    client.delete(1).await.unwrap();
    assert!(client.get(1).await.unwrap().is_none());

    let err = client.delete(1).await.unwrap_err();
    assert_eq!(err, "Item not found: 1");
}

#[tokio::test]
async fn test_closed_actor_reports_actor_closed() {
    let (actor, client) = ResourceActor::<Tally>::new(8, sequential_ids());
    drop(actor);

    let result = client.list().await;
    assert!(matches!(result, Err(FrameworkError::ActorClosed)));
}
