use lifecycle_framework::{
    Entity, EntityId, EntityState, Interceptor, Invocation, LifecycleError, LifecycleStore,
    LoggingInterceptor, Operation, PersistentEntity, StoreActor,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Account {
    owner: String,
    balance: i64,
}

#[derive(Debug, thiserror::Error)]
#[error("Account error: {0}")]
struct AccountError(String);

impl PersistentEntity for Account {
    type Error = AccountError;

    fn on_remove(&self) -> Result<(), AccountError> {
        if self.balance != 0 {
            return Err(AccountError(format!("balance is {}", self.balance)));
        }
        Ok(())
    }
}

fn account(owner: &str, balance: i64) -> Entity<Account> {
    Entity::new(Account {
        owner: owner.into(),
        balance,
    })
}

#[derive(Default)]
struct Counter {
    before: AtomicUsize,
    after: AtomicUsize,
}

struct Counting(Arc<Counter>);

impl Interceptor for Counting {
    fn name(&self) -> &str {
        "counting"
    }

    fn pre_handle(&self, _call: &Invocation) -> bool {
        self.0.before.fetch_add(1, Ordering::SeqCst);
        true
    }

    fn post_handle(&self, _call: &Invocation, _outcome: Result<(), &LifecycleError>) {
        self.0.after.fetch_add(1, Ordering::SeqCst);
    }
}

// --- Tests ---

#[tokio::test]
async fn test_service_full_lifecycle() {
    let counter = Arc::new(Counter::default());
    let store = LifecycleStore::new()
        .with_interceptor(LoggingInterceptor)
        .with_interceptor(Counting(counter.clone()));
    let (actor, client) = StoreActor::new(10, store);
    let handle = tokio::spawn(actor.run());

    // 1. Attach
    let acct = account("alice", 10);
    let id = client.attach(&acct).await.unwrap();
    assert_eq!(id, EntityId::new(1));
    assert_eq!(acct.state(), EntityState::Persistent);

    // 2. Mutate + flush propagates
    acct.modify(|a| a.balance = 0);
    assert_eq!(client.flush().await.unwrap(), 1);
    assert_eq!(client.find(id).await.unwrap().balance, 0);

    // 3. Detach isolates
    client.detach(&acct).await.unwrap();
    assert!(!client.contains(&acct).await.unwrap());
    acct.modify(|a| a.owner = "bob".into());
    client.flush().await.unwrap();
    assert_eq!(client.find(id).await.unwrap().owner, "alice");

    // 4. Merge reconciles into a distinct managed copy
    let managed = client.merge(&acct).await.unwrap();
    assert!(!managed.same_instance(&acct));
    assert!(client.contains(&managed).await.unwrap());
    assert_eq!(client.find(id).await.unwrap().owner, "bob");

    // 5. Remove ends the lifecycle
    client.remove(&managed).await.unwrap();
    assert!(client.find(id).await.unwrap_err().is_not_found());
    assert!(client.remove(&managed).await.unwrap_err().is_invalid_state());

    // Every operation went through the chain exactly once each way.
    let before = counter.before.load(Ordering::SeqCst);
    assert_eq!(before, counter.after.load(Ordering::SeqCst));
    assert_eq!(before, 11);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_entity_callback_error_surfaces_through_service() {
    let (actor, client) = StoreActor::new(10, LifecycleStore::new());
    tokio::spawn(actor.run());

    let acct = account("carol", 5);
    let id = client.attach(&acct).await.unwrap();

    match client.remove(&acct).await {
        Err(LifecycleError::Entity(e)) => assert_eq!(e.to_string(), "Account error: balance is 5"),
        other => panic!("expected entity error, got {:?}", other),
    }
    assert_eq!(acct.state(), EntityState::Persistent);
    assert_eq!(client.find(id).await.unwrap().balance, 5);
}

#[tokio::test]
async fn test_concurrent_attaches_get_unique_ids() {
    let (actor, client) = StoreActor::new(4, LifecycleStore::new());
    tokio::spawn(actor.run());

    let mut handles = vec![];
    for i in 0..20 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.attach(&account(&format!("owner_{}", i), 0)).await
        }));
    }

    let mut ids = vec![];
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().value());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_clear_detaches_all_managed() {
    let (actor, client) = StoreActor::new(10, LifecycleStore::new());
    tokio::spawn(actor.run());

    let a = account("a", 0);
    let b = account("b", 0);
    client.attach(&a).await.unwrap();
    client.attach(&b).await.unwrap();

    assert_eq!(client.clear().await.unwrap(), 2);
    assert_eq!(a.state(), EntityState::Detached);
    assert_eq!(b.state(), EntityState::Detached);
    assert_eq!(client.flush().await.unwrap(), 0);
}

#[tokio::test]
async fn test_closed_store_reports_error() {
    let (actor, client) = StoreActor::<Account>::new(10, LifecycleStore::new());
    drop(actor);

    let err = client.flush().await.unwrap_err();
    assert!(matches!(err, LifecycleError::StoreClosed));
    assert_eq!(Operation::Flush.to_string(), "flush");
}
