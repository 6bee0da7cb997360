use lifecycle_framework::mock::MockClient;
use lifecycle_framework::{Entity, EntityClient, EntityId, LifecycleError};
use lifecycle_sample::clients::MemberClient;
use lifecycle_sample::member_actor::MemberError;
use lifecycle_sample::model::Member;

/// MemberClient against a mocked store: checks the requests it sends and how it maps
/// store errors, without running a real store.
#[tokio::test]
async fn test_create_member_sends_attach() {
    let mut mock = MockClient::<Member>::new();
    mock.expect_attach().return_ok(EntityId::new(5));
    mock.expect_find(EntityId::new(5)).return_ok(Member::new("Alice"));

    let client = MemberClient::new(mock.client());
    let (member, id) = client.create_member("Alice").await.unwrap();
    assert_eq!(id, EntityId::new(5));
    assert_eq!(member.fields(), Member::new("Alice"));

    let stored = client.find(id).await.unwrap();
    assert_eq!(stored.name, "Alice");

    mock.verify();
}

#[tokio::test]
async fn test_rename_member_mutates_then_flushes() {
    let mut mock = MockClient::<Member>::new();
    mock.expect_flush().return_ok(1);

    let client = MemberClient::new(mock.client());
    let member = Entity::new(Member::new("A"));
    assert_eq!(client.rename_member(&member, "B").await.unwrap(), 1);
    assert_eq!(member.fields().name, "B");

    mock.verify();
}

#[tokio::test]
async fn test_store_errors_map_to_member_errors() {
    let mut mock = MockClient::<Member>::new();
    mock.expect_find(EntityId::new(3))
        .return_err(LifecycleError::NotFound(EntityId::new(3)));
    mock.expect_remove().return_err(LifecycleError::StoreDropped);

    let client = MemberClient::new(mock.client());
    assert_eq!(
        client.find(EntityId::new(3)).await,
        Err(MemberError::NotFound("3".into()))
    );

    let member = Entity::new(Member::new("A"));
    assert!(matches!(
        client.delete_member(&member).await,
        Err(MemberError::StoreCommunicationError(_))
    ));

    mock.verify();
}

#[tokio::test]
async fn test_merge_member_returns_store_copy() {
    let mut mock = MockClient::<Member>::new();
    let copy = Entity::new(Member::new("merged"));
    mock.expect_merge().return_ok(copy.clone());

    let client = MemberClient::new(mock.client());
    let detached = Entity::new(Member::new("merged"));
    let returned = client.merge_member(&detached).await.unwrap();

    assert!(returned.same_instance(&copy));
    assert!(!returned.same_instance(&detached));

    mock.verify();
}
