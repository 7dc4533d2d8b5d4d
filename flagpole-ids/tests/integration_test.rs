//! Integration tests for flagpole-ids

use flagpole_ids::*;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test]
async fn test_counter_double_through_trait_object() {
    let repo: Arc<dyn CounterRepository> = Arc::new(MockCounterRepository::new());
    let ctx = AllocationContext::background();
    let table = TableName::flags();

    let mut ids = Vec::new();
    for _ in 0..25 {
        ids.push(repo.next_id(&ctx, &table).await);
    }

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(ids.first(), Some(&1));
}

#[tokio::test]
async fn test_failing_double_never_advances() {
    let error = AllocationError::Exhausted("flags".to_string());
    let repo = MockIdRepository::failing(error.clone());
    let ctx = AllocationContext::background().with_label("create-flag");

    assert_eq!(repo.available_id(&ctx, &TableName::flags()).await, Err(error));
    assert_eq!(repo.last_issued(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_counter_allocations_are_unique() {
    let store = Arc::new(InMemoryIdStore::new());
    let mut handles = Vec::new();

    for _ in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let ctx = AllocationContext::background();
            let mut ids = Vec::new();
            for _ in 0..50 {
                ids.push(store.next_id(&ctx, &TableName::flags()).await);
            }
            ids
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.await.unwrap() {
            assert!(seen.insert(id), "duplicate id {id}");
        }
    }

    assert_eq!(seen.len(), 400);
    assert_eq!(store.issued(&TableName::flags()).await, Some(400));
}

#[tokio::test]
async fn test_allocator_from_toml_config() {
    let config = AllocationConfig::from_toml_str(
        r#"
        default_strategy = "counter"

        [tables]
        environments = "available"
        "#,
    )
    .unwrap();

    let store = Arc::new(InMemoryIdStore::new());
    let allocator = IdAllocator::new(store.clone(), store.clone(), config);
    let ctx = AllocationContext::background();
    let environments = TableName::new("environments").unwrap();

    assert_eq!(allocator.allocate(&ctx, &environments).await, Ok(1));
    assert_eq!(allocator.allocate(&ctx, &environments).await, Ok(2));
    assert!(store.release(&environments, 1).await);
    assert_eq!(allocator.allocate(&ctx, &environments).await, Ok(1));

    // counter tables skip released values
    assert_eq!(allocator.allocate(&ctx, &TableName::flags()).await, Ok(1));
    assert!(store.release(&TableName::flags(), 1).await);
    assert_eq!(allocator.allocate(&ctx, &TableName::flags()).await, Ok(2));
}

#[tokio::test]
async fn test_exhausted_store_error_passes_through_allocator() {
    let store = Arc::new(InMemoryIdStore::new().with_max_id(1));
    let config = AllocationConfig::new().with_default_strategy(AllocationStrategy::Available);
    let allocator = IdAllocator::new(store.clone(), store, config);
    let ctx = AllocationContext::background();

    assert_eq!(allocator.allocate(&ctx, &TableName::flags()).await, Ok(1));
    assert_eq!(
        allocator.allocate(&ctx, &TableName::flags()).await,
        Err(AllocationError::Exhausted("flags".to_string()))
    );
}

#[test]
fn test_error_display() {
    assert_eq!(
        AllocationError::Exhausted("flags".to_string()).to_string(),
        "identifier space exhausted for table flags"
    );
    assert!(
        AllocationError::lookup("timeout")
            .to_string()
            .contains("timeout")
    );
}
