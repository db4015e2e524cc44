// tests/unit/service_tests.rs
use std::sync::Arc;
use subscription_backend::{
    error::{AppError, StorageError},
    repository::in_memory::InMemorySubscriptionStorage,
    service::subscription_service::SubscriptionService,
};
use uuid::Uuid;

use crate::common::{self, test_data::create_test_subscription};

#[tokio::test]
async fn test_concurrent_create_keeps_single_row() {
    common::init_test_env();
    let storage = InMemorySubscriptionStorage::new();
    let service = Arc::new(SubscriptionService::new(Arc::new(storage.clone())));
    let user_id = Uuid::new_v4();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .create_subscription(create_test_subscription(
                        user_id, "Spotify", 299, "2025-01", None,
                    ))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::Storage(StorageError::Duplicate(_))) => duplicates += 1,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(storage.len().await, 1);
}

#[tokio::test]
async fn test_crud_round_trip_through_service() {
    common::init_test_env();
    let service = SubscriptionService::new(Arc::new(InMemorySubscriptionStorage::new()));
    let user_id = Uuid::new_v4();

    let subscription = create_test_subscription(user_id, "Netflix", 999, "2025-01", None);
    service
        .create_subscription(subscription.clone())
        .await
        .unwrap();
    assert_eq!(
        service.get_subscription(user_id, "Netflix").await.unwrap(),
        subscription
    );

    let changed = create_test_subscription(user_id, "Netflix", 1099, "2025-01", Some("2025-12"));
    let updated = service.update_subscription(changed.clone()).await.unwrap();
    assert_eq!(updated, changed);

    service.delete_subscription(user_id, "Netflix").await.unwrap();
    assert!(matches!(
        service.get_subscription(user_id, "Netflix").await,
        Err(AppError::NotFound(_))
    ));
}
