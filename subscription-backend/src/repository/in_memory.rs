// src/repository/in_memory.rs
use crate::domain::subscription::{
    total_cost, Subscription, TotalCostFilter, TotalSubscriptionCost,
};
use crate::error::{StorageError, StorageResult};
use crate::repository::{page_offset, SubscriptionStorage, PAGE_SIZE};
use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

type SubscriptionKey = (Uuid, String);

/// プロセス内に保持するストレージ実装（テスト・ローカル開発用）
#[derive(Clone, Default)]
pub struct InMemorySubscriptionStorage {
    subscriptions: Arc<RwLock<HashMap<SubscriptionKey, Subscription>>>,
}

impl InMemorySubscriptionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.subscriptions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.subscriptions.read().await.is_empty()
    }
}

fn key(user_id: Uuid, service_name: &str) -> SubscriptionKey {
    (user_id, service_name.to_string())
}

#[async_trait]
impl SubscriptionStorage for InMemorySubscriptionStorage {
    async fn get_subscription(
        &self,
        user_id: Uuid,
        service_name: &str,
    ) -> StorageResult<Option<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions.get(&key(user_id, service_name)).cloned())
    }

    async fn create_subscription(
        &self,
        subscription: Subscription,
    ) -> StorageResult<Subscription> {
        let mut subscriptions = self.subscriptions.write().await;
        let key = key(subscription.user_id, &subscription.service_name);

        if subscriptions.contains_key(&key) {
            return Err(StorageError::Duplicate(format!(
                "({}, {})",
                subscription.user_id, subscription.service_name
            )));
        }

        subscriptions.insert(key, subscription.clone());
        Ok(subscription)
    }

    async fn update_subscription(
        &self,
        subscription: Subscription,
    ) -> StorageResult<Option<Subscription>> {
        let mut subscriptions = self.subscriptions.write().await;

        let Some(stored) =
            subscriptions.get_mut(&key(subscription.user_id, &subscription.service_name))
        else {
            return Ok(None);
        };

        stored.price = subscription.price;
        stored.start_date = subscription.start_date;
        stored.end_date = subscription.end_date;
        Ok(Some(stored.clone()))
    }

    async fn delete_subscription(&self, user_id: Uuid, service_name: &str) -> StorageResult<()> {
        let mut subscriptions = self.subscriptions.write().await;
        subscriptions.remove(&key(user_id, service_name));
        Ok(())
    }

    async fn list_subscriptions(
        &self,
        user_id: Uuid,
        page: u64,
    ) -> StorageResult<Vec<Subscription>> {
        let subscriptions = self.subscriptions.read().await;

        let mut owned: Vec<&Subscription> = subscriptions
            .values()
            .filter(|s| s.user_id == user_id)
            .collect();
        // PostgreSQL 実装と同じ並び順（start_date 降順、service_name のバイト順）
        owned.sort_by_key(|s| (Reverse(s.start_date), s.service_name.clone()));

        let offset = usize::try_from(page_offset(page)).unwrap_or(usize::MAX);
        let limit = usize::try_from(PAGE_SIZE).unwrap_or(usize::MAX);

        Ok(owned
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn subscription_total_cost(
        &self,
        filter: &TotalCostFilter,
    ) -> StorageResult<TotalSubscriptionCost> {
        let subscriptions = self.subscriptions.read().await;
        Ok(total_cost(subscriptions.values(), filter))
    }
}
