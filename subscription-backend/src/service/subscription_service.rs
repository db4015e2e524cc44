// src/service/subscription_service.rs

use crate::domain::subscription::{Subscription, TotalCostFilter, TotalSubscriptionCost};
use crate::error::{AppError, AppResult};
use crate::repository::{SubscriptionStorage, MAX_PAGE};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct SubscriptionService {
    storage: Arc<dyn SubscriptionStorage>,
}

impl SubscriptionService {
    pub fn new(storage: Arc<dyn SubscriptionStorage>) -> Self {
        Self { storage }
    }

    fn ensure_valid_period(subscription: &Subscription) -> AppResult<()> {
        if !subscription.has_valid_period() {
            return Err(AppError::ValidationError(
                "start_date must not be after end_date".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn get_subscription(
        &self,
        user_id: Uuid,
        service_name: &str,
    ) -> AppResult<Subscription> {
        self.storage
            .get_subscription(user_id, service_name)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Subscription '{}' for user {} not found",
                    service_name, user_id
                ))
            })
    }

    pub async fn create_subscription(&self, subscription: Subscription) -> AppResult<Subscription> {
        Self::ensure_valid_period(&subscription)?;

        let created = self.storage.create_subscription(subscription).await?;

        info!(
            user_id = %created.user_id,
            service_name = %created.service_name,
            price = created.price,
            "Subscription created"
        );
        Ok(created)
    }

    pub async fn update_subscription(&self, subscription: Subscription) -> AppResult<Subscription> {
        Self::ensure_valid_period(&subscription)?;

        let user_id = subscription.user_id;
        let service_name = subscription.service_name.clone();

        let updated = self
            .storage
            .update_subscription(subscription)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Subscription '{}' for user {} not found",
                    service_name, user_id
                ))
            })?;

        info!(
            user_id = %updated.user_id,
            service_name = %updated.service_name,
            "Subscription updated"
        );
        Ok(updated)
    }

    pub async fn delete_subscription(&self, user_id: Uuid, service_name: &str) -> AppResult<()> {
        self.storage
            .delete_subscription(user_id, service_name)
            .await?;

        info!(user_id = %user_id, service_name = %service_name, "Subscription deleted");
        Ok(())
    }

    pub async fn list_subscriptions(
        &self,
        user_id: Uuid,
        page: u64,
    ) -> AppResult<Vec<Subscription>> {
        if page == 0 {
            return Err(AppError::ValidationError(
                "page must be greater than or equal to 1".to_string(),
            ));
        }
        if page > MAX_PAGE {
            return Err(AppError::ValidationError(format!(
                "page must be less than or equal to {}",
                MAX_PAGE
            )));
        }

        Ok(self.storage.list_subscriptions(user_id, page).await?)
    }

    pub async fn total_cost(&self, filter: TotalCostFilter) -> AppResult<TotalSubscriptionCost> {
        let total = self.storage.subscription_total_cost(&filter).await?;

        info!(
            user_id = %filter.user_id,
            service_name = ?filter.service_name,
            start_date = %filter.window.start(),
            end_date = %filter.window.end(),
            total_cost = total.total_cost,
            "Subscription total cost calculated"
        );
        Ok(total)
    }
}
