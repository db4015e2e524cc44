// src/api/dto/subscription_dto.rs
use crate::domain::subscription::{BillingWindow, Subscription, TotalCostFilter};
use crate::domain::year_month::YearMonth;
use crate::error::{AppError, AppResult};
use crate::extractors::SubscriptionKeyPath;
use crate::repository::MAX_PAGE;
use crate::utils::validation::{self, price, service_name};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct CreateSubscriptionDto {
    #[serde(rename = "id")]
    pub user_id: Uuid,

    #[validate(
        length(
            min = service_name::MIN_LENGTH,
            max = service_name::MAX_LENGTH,
            message = "Service name must be between 1 and 255 characters"
        ),
        custom(function = validation::validate_service_name)
    )]
    pub service_name: String,

    #[validate(range(min = price::MIN, message = "Price must not be negative"))]
    pub price: i32,

    pub start_date: YearMonth,
    pub end_date: Option<YearMonth>,
}

impl From<CreateSubscriptionDto> for Subscription {
    fn from(dto: CreateSubscriptionDto) -> Self {
        Self {
            user_id: dto.user_id,
            service_name: dto.service_name,
            price: dto.price,
            start_date: dto.start_date,
            end_date: dto.end_date,
        }
    }
}

/// 更新リクエスト
///
/// キー（id / service_name）はパスで指定する。ボディに含める場合はパスと一致する必要がある。
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct UpdateSubscriptionDto {
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    #[validate(range(min = price::MIN, message = "Price must not be negative"))]
    pub price: i32,

    pub start_date: YearMonth,
    pub end_date: Option<YearMonth>,
}

impl UpdateSubscriptionDto {
    pub fn into_subscription(self, key: SubscriptionKeyPath) -> AppResult<Subscription> {
        if self.user_id.is_some_and(|id| id != key.user_id) {
            return Err(AppError::ValidationError(
                "Body 'id' does not match the path user_id".to_string(),
            ));
        }
        if self
            .service_name
            .as_deref()
            .is_some_and(|name| name != key.service_name)
        {
            return Err(AppError::ValidationError(
                "Body 'service_name' does not match the path service_name".to_string(),
            ));
        }

        Ok(Subscription {
            user_id: key.user_id,
            service_name: key.service_name,
            price: self.price,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

// --- Query DTOs ---

#[derive(Deserialize, Debug, Clone, Validate)]
pub struct ListSubscriptionsQuery {
    #[serde(rename = "userID", alias = "user_id")]
    pub user_id: Uuid,

    #[validate(range(min = 1, max = MAX_PAGE, message = "page is out of range"))]
    pub page: Option<u64>,
}

impl ListSubscriptionsQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }
}

#[derive(Deserialize, Debug, Clone, Validate)]
pub struct TotalCostQuery {
    #[serde(rename = "user_id", alias = "userID")]
    pub user_id: Uuid,

    pub service_name: Option<String>,
    pub start_date: YearMonth,
    pub end_date: YearMonth,
}

impl TotalCostQuery {
    pub fn into_filter(self) -> AppResult<TotalCostFilter> {
        let window = BillingWindow::new(self.start_date, self.end_date).ok_or_else(|| {
            AppError::ValidationError("start_date must not be after end_date".to_string())
        })?;

        // 空文字は未指定として扱う
        let service_name = self.service_name.filter(|name| !name.trim().is_empty());

        Ok(TotalCostFilter {
            user_id: self.user_id,
            service_name,
            window,
        })
    }
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeleteSubscriptionResponse {
    pub success: bool,
    pub message: String,
}
