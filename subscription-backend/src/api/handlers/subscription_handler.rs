// src/api/handlers/subscription_handler.rs
use crate::api::dto::subscription_dto::{
    CreateSubscriptionDto, DeleteSubscriptionResponse, ListSubscriptionsQuery, TotalCostQuery,
    UpdateSubscriptionDto,
};
use crate::api::AppState;
use crate::domain::subscription::{Subscription, TotalSubscriptionCost};
use crate::error::AppResult;
use crate::extractors::{SubscriptionKeyPath, ValidatedJson, ValidatedQuery};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::info;

// --- CRUD Handlers ---

pub async fn get_subscription_handler(
    State(app_state): State<AppState>,
    key: SubscriptionKeyPath,
) -> AppResult<Json<Subscription>> {
    info!(
        user_id = %key.user_id,
        service_name = %key.service_name,
        "Getting subscription"
    );

    let subscription = app_state
        .subscription_service
        .get_subscription(key.user_id, &key.service_name)
        .await?;

    Ok(Json(subscription))
}

pub async fn create_subscription_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateSubscriptionDto>,
) -> AppResult<impl IntoResponse> {
    info!(
        user_id = %payload.user_id,
        service_name = %payload.service_name,
        "Creating new subscription"
    );

    let created = app_state
        .subscription_service
        .create_subscription(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_subscription_handler(
    State(app_state): State<AppState>,
    key: SubscriptionKeyPath,
    ValidatedJson(payload): ValidatedJson<UpdateSubscriptionDto>,
) -> AppResult<Json<Subscription>> {
    info!(
        user_id = %key.user_id,
        service_name = %key.service_name,
        "Updating subscription"
    );

    let subscription = payload.into_subscription(key)?;
    let updated = app_state
        .subscription_service
        .update_subscription(subscription)
        .await?;

    Ok(Json(updated))
}

pub async fn delete_subscription_handler(
    State(app_state): State<AppState>,
    key: SubscriptionKeyPath,
) -> AppResult<Json<DeleteSubscriptionResponse>> {
    info!(
        user_id = %key.user_id,
        service_name = %key.service_name,
        "Deleting subscription"
    );

    app_state
        .subscription_service
        .delete_subscription(key.user_id, &key.service_name)
        .await?;

    Ok(Json(DeleteSubscriptionResponse {
        success: true,
        message: "Subscription deleted".to_string(),
    }))
}

pub async fn list_subscriptions_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListSubscriptionsQuery>,
) -> AppResult<Json<Vec<Subscription>>> {
    let page = query.page();

    let subscriptions = app_state
        .subscription_service
        .list_subscriptions(query.user_id, page)
        .await?;

    info!(
        user_id = %query.user_id,
        page = page,
        count = subscriptions.len(),
        "Subscriptions retrieved successfully"
    );

    Ok(Json(subscriptions))
}

pub async fn total_cost_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TotalCostQuery>,
) -> AppResult<Json<TotalSubscriptionCost>> {
    let filter = query.into_filter()?;

    let total = app_state.subscription_service.total_cost(filter).await?;

    Ok(Json(total))
}

async fn health_check_handler() -> &'static str {
    "OK"
}

// --- Router Setup ---
pub fn subscription_router(app_state: AppState) -> Router {
    Router::new()
        .route("/subscription", post(create_subscription_handler))
        .route("/subscription/total-cost", get(total_cost_handler))
        .route(
            "/subscription/{user_id}/{service_name}",
            get(get_subscription_handler)
                .put(update_subscription_handler)
                .delete(delete_subscription_handler),
        )
        .route("/subscriptions", get(list_subscriptions_handler))
        .route("/health", get(health_check_handler))
        .with_state(app_state)
}
