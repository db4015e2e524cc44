// src/api/mod.rs
use crate::api::handlers::subscription_handler::subscription_router;
use crate::config::AppConfig;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::cors_layer;
use crate::repository::SubscriptionStorage;
use crate::service::subscription_service::SubscriptionService;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// アプリケーション状態
///
/// ストレージは起動時に生成して注入する。
#[derive(Clone)]
pub struct AppState {
    pub subscription_service: Arc<SubscriptionService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(storage: Arc<dyn SubscriptionStorage>, app_config: &AppConfig) -> Self {
        Self {
            subscription_service: Arc::new(SubscriptionService::new(storage)),
            config: Arc::new(app_config.clone()),
        }
    }
}

/// ミドルウェアを含むアプリケーション全体のルーター
pub fn app_router(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config.cors_allowed_origins);

    let router = subscription_router(app_state)
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}
