use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// `/subscription/{user_id}/{service_name}` のキーを抽出する Extractor
///
/// user_id は UUID として検証し、失敗時は 400 を返す。
#[derive(Debug, Clone)]
pub struct SubscriptionKeyPath {
    pub user_id: Uuid,
    pub service_name: String,
}

impl<S> FromRequestParts<S> for SubscriptionKeyPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((user_id, service_name)) =
            Path::<(String, String)>::from_request_parts(parts, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid path parameters: {}", e)))?;

        let user_id = parse_user_id(&user_id)?;

        if service_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "service_name must not be empty".to_string(),
            ));
        }

        Ok(SubscriptionKeyPath {
            user_id,
            service_name,
        })
    }
}

/// user_id 文字列を UUID に変換
pub fn parse_user_id(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| {
        AppError::ValidationError(format!("Invalid UUID format for 'user_id': '{}'", s))
    })
}
