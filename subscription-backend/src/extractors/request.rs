use crate::error::AppError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Json, Query, Request,
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON ボディを抽出して検証する Extractor
///
/// axum 標準の Json は 422 / 415 を返すため、すべて 400 に揃える。
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                // 必須フィールド欠落・型不一致・日付形式エラー
                JsonRejection::JsonDataError(e) => AppError::ValidationError(e.body_text()),
                other => AppError::BadRequest(other.body_text()),
            })?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// クエリパラメータを抽出して検証する Extractor
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| AppError::ValidationError(rejection.body_text()))?;

        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}
