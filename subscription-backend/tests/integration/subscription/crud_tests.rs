// tests/integration/subscription/crud_tests.rs

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{app_helper, request, test_data};

#[tokio::test]
async fn test_create_and_get_subscription() {
    let (app, storage) = app_helper::setup_app();
    let user_id = Uuid::new_v4();

    let payload =
        test_data::create_subscription_body(user_id, "Yandex Plus", 400, "2025-07", None);

    let res = app
        .clone()
        .oneshot(request::json_request("POST", "/subscription", &payload))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let created = request::read_json(res).await;
    assert_eq!(created["id"], json!(user_id));
    assert_eq!(created["service_name"], "Yandex Plus");
    assert_eq!(created["price"], 400);
    assert_eq!(created["start_date"], "2025-07");
    assert!(created["end_date"].is_null());
    assert_eq!(storage.len().await, 1);

    // 作成したものと同じ内容が取得できる
    let res = app
        .oneshot(request::empty_request(
            "GET",
            &format!("/subscription/{}/Yandex%20Plus", user_id),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let fetched = request::read_json(res).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_with_end_date() {
    let (app, _storage) = app_helper::setup_app();
    let user_id = Uuid::new_v4();

    let payload =
        test_data::create_subscription_body(user_id, "Netflix", 999, "2025-01", Some("2025-06"));

    let res = app
        .oneshot(request::json_request("POST", "/subscription", &payload))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let created = request::read_json(res).await;
    assert_eq!(created["end_date"], "2025-06");
}

#[tokio::test]
async fn test_create_duplicate_returns_conflict() {
    let (app, storage) = app_helper::setup_app();
    let user_id = Uuid::new_v4();

    let payload = test_data::create_subscription_body(user_id, "Spotify", 299, "2025-01", None);

    let res = app
        .clone()
        .oneshot(request::json_request("POST", "/subscription", &payload))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .oneshot(request::json_request("POST", "/subscription", &payload))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let body = request::read_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_type"], "conflict");
    assert_eq!(storage.len().await, 1);
}

#[tokio::test]
async fn test_same_service_for_different_users() {
    let (app, storage) = app_helper::setup_app();

    for _ in 0..2 {
        let payload =
            test_data::create_subscription_body(Uuid::new_v4(), "Spotify", 299, "2025-01", None);
        let res = app
            .clone()
            .oneshot(request::json_request("POST", "/subscription", &payload))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    assert_eq!(storage.len().await, 2);
}

#[tokio::test]
async fn test_get_missing_subscription_returns_not_found() {
    let (app, _storage) = app_helper::setup_app();

    let res = app
        .oneshot(request::empty_request(
            "GET",
            &format!("/subscription/{}/Netflix", Uuid::new_v4()),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(request::read_bytes(res).await.is_empty());
}

#[tokio::test]
async fn test_update_subscription_keeps_key() {
    let (app, _storage) = app_helper::setup_app();
    let user_id = Uuid::new_v4();

    let payload = test_data::create_subscription_body(user_id, "Spotify", 299, "2025-01", None);
    let res = app
        .clone()
        .oneshot(request::json_request("POST", "/subscription", &payload))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let update = json!({
        "price": 349,
        "start_date": "2025-03",
        "end_date": "2025-12"
    });
    let uri = format!("/subscription/{}/Spotify", user_id);

    let res = app
        .clone()
        .oneshot(request::json_request("PUT", &uri, &update))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let updated = request::read_json(res).await;
    assert_eq!(updated["id"], json!(user_id));
    assert_eq!(updated["service_name"], "Spotify");
    assert_eq!(updated["price"], 349);
    assert_eq!(updated["start_date"], "2025-03");
    assert_eq!(updated["end_date"], "2025-12");

    // 更新後の値が取得できる
    let res = app
        .oneshot(request::empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(request::read_json(res).await, updated);
}

#[tokio::test]
async fn test_update_can_clear_end_date() {
    let (app, _storage) = app_helper::setup_app();
    let user_id = Uuid::new_v4();

    let payload =
        test_data::create_subscription_body(user_id, "Netflix", 999, "2025-01", Some("2025-06"));
    app.clone()
        .oneshot(request::json_request("POST", "/subscription", &payload))
        .await
        .unwrap();

    let update = json!({ "price": 999, "start_date": "2025-01" });
    let res = app
        .oneshot(request::json_request(
            "PUT",
            &format!("/subscription/{}/Netflix", user_id),
            &update,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let updated: Value = request::read_json(res).await;
    assert!(updated["end_date"].is_null());
}

#[tokio::test]
async fn test_update_missing_subscription_returns_not_found() {
    let (app, storage) = app_helper::setup_app();

    let update = json!({ "price": 100, "start_date": "2025-01" });
    let res = app
        .oneshot(request::json_request(
            "PUT",
            &format!("/subscription/{}/Netflix", Uuid::new_v4()),
            &update,
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(storage.is_empty().await);
}

#[tokio::test]
async fn test_update_with_mismatched_body_key() {
    let (app, _storage) = app_helper::setup_app();
    let user_id = Uuid::new_v4();

    let payload = test_data::create_subscription_body(user_id, "Spotify", 299, "2025-01", None);
    app.clone()
        .oneshot(request::json_request("POST", "/subscription", &payload))
        .await
        .unwrap();

    let update = json!({
        "id": Uuid::new_v4(),
        "service_name": "Spotify",
        "price": 349,
        "start_date": "2025-01"
    });
    let res = app
        .oneshot(request::json_request(
            "PUT",
            &format!("/subscription/{}/Spotify", user_id),
            &update,
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_subscription() {
    let (app, storage) = app_helper::setup_app();
    let user_id = Uuid::new_v4();

    let payload = test_data::create_subscription_body(user_id, "Spotify", 299, "2025-01", None);
    app.clone()
        .oneshot(request::json_request("POST", "/subscription", &payload))
        .await
        .unwrap();

    let uri = format!("/subscription/{}/Spotify", user_id);
    let res = app
        .clone()
        .oneshot(request::empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = request::read_json(res).await;
    assert_eq!(body["success"], true);
    assert!(storage.is_empty().await);

    // 削除後は取得できない
    let res = app
        .oneshot(request::empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_subscription_is_idempotent() {
    let (app, _storage) = app_helper::setup_app();
    let uri = format!("/subscription/{}/Netflix", Uuid::new_v4());

    for _ in 0..2 {
        let res = app
            .clone()
            .oneshot(request::empty_request("DELETE", &uri))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_health_check() {
    let (app, _storage) = app_helper::setup_app();

    let res = app
        .oneshot(request::empty_request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(request::read_bytes(res).await, b"OK");
}
