// tests/common/test_data.rs

use serde_json::{json, Value};
use subscription_backend::domain::subscription::Subscription;
use uuid::Uuid;

/// テスト用のサブスクリプションを生成
pub fn create_test_subscription(
    user_id: Uuid,
    service_name: &str,
    price: i32,
    start_date: &str,
    end_date: Option<&str>,
) -> Subscription {
    Subscription {
        user_id,
        service_name: service_name.to_string(),
        price,
        start_date: start_date.parse().unwrap(),
        end_date: end_date.map(|d| d.parse().unwrap()),
    }
}

/// 作成リクエストのJSONボディを生成
pub fn create_subscription_body(
    user_id: Uuid,
    service_name: &str,
    price: i32,
    start_date: &str,
    end_date: Option<&str>,
) -> Value {
    json!({
        "id": user_id,
        "service_name": service_name,
        "price": price,
        "start_date": start_date,
        "end_date": end_date,
    })
}
