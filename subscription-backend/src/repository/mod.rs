// src/repository/mod.rs
use crate::domain::subscription::{Subscription, TotalCostFilter, TotalSubscriptionCost};
use crate::error::StorageResult;
use async_trait::async_trait;
use uuid::Uuid;

pub mod in_memory;
pub mod subscription_repository;

/// 一覧取得の1ページあたりの件数
pub const PAGE_SIZE: u64 = 10;

/// 受け付ける最大ページ番号（OFFSET が PostgreSQL の BIGINT に収まる範囲）
pub const MAX_PAGE: u64 = i64::MAX as u64 / PAGE_SIZE;

/// サブスクリプションの保存先
///
/// API 層はこのトレイトにのみ依存するため、PostgreSQL 実装と
/// インメモリ実装を差し替えられる。
#[async_trait]
pub trait SubscriptionStorage: Send + Sync {
    /// 該当レコードがなければ `Ok(None)`
    async fn get_subscription(
        &self,
        user_id: Uuid,
        service_name: &str,
    ) -> StorageResult<Option<Subscription>>;

    async fn create_subscription(&self, subscription: Subscription)
        -> StorageResult<Subscription>;

    /// price / start_date / end_date を置き換える。該当行がなければ `Ok(None)`
    async fn update_subscription(
        &self,
        subscription: Subscription,
    ) -> StorageResult<Option<Subscription>>;

    /// 該当行がなくてもエラーにしない
    async fn delete_subscription(&self, user_id: Uuid, service_name: &str) -> StorageResult<()>;

    /// start_date の降順で最大 `PAGE_SIZE` 件。page は 1 始まり
    async fn list_subscriptions(&self, user_id: Uuid, page: u64)
        -> StorageResult<Vec<Subscription>>;

    async fn subscription_total_cost(
        &self,
        filter: &TotalCostFilter,
    ) -> StorageResult<TotalSubscriptionCost>;
}

/// 1 始まりのページ番号からオフセットを計算
///
/// 結果は `i64::MAX` で頭打ちにする。
pub fn page_offset(page: u64) -> u64 {
    page.saturating_sub(1)
        .saturating_mul(PAGE_SIZE)
        .min(i64::MAX as u64)
}
