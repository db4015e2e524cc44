// src/repository/subscription_repository.rs
use crate::domain::subscription::{Subscription, TotalCostFilter, TotalSubscriptionCost};
use crate::domain::subscription_model::{
    self, ActiveModel as SubscriptionActiveModel, Entity as SubscriptionEntity,
};
use crate::error::{StorageError, StorageResult};
use crate::repository::{page_offset, SubscriptionStorage, PAGE_SIZE};
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, ConnectionTrait, DbConn, Order, Set, Statement};
use tracing::debug;
use uuid::Uuid;

// 集計期間と重なる契約について 月額 × 重複月数 を合計する
// $1: user_id, $2: service_name (NULL なら全サービス), $3: 集計開始月, $4: 集計終了月
const TOTAL_COST_SQL: &str = r#"
SELECT COALESCE(SUM(
    price::BIGINT * (
        (EXTRACT(YEAR FROM LEAST(COALESCE(end_date, $4), $4)) * 12
            + EXTRACT(MONTH FROM LEAST(COALESCE(end_date, $4), $4)))
        - (EXTRACT(YEAR FROM GREATEST(start_date, $3)) * 12
            + EXTRACT(MONTH FROM GREATEST(start_date, $3)))
        + 1
    )
), 0)::BIGINT AS total_cost
FROM subscriptions
WHERE user_id = $1
  AND ($2::TEXT IS NULL OR service_name = $2)
  AND start_date <= $4
  AND (end_date IS NULL OR end_date >= $3)
"#;

pub struct SubscriptionRepository {
    db: DbConn,
}

impl SubscriptionRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionStorage for SubscriptionRepository {
    async fn get_subscription(
        &self,
        user_id: Uuid,
        service_name: &str,
    ) -> StorageResult<Option<Subscription>> {
        let model = SubscriptionEntity::find_by_id((user_id, service_name.to_string()))
            .one(&self.db)
            .await?;

        Ok(model.map(Subscription::from))
    }

    async fn create_subscription(
        &self,
        subscription: Subscription,
    ) -> StorageResult<Subscription> {
        let new_subscription = SubscriptionActiveModel {
            user_id: Set(subscription.user_id),
            service_name: Set(subscription.service_name.clone()),
            price: Set(subscription.price),
            start_date: Set(subscription.start_date.into()),
            end_date: Set(subscription.end_date.map(NaiveDate::from)),
        };

        // 主キーは呼び出し側が指定するので insert の戻り値は使わない
        SubscriptionEntity::insert(new_subscription)
            .exec_without_returning(&self.db)
            .await?;

        Ok(subscription)
    }

    async fn update_subscription(
        &self,
        subscription: Subscription,
    ) -> StorageResult<Option<Subscription>> {
        let start_date: NaiveDate = subscription.start_date.into();
        let end_date: Option<NaiveDate> = subscription.end_date.map(NaiveDate::from);

        let result = SubscriptionEntity::update_many()
            .col_expr(subscription_model::Column::Price, Expr::value(subscription.price))
            .col_expr(subscription_model::Column::StartDate, Expr::value(start_date))
            .col_expr(subscription_model::Column::EndDate, Expr::value(end_date))
            .filter(subscription_model::Column::UserId.eq(subscription.user_id))
            .filter(subscription_model::Column::ServiceName.eq(subscription.service_name.as_str()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None); // 該当なし
        }
        Ok(Some(subscription))
    }

    async fn delete_subscription(&self, user_id: Uuid, service_name: &str) -> StorageResult<()> {
        let result = SubscriptionEntity::delete_many()
            .filter(subscription_model::Column::UserId.eq(user_id))
            .filter(subscription_model::Column::ServiceName.eq(service_name))
            .exec(&self.db)
            .await?;

        debug!(
            user_id = %user_id,
            service_name = %service_name,
            rows_affected = result.rows_affected,
            "Subscription delete executed"
        );
        Ok(())
    }

    async fn list_subscriptions(
        &self,
        user_id: Uuid,
        page: u64,
    ) -> StorageResult<Vec<Subscription>> {
        let models = SubscriptionEntity::find()
            .filter(subscription_model::Column::UserId.eq(user_id))
            .order_by(subscription_model::Column::StartDate, Order::Desc)
            // 同じ開始月はバイト順で並べる（インメモリ実装と同じ順序）
            .order_by(Expr::cust(r#""service_name" COLLATE "C""#), Order::Asc)
            .limit(PAGE_SIZE)
            .offset(page_offset(page))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Subscription::from).collect())
    }

    async fn subscription_total_cost(
        &self,
        filter: &TotalCostFilter,
    ) -> StorageResult<TotalSubscriptionCost> {
        let window_start: NaiveDate = filter.window.start().into();
        let window_end: NaiveDate = filter.window.end().into();

        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                TOTAL_COST_SQL,
                vec![
                    filter.user_id.into(),
                    filter.service_name.clone().into(),
                    window_start.into(),
                    window_end.into(),
                ],
            ))
            .await?
            .ok_or_else(|| {
                StorageError::Database(sea_orm::DbErr::RecordNotFound(
                    "total cost aggregate returned no row".to_string(),
                ))
            })?;

        let total_cost: i64 = row.try_get("", "total_cost")?;
        Ok(TotalSubscriptionCost { total_cost })
    }
}
