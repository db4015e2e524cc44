// src/domain/subscription.rs
use crate::domain::subscription_model;
use crate::domain::year_month::YearMonth;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ユーザー1人・サービス1つ分の課金レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename = "id")]
    pub user_id: Uuid,
    pub service_name: String,
    /// 月額（最小通貨単位）
    pub price: i32,
    pub start_date: YearMonth,
    /// None は継続中を表す
    pub end_date: Option<YearMonth>,
}

impl Subscription {
    /// start_date <= end_date を満たすか
    pub fn has_valid_period(&self) -> bool {
        self.end_date.is_none_or(|end| self.start_date <= end)
    }
}

impl From<subscription_model::Model> for Subscription {
    fn from(model: subscription_model::Model) -> Self {
        Self {
            user_id: model.user_id,
            service_name: model.service_name,
            price: model.price,
            start_date: YearMonth::from(model.start_date),
            end_date: model.end_date.map(YearMonth::from),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalSubscriptionCost {
    pub total_cost: i64,
}

/// 集計対象の期間（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingWindow {
    start: YearMonth,
    end: YearMonth,
}

impl BillingWindow {
    /// start > end の場合は None
    pub fn new(start: YearMonth, end: YearMonth) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> YearMonth {
        self.start
    }

    pub fn end(&self) -> YearMonth {
        self.end
    }
}

/// 合計金額クエリの条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalCostFilter {
    pub user_id: Uuid,
    pub service_name: Option<String>,
    pub window: BillingWindow,
}

impl TotalCostFilter {
    pub fn matches(&self, subscription: &Subscription) -> bool {
        subscription.user_id == self.user_id
            && self
                .service_name
                .as_deref()
                .is_none_or(|name| name == subscription.service_name)
    }
}

/// 契約期間と集計期間が重なる月数（両端を含む）
///
/// 終了月がない契約は集計期間の終了月まで有効とみなす。重ならない場合は 0。
pub fn billable_months(
    start_date: YearMonth,
    end_date: Option<YearMonth>,
    window: &BillingWindow,
) -> i64 {
    let from = start_date.max(window.start());
    let to = end_date.map_or(window.end(), |end| end.min(window.end()));

    if from > to {
        return 0;
    }
    from.months_until(&to) + 1
}

/// 条件に一致する契約の月額 × 重複月数の合計
pub fn total_cost<'a, I>(subscriptions: I, filter: &TotalCostFilter) -> TotalSubscriptionCost
where
    I: IntoIterator<Item = &'a Subscription>,
{
    let total_cost = subscriptions
        .into_iter()
        .filter(|s| filter.matches(s))
        .map(|s| i64::from(s.price) * billable_months(s.start_date, s.end_date, &filter.window))
        .sum();

    TotalSubscriptionCost { total_cost }
}
