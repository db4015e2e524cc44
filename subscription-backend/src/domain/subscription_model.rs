// src/domain/subscription_model.rs
use sea_orm::entity::prelude::*; // Uuid, Date, ActiveModelBehavior などを含む

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub service_name: String,
    pub price: i32,
    // 月初日で保存する
    pub start_date: Date,
    #[sea_orm(nullable)]
    pub end_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
