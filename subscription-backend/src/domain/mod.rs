// src/domain/mod.rs
pub mod subscription;
pub mod subscription_model;
pub mod year_month;
