use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 顾客账户实体
/// - national_id: 登录凭据（唯一）
/// - points_balance: 积分流水之和的缓存，仅在同一事务内与流水一起变更
/// - last_draw_at: 最近一次成功抽奖时间（服务端冷却判定）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub national_id: String,
    pub password_hash: String,
    pub full_name: String,
    pub semester: String,
    pub points_balance: i64,
    pub last_draw_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
