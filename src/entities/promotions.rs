use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 转盘奖品实体
/// 概念说明:
/// - weight: 相对概率权重 (>= 0)，抽奖时按启用奖品的权重和归一化
/// - points: 中奖后发放的积分，0 表示无积分奖励
/// - active: 仅启用的奖品参与抽奖；下线优先于删除，保留历史记录引用
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "promotions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub weight: f64,
    pub points: i64,
    pub active: bool,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
