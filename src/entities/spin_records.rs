use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 抽奖记录实体
/// 说明:
/// - 每次成功抽奖产生一条记录，只引用账户与奖品，不拥有它们
/// - occurred_at 由服务端写入；client_timestamp 仅作为客户端展示参考
/// - points_awarded 记录本次发放的积分 (历史快照，奖品后续修改不影响)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "spin_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    pub promotion_id: i64,
    pub points_awarded: i64,
    pub client_timestamp: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
