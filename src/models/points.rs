use crate::entities::ledger_entry_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 积分明细默认条数
pub const DEFAULT_HISTORY_LIMIT: u64 = 50;

/// 管理员增加 / 扣减积分
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PointsAdjustRequest {
    /// 顾客证件号
    #[schema(example = "1723456789")]
    pub account_ref: String,
    #[schema(example = 100)]
    pub amount: i64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PointsHistoryQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LedgerEntryResponse {
    pub id: i64,
    /// 正数为获得，负数为兑换
    pub delta: i64,
    pub balance_after: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<ledger_entry_entity::Model> for LedgerEntryResponse {
    fn from(m: ledger_entry_entity::Model) -> Self {
        Self {
            id: m.id,
            delta: m.delta,
            balance_after: m.balance_after,
            description: m.description,
            created_at: m.created_at,
        }
    }
}

/// 账户积分与明细
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointsResponse {
    pub account_id: i64,
    pub national_id: String,
    pub balance: i64,
    pub history: Vec<LedgerEntryResponse>,
}

/// 增加 / 扣减后的结果
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointsAdjustResponse {
    pub account_id: i64,
    pub balance: i64,
    pub entry: LedgerEntryResponse,
}
