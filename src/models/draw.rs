use crate::entities::spin_record_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AccountSummary, PromotionResponse};

/// 个人抽奖记录默认条数
pub const DEFAULT_ACCOUNT_DRAWS_LIMIT: u64 = 20;
/// 全局抽奖日志每页条数
pub const DRAW_LOG_PAGE_SIZE: u64 = 10;

/// 抽奖请求；timestamp 为客户端时间，仅作展示参考
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct DrawRequest {
    pub timestamp: Option<DateTime<Utc>>,
}

/// 抽奖结果
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrawResponse {
    pub promotion: PromotionResponse,
    pub message: String,
    pub points_awarded: i64,
    /// 下一次可以抽奖的时间
    pub next_draw_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AccountDrawsQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawLogQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// 抽奖记录（附带账户与奖品信息）
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpinRecordResponse {
    pub id: i64,
    pub account: AccountSummary,
    pub promotion: PromotionResponse,
    pub points_awarded: i64,
    pub occurred_at: DateTime<Utc>,
    pub client_timestamp: Option<DateTime<Utc>>,
}

impl SpinRecordResponse {
    pub fn new(
        record: spin_record_entity::Model,
        account: AccountSummary,
        promotion: PromotionResponse,
    ) -> Self {
        Self {
            id: record.id,
            account,
            promotion,
            points_awarded: record.points_awarded,
            occurred_at: record.occurred_at,
            client_timestamp: record.client_timestamp,
        }
    }
}

/// 全局抽奖日志分页
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrawLogPage {
    pub items: Vec<SpinRecordResponse>,
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
}
