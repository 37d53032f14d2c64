use crate::entities::account_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "1723456789")]
    pub national_id: String,
    #[schema(example = "secreto")]
    pub password: String,
    #[schema(example = "Ana Torres")]
    pub full_name: String,
    #[schema(example = "5")]
    pub semester: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "1723456789")]
    pub national_id: String,
    #[schema(example = "secreto")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: i64,
    pub national_id: String,
    pub full_name: String,
    pub semester: String,
    /// 当前积分余额
    pub points: i64,
    pub last_draw_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<account_entity::Model> for AccountResponse {
    fn from(m: account_entity::Model) -> Self {
        Self {
            id: m.id,
            national_id: m.national_id,
            full_name: m.full_name,
            semester: m.semester,
            points: m.points_balance,
            last_draw_at: m.last_draw_at,
            created_at: m.created_at,
        }
    }
}

/// 抽奖记录中展示的账户摘要
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountSummary {
    pub id: i64,
    pub national_id: String,
    pub full_name: String,
    pub semester: String,
}

impl From<account_entity::Model> for AccountSummary {
    fn from(m: account_entity::Model) -> Self {
        Self {
            id: m.id,
            national_id: m.national_id,
            full_name: m.full_name,
            semester: m.semester,
        }
    }
}
