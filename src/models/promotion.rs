use crate::entities::promotion_entity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PROMOTION_WEIGHT: f64 = 10.0;
pub const DEFAULT_PROMOTION_COLOR: &str = "#4B5563";
pub const DEFAULT_PROMOTION_ICON: &str = "🎁";

fn default_weight() -> f64 {
    DEFAULT_PROMOTION_WEIGHT
}

fn default_active() -> bool {
    true
}

fn default_color() -> String {
    DEFAULT_PROMOTION_COLOR.to_string()
}

fn default_icon() -> String {
    DEFAULT_PROMOTION_ICON.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PromotionQuery {
    /// 仅返回启用的奖品 (默认 true)
    pub active_only: Option<bool>,
}

/// 新建 / 修改奖品请求（PUT 为整体替换）
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PromotionRequest {
    #[schema(example = "Free Coffee")]
    pub name: String,
    pub description: Option<String>,
    /// 相对概率权重 (>= 0)
    #[serde(default = "default_weight")]
    #[schema(example = 10.0)]
    pub weight: f64,
    /// 中奖后发放的积分
    #[serde(default)]
    pub points: i64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default = "default_color")]
    #[schema(example = "#4B5563")]
    pub color: String,
    #[serde(default = "default_icon")]
    #[schema(example = "🎁")]
    pub icon: String,
}

impl PromotionRequest {
    /// 仅名称与权重，其余取默认值
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            weight,
            points: 0,
            active: true,
            color: default_color(),
            icon: default_icon(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PromotionResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub weight: f64,
    pub points: i64,
    pub active: bool,
    pub color: String,
    pub icon: String,
}

impl From<promotion_entity::Model> for PromotionResponse {
    fn from(m: promotion_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            weight: m.weight,
            points: m.points,
            active: m.active,
            color: m.color,
            icon: m.icon,
        }
    }
}
