use crate::entities::{promotion_entity as promotions, spin_record_entity as records};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::weighted::total_weight;
use crate::utils::{normalize_hex_color, validate_hex_color};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct PromotionService {
    pool: DatabaseConnection,
}

impl PromotionService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 奖品列表，按创建顺序（即转盘扇区顺序）
    pub async fn list(&self, active_only: bool) -> AppResult<Vec<PromotionResponse>> {
        let list = if active_only {
            Self::active_in(&self.pool).await?
        } else {
            promotions::Entity::find()
                .order_by_asc(promotions::Column::Id)
                .all(&self.pool)
                .await?
        };
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn list_active(&self) -> AppResult<Vec<PromotionResponse>> {
        self.list(true).await
    }

    pub async fn get(&self, promotion_id: i64) -> AppResult<PromotionResponse> {
        Ok(Self::find_in(&self.pool, promotion_id).await?.into())
    }

    pub async fn create(&self, request: PromotionRequest) -> AppResult<PromotionResponse> {
        let request = Self::validate(request)?;

        let txn = self.pool.begin().await?;
        Self::ensure_positive_active_total(&txn, None, &request).await?;

        let now = Utc::now();
        let created = promotions::ActiveModel {
            name: Set(request.name),
            description: Set(request.description),
            weight: Set(request.weight),
            points: Set(request.points),
            active: Set(request.active),
            color: Set(request.color),
            icon: Set(request.icon),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        log::info!("Promotion {} '{}' created", created.id, created.name);
        Ok(created.into())
    }

    /// 整体更新奖品，id 保持不变，已有抽奖记录继续有效
    pub async fn update(
        &self,
        promotion_id: i64,
        request: PromotionRequest,
    ) -> AppResult<PromotionResponse> {
        let request = Self::validate(request)?;

        let txn = self.pool.begin().await?;
        let existing = Self::find_in(&txn, promotion_id).await?;
        if existing.active != request.active || existing.weight != request.weight {
            Self::ensure_positive_active_total(&txn, Some(promotion_id), &request).await?;
        }

        let mut am = existing.into_active_model();
        am.name = Set(request.name);
        am.description = Set(request.description);
        am.weight = Set(request.weight);
        am.points = Set(request.points);
        am.active = Set(request.active);
        am.color = Set(request.color);
        am.icon = Set(request.icon);
        am.updated_at = Set(Utc::now());
        let updated = am.update(&txn).await?;
        txn.commit().await?;

        log::info!("Promotion {} updated", updated.id);
        Ok(updated.into())
    }

    /// 下线奖品：不再参与抽奖，历史记录仍可关联
    pub async fn deactivate(&self, promotion_id: i64) -> AppResult<PromotionResponse> {
        let existing = Self::find_in(&self.pool, promotion_id).await?;
        if !existing.active {
            return Ok(existing.into());
        }

        let mut am = existing.into_active_model();
        am.active = Set(false);
        am.updated_at = Set(Utc::now());
        let updated = am.update(&self.pool).await?;

        log::info!("Promotion {} deactivated", updated.id);
        Ok(updated.into())
    }

    /// 删除奖品；已被抽奖记录引用的奖品只能下线
    pub async fn delete(&self, promotion_id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;
        let existing = Self::find_in(&txn, promotion_id).await?;

        let references = records::Entity::find()
            .filter(records::Column::PromotionId.eq(promotion_id))
            .count(&txn)
            .await?;
        if references > 0 {
            return Err(AppError::Conflict(format!(
                "Promotion {promotion_id} is referenced by {references} spin records; deactivate it instead"
            )));
        }

        promotions::Entity::delete_by_id(existing.id)
            .exec(&txn)
            .await?;
        txn.commit().await?;

        log::info!("Promotion {promotion_id} deleted");
        Ok(())
    }

    // -----------------------------
    // 内部辅助方法
    // -----------------------------

    /// 启用的奖品，按 id 升序；抽奖与前端转盘使用同一顺序
    pub(crate) async fn active_in<C: ConnectionTrait>(
        conn: &C,
    ) -> AppResult<Vec<promotions::Model>> {
        Ok(promotions::Entity::find()
            .filter(promotions::Column::Active.eq(true))
            .order_by_asc(promotions::Column::Id)
            .all(conn)
            .await?)
    }

    async fn find_in<C: ConnectionTrait>(
        conn: &C,
        promotion_id: i64,
    ) -> AppResult<promotions::Model> {
        promotions::Entity::find_by_id(promotion_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Promotion {promotion_id} not found")))
    }

    fn validate(mut request: PromotionRequest) -> AppResult<PromotionRequest> {
        request.name = request.name.trim().to_string();
        if request.name.is_empty() || request.name.chars().count() > 255 {
            return Err(AppError::ValidationError(
                "Promotion name must be between 1 and 255 characters".to_string(),
            ));
        }
        if !request.weight.is_finite() || request.weight < 0.0 {
            return Err(AppError::ValidationError(format!(
                "Weight must be a finite number >= 0 (got {})",
                request.weight
            )));
        }
        if request.points < 0 {
            return Err(AppError::ValidationError(
                "Points must be >= 0".to_string(),
            ));
        }
        request.color = normalize_hex_color(&request.color);
        validate_hex_color(&request.color)?;

        request.icon = request.icon.trim().to_string();
        if request.icon.is_empty() || request.icon.chars().count() > 16 {
            return Err(AppError::ValidationError(
                "Icon must be between 1 and 16 characters".to_string(),
            ));
        }
        request.description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(request)
    }

    /// 变更后启用奖品的权重和必须 > 0
    async fn ensure_positive_active_total<C: ConnectionTrait>(
        conn: &C,
        exclude_id: Option<i64>,
        request: &PromotionRequest,
    ) -> AppResult<()> {
        let mut others = Self::active_in(conn).await?;
        if let Some(id) = exclude_id {
            others.retain(|p| p.id != id);
        }

        let mut total = total_weight(&others);
        if request.active {
            total += request.weight;
        }
        if total <= 0.0 {
            return Err(AppError::ValidationError(
                "The sum of active promotion weights must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
