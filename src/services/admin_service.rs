use crate::config::AdminConfig;
use crate::entities::{
    account_entity as accounts, promotion_entity as promotions, spin_record_entity as records,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{JwtService, constant_time_eq, verify_configured_secret};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::collections::HashMap;

const TOP_PROMOTIONS: u64 = 5;

#[derive(Clone)]
pub struct AdminService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
    admin: AdminConfig,
}

impl AdminService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService, admin: AdminConfig) -> Self {
        Self {
            pool,
            jwt_service,
            admin,
        }
    }

    /// 管理员登录，签发后台令牌；用户名不区分大小写
    pub async fn login(&self, request: AdminLoginRequest) -> AppResult<AdminLoginResponse> {
        let username_ok = constant_time_eq(
            request.username.trim().to_lowercase().as_bytes(),
            self.admin.username.trim().to_lowercase().as_bytes(),
        );
        let password_ok = verify_configured_secret(&request.password, &self.admin.password);

        if !(username_ok && password_ok) {
            log::warn!("Failed admin login for '{}'", request.username.trim());
            return Err(AppError::AuthError("Invalid credentials".to_string()));
        }

        let token = self.jwt_service.generate_admin_token(self.admin.username.trim())?;
        log::info!("Admin '{}' signed in", self.admin.username.trim());

        Ok(AdminLoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_admin_token_expires_in(),
        })
    }

    /// 统计：顾客数、抽奖次数、中奖次数最多的奖品
    pub async fn stats(&self) -> AppResult<StatsResponse> {
        let total_accounts = accounts::Entity::find().count(&self.pool).await?;
        let total_draws = records::Entity::find().count(&self.pool).await?;

        let top: Vec<(i64, i64)> = records::Entity::find()
            .select_only()
            .column(records::Column::PromotionId)
            .column_as(Expr::col(records::Column::Id).count(), "total")
            .group_by(records::Column::PromotionId)
            .order_by(Expr::col(records::Column::Id).count(), Order::Desc)
            .order_by(records::Column::PromotionId, Order::Asc)
            .limit(TOP_PROMOTIONS)
            .into_tuple()
            .all(&self.pool)
            .await?;

        let ids: Vec<i64> = top.iter().map(|(id, _)| *id).collect();
        let names: HashMap<i64, String> = promotions::Entity::find()
            .filter(promotions::Column::Id.is_in(ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let top_promotions = top
            .into_iter()
            .map(|(promotion_id, total)| PromotionStat {
                promotion_id,
                name: names.get(&promotion_id).cloned().unwrap_or_default(),
                total,
            })
            .collect();

        Ok(StatsResponse {
            total_accounts,
            total_draws,
            top_promotions,
        })
    }
}
