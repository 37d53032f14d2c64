use crate::entities::{account_entity as accounts, spin_record_entity as records};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{LedgerService, PromotionService};
use crate::utils::weighted::pick_random;
use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    cooldown: Duration,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection, cooldown_seconds: i64) -> Self {
        Self {
            pool,
            cooldown: Duration::seconds(cooldown_seconds.max(0)),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// 抽奖 (Spin)，时间以服务端为准
    pub async fn draw(
        &self,
        account_id: i64,
        client_timestamp: Option<DateTime<Utc>>,
    ) -> AppResult<DrawResponse> {
        self.draw_at(account_id, client_timestamp, Utc::now()).await
    }

    /// 以给定的服务端时间 `now` 抽奖
    ///
    /// 逻辑（同一事务内，失败整体回滚）:
    /// 1. 条件更新 accounts.last_draw_at 占用本次抽奖资格（见 `claim_slot`）
    /// 2. 读取启用奖品，按权重随机抽取
    /// 3. 写抽奖记录
    /// 4. 奖品带积分则写积分流水
    /// 5. 提交并返回奖品与提示语
    pub async fn draw_at(
        &self,
        account_id: i64,
        client_timestamp: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> AppResult<DrawResponse> {
        let txn = self.pool.begin().await?;

        let account = accounts::Entity::find_by_id(account_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {account_id} not found")))?;

        self.claim_slot(&txn, &account, now).await?;

        let active = PromotionService::active_in(&txn).await?;
        let selected = {
            let mut rng = rand::rng();
            pick_random(&active, &mut rng)?.clone()
        };

        let record = records::ActiveModel {
            account_id: Set(account_id),
            promotion_id: Set(selected.id),
            points_awarded: Set(selected.points),
            client_timestamp: Set(client_timestamp),
            occurred_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if selected.points > 0 {
            LedgerService::credit_in(
                &txn,
                account_id,
                selected.points,
                &format!("Prize wheel: {}", selected.name),
            )
            .await?;
        }

        txn.commit().await?;

        log::info!(
            "Account {account_id} drew promotion {} ('{}'), record {}",
            selected.id,
            selected.name,
            record.id
        );

        let message = format!(
            "Congratulations {}! You won: {}",
            account.full_name, selected.name
        );
        Ok(DrawResponse {
            points_awarded: selected.points,
            promotion: selected.into(),
            message,
            next_draw_at: now + self.cooldown,
        })
    }

    /// 占用账户在 `now` 的抽奖资格。
    ///
    /// 冷却判定与占位是同一条条件更新，不依赖调用方读到的 `account` 快照；
    /// 并发请求中只有一个能更新成功，其余在该行锁释放后更新 0 行。
    pub async fn claim_slot<C: ConnectionTrait>(
        &self,
        conn: &C,
        account: &accounts::Model,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let threshold = now - self.cooldown;
        let claimed = accounts::Entity::update_many()
            .col_expr(accounts::Column::LastDrawAt, Expr::value(now))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(now))
            .filter(accounts::Column::Id.eq(account.id))
            .filter(
                Condition::any()
                    .add(accounts::Column::LastDrawAt.is_null())
                    .add(accounts::Column::LastDrawAt.lte(threshold)),
            )
            .exec(conn)
            .await?;

        if claimed.rows_affected == 0 {
            let last_draw_at = accounts::Entity::find_by_id(account.id)
                .one(conn)
                .await?
                .and_then(|a| a.last_draw_at)
                .unwrap_or(now);
            let next_draw_at = last_draw_at + self.cooldown;
            log::warn!(
                "Draw rejected for account {}: cooldown until {next_draw_at}",
                account.id
            );
            return Err(AppError::CooldownActive { next_draw_at });
        }
        Ok(())
    }
}
