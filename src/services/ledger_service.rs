use crate::entities::{account_entity as accounts, ledger_entry_entity as entries};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 积分变动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Credit,
    Debit,
}

#[derive(Clone)]
pub struct LedgerService {
    pool: DatabaseConnection,
}

impl LedgerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 当前余额 = 该账户全部流水 delta 之和（无流水为 0）
    pub async fn balance(&self, account_id: i64) -> AppResult<i64> {
        Self::ensure_account(&self.pool, account_id).await?;
        Self::ledger_sum(&self.pool, account_id).await
    }

    /// 增加积分
    pub async fn credit(
        &self,
        account_id: i64,
        amount: i64,
        description: &str,
    ) -> AppResult<entries::Model> {
        let txn = self.pool.begin().await?;
        let entry = Self::credit_in(&txn, account_id, amount, description).await?;
        txn.commit().await?;
        Ok(entry)
    }

    /// 扣减积分；余额不足时拒绝（不截断）
    pub async fn debit(
        &self,
        account_id: i64,
        amount: i64,
        description: &str,
    ) -> AppResult<entries::Model> {
        let txn = self.pool.begin().await?;
        let entry = Self::debit_in(&txn, account_id, amount, description).await?;
        txn.commit().await?;
        Ok(entry)
    }

    /// 积分明细（最新在前）
    pub async fn history(
        &self,
        account_id: i64,
        window: PageWindow,
    ) -> AppResult<Vec<entries::Model>> {
        Self::ensure_account(&self.pool, account_id).await?;
        Ok(entries::Entity::find()
            .filter(entries::Column::AccountId.eq(account_id))
            .order_by_desc(entries::Column::Id)
            .limit(window.limit)
            .offset(window.offset)
            .all(&self.pool)
            .await?)
    }

    /// 余额与明细
    pub async fn points_overview(
        &self,
        account_id: i64,
        query: &PointsHistoryQuery,
    ) -> AppResult<PointsResponse> {
        let account = Self::ensure_account(&self.pool, account_id).await?;
        let window = PageWindow::new(query.offset, query.limit, DEFAULT_HISTORY_LIMIT);
        let balance = Self::ledger_sum(&self.pool, account_id).await?;
        let history = self.history(account_id, window).await?;

        Ok(PointsResponse {
            account_id: account.id,
            national_id: account.national_id,
            balance,
            history: history.into_iter().map(Into::into).collect(),
        })
    }

    /// 后台按证件号增加 / 扣减积分
    pub async fn adjust(
        &self,
        movement: Movement,
        request: &PointsAdjustRequest,
    ) -> AppResult<PointsAdjustResponse> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::NationalId.eq(request.account_ref.trim()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Account '{}' not found", request.account_ref))
            })?;

        let description = request.description.as_deref().unwrap_or("");
        let entry = match movement {
            Movement::Credit => self.credit(account.id, request.amount, description).await?,
            Movement::Debit => self.debit(account.id, request.amount, description).await?,
        };

        Ok(PointsAdjustResponse {
            account_id: account.id,
            balance: entry.balance_after,
            entry: entry.into(),
        })
    }

    // -----------------------------
    // 事务内辅助方法（抽奖发放积分复用）
    // -----------------------------

    /// 在调用方的事务内增加积分。更新账户行会锁住该行，
    /// 同一账户的积分变动因此串行执行。
    pub(crate) async fn credit_in<C: ConnectionTrait>(
        conn: &C,
        account_id: i64,
        amount: i64,
        description: &str,
    ) -> AppResult<entries::Model> {
        Self::validate_amount(amount)?;
        let description = Self::normalize_description(description)?;
        let now = Utc::now();

        // 余额上限校验与增加是同一条条件更新
        let updated = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::PointsBalance,
                Expr::col(accounts::Column::PointsBalance).add(amount),
            )
            .col_expr(accounts::Column::UpdatedAt, Expr::value(now))
            .filter(accounts::Column::Id.eq(account_id))
            .filter(accounts::Column::PointsBalance.lte(i64::MAX - amount))
            .exec(conn)
            .await?;
        if updated.rows_affected == 0 {
            let balance = Self::ensure_account(conn, account_id).await?.points_balance;
            log::warn!(
                "Rejected credit of {amount} points for account {account_id}: balance {balance} would overflow"
            );
            return Err(AppError::ValidationError(format!(
                "Crediting {amount} points would exceed the maximum balance"
            )));
        }

        let balance_after = Self::ensure_account(conn, account_id).await?.points_balance;
        let entry = Self::append(conn, account_id, amount, balance_after, description).await?;
        log::info!("Credited {amount} points to account {account_id}, balance {balance_after}");
        Ok(entry)
    }

    /// 在调用方的事务内扣减积分；余额校验与扣减是同一条条件更新
    pub(crate) async fn debit_in<C: ConnectionTrait>(
        conn: &C,
        account_id: i64,
        amount: i64,
        description: &str,
    ) -> AppResult<entries::Model> {
        Self::validate_amount(amount)?;
        let description = Self::normalize_description(description)?;
        Self::ensure_account(conn, account_id).await?;
        let now = Utc::now();

        let updated = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::PointsBalance,
                Expr::col(accounts::Column::PointsBalance).sub(amount),
            )
            .col_expr(accounts::Column::UpdatedAt, Expr::value(now))
            .filter(accounts::Column::Id.eq(account_id))
            .filter(accounts::Column::PointsBalance.gte(amount))
            .exec(conn)
            .await?;

        if updated.rows_affected == 0 {
            let balance = Self::ensure_account(conn, account_id).await?.points_balance;
            log::warn!(
                "Rejected debit of {amount} points for account {account_id}: balance {balance}"
            );
            return Err(AppError::InsufficientBalance {
                balance,
                requested: amount,
            });
        }

        let balance_after = Self::ensure_account(conn, account_id).await?.points_balance;
        let entry = Self::append(conn, account_id, -amount, balance_after, description).await?;
        log::info!("Debited {amount} points from account {account_id}, balance {balance_after}");
        Ok(entry)
    }

    async fn append<C: ConnectionTrait>(
        conn: &C,
        account_id: i64,
        delta: i64,
        balance_after: i64,
        description: String,
    ) -> AppResult<entries::Model> {
        Ok(entries::ActiveModel {
            account_id: Set(account_id),
            delta: Set(delta),
            balance_after: Set(balance_after),
            description: Set(description),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(conn)
        .await?)
    }

    async fn ensure_account<C: ConnectionTrait>(
        conn: &C,
        account_id: i64,
    ) -> AppResult<accounts::Model> {
        accounts::Entity::find_by_id(account_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {account_id} not found")))
    }

    async fn ledger_sum<C: ConnectionTrait>(conn: &C, account_id: i64) -> AppResult<i64> {
        // Postgres 的 SUM(bigint) 返回 numeric，转回 BIGINT
        let sum = SimpleExpr::from(Func::coalesce([
            Expr::col(entries::Column::Delta).sum(),
            Expr::val(0i64).into(),
        ]))
        .cast_as(Alias::new("BIGINT"));

        let total: Option<i64> = entries::Entity::find()
            .select_only()
            .column_as(sum, "total")
            .filter(entries::Column::AccountId.eq(account_id))
            .into_tuple()
            .one(conn)
            .await?;
        Ok(total.unwrap_or(0))
    }

    fn validate_amount(amount: i64) -> AppResult<()> {
        if amount <= 0 {
            return Err(AppError::ValidationError(
                "Amount must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    fn normalize_description(description: &str) -> AppResult<String> {
        let description = description.trim();
        if description.chars().count() > 255 {
            return Err(AppError::ValidationError(
                "Description must be at most 255 characters".to_string(),
            ));
        }
        Ok(description.to_string())
    }
}
