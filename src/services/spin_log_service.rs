use crate::entities::{
    account_entity as accounts, promotion_entity as promotions, spin_record_entity as records,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct SpinLogService {
    pool: DatabaseConnection,
}

impl SpinLogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 个人抽奖记录（最新在前）
    pub async fn records_for(
        &self,
        account_id: i64,
        limit: Option<u64>,
    ) -> AppResult<Vec<SpinRecordResponse>> {
        if accounts::Entity::find_by_id(account_id)
            .one(&self.pool)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!("Account {account_id} not found")));
        }

        let window = PageWindow::first(limit, DEFAULT_ACCOUNT_DRAWS_LIMIT);
        let list = records::Entity::find()
            .filter(records::Column::AccountId.eq(account_id))
            .order_by_desc(records::Column::OccurredAt)
            .order_by_desc(records::Column::Id)
            .limit(window.limit)
            .all(&self.pool)
            .await?;

        self.hydrate(list).await
    }

    /// 全部抽奖记录分页（后台）
    pub async fn all_records(
        &self,
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> AppResult<DrawLogPage> {
        let window = PageWindow::new(offset, limit, DRAW_LOG_PAGE_SIZE);
        let total = records::Entity::find().count(&self.pool).await?;

        let list = records::Entity::find()
            .order_by_desc(records::Column::OccurredAt)
            .order_by_desc(records::Column::Id)
            .limit(window.limit)
            .offset(window.offset)
            .all(&self.pool)
            .await?;

        Ok(DrawLogPage {
            items: self.hydrate(list).await?,
            offset: window.offset,
            limit: window.limit,
            total,
        })
    }

    /// 批量加载记录关联的账户与奖品（包括已下线的奖品）
    async fn hydrate(&self, list: Vec<records::Model>) -> AppResult<Vec<SpinRecordResponse>> {
        if list.is_empty() {
            return Ok(Vec::new());
        }

        let mut account_ids: Vec<i64> = list.iter().map(|r| r.account_id).collect();
        account_ids.sort_unstable();
        account_ids.dedup();
        let mut promotion_ids: Vec<i64> = list.iter().map(|r| r.promotion_id).collect();
        promotion_ids.sort_unstable();
        promotion_ids.dedup();

        let account_map: HashMap<i64, accounts::Model> = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(account_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        let promotion_map: HashMap<i64, promotions::Model> = promotions::Entity::find()
            .filter(promotions::Column::Id.is_in(promotion_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut items = Vec::with_capacity(list.len());
        for record in list {
            let (Some(account), Some(promotion)) = (
                account_map.get(&record.account_id),
                promotion_map.get(&record.promotion_id),
            ) else {
                log::warn!("Spin record {} references missing rows, skipped", record.id);
                continue;
            };
            items.push(SpinRecordResponse::new(
                record,
                account.clone().into(),
                promotion.clone().into(),
            ));
        }
        Ok(items)
    }
}
