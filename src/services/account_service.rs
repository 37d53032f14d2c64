use crate::entities::account_entity as accounts;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{hash_password, validate_password, verify_password};
use chrono::Utc;
use std::sync::{Arc, OnceLock};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

// 未知证件号登录时用于校验的占位口令
const DUMMY_PASSWORD: &str = "caturro-dummy-password";

#[derive(Clone)]
pub struct AccountService {
    pool: DatabaseConnection,
    bcrypt_cost: u32,
    dummy_hash: Arc<OnceLock<String>>,
}

impl AccountService {
    pub fn new(pool: DatabaseConnection, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            bcrypt_cost,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// 注册顾客账户；证件号重复返回 Conflict，只保存密码哈希
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AccountResponse> {
        let national_id = request.national_id.trim().to_string();
        let full_name = request.full_name.trim().to_string();
        let semester = request.semester.trim().to_string();

        if national_id.is_empty() || national_id.chars().count() > 32 {
            return Err(AppError::ValidationError(
                "National ID must be between 1 and 32 characters".to_string(),
            ));
        }
        if full_name.is_empty() || full_name.chars().count() > 255 {
            return Err(AppError::ValidationError(
                "Full name must be between 1 and 255 characters".to_string(),
            ));
        }
        if semester.is_empty() || semester.chars().count() > 50 {
            return Err(AppError::ValidationError(
                "Semester must be between 1 and 50 characters".to_string(),
            ));
        }
        validate_password(&request.password)?;

        if self.find_by_national_id(&national_id).await?.is_some() {
            return Err(AppError::Conflict(
                "National ID already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost)?;
        let now = Utc::now();

        let inserted = accounts::ActiveModel {
            national_id: Set(national_id),
            password_hash: Set(password_hash),
            full_name: Set(full_name),
            semester: Set(semester),
            points_balance: Set(0),
            last_draw_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        // 并发注册时由唯一索引兜底
        let account = match inserted {
            Ok(m) => m,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(AppError::Conflict(
                    "National ID already registered".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        log::info!("Account {} registered", account.id);
        Ok(account.into())
    }

    /// 证件号 + 密码登录
    pub async fn login(&self, request: LoginRequest) -> AppResult<AccountResponse> {
        let Some(account) = self.find_by_national_id(request.national_id.trim()).await? else {
            // 与证件号存在时一样执行一次 bcrypt 校验，响应时间不暴露证件号是否注册
            verify_password(&request.password, self.dummy_hash()?)?;
            return Err(AppError::AuthError("Invalid credentials".to_string()));
        };

        if !verify_password(&request.password, &account.password_hash)? {
            log::warn!("Failed login for account {}", account.id);
            return Err(AppError::AuthError("Invalid credentials".to_string()));
        }

        Ok(account.into())
    }

    pub async fn get_account(&self, account_id: i64) -> AppResult<AccountResponse> {
        Ok(self.get_model(account_id).await?.into())
    }

    pub async fn get_model(&self, account_id: i64) -> AppResult<accounts::Model> {
        accounts::Entity::find_by_id(account_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {account_id} not found")))
    }

    pub async fn find_by_national_id(&self, national_id: &str) -> AppResult<Option<accounts::Model>> {
        Ok(accounts::Entity::find()
            .filter(accounts::Column::NationalId.eq(national_id))
            .one(&self.pool)
            .await?)
    }

    fn dummy_hash(&self) -> AppResult<&str> {
        if let Some(hash) = self.dummy_hash.get() {
            return Ok(hash);
        }
        let hash = hash_password(DUMMY_PASSWORD, self.bcrypt_cost)?;
        Ok(self.dummy_hash.get_or_init(|| hash))
    }

    /// 全部顾客（最新注册在前），供后台使用
    pub async fn list_accounts(&self) -> AppResult<Vec<AccountResponse>> {
        let list = accounts::Entity::find()
            .order_by_desc(accounts::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    #[tokio::test]
    async fn test_unknown_login_still_checks_a_hash() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let service = AccountService::new(db, 4);
        assert!(service.dummy_hash.get().is_none());

        let result = service
            .login(LoginRequest {
                national_id: "nobody".to_string(),
                password: "secret123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::AuthError(_))));
        let dummy = service.dummy_hash.get().unwrap();
        assert!(verify_password(DUMMY_PASSWORD, dummy).unwrap());
    }

    #[tokio::test]
    async fn test_length_limits_count_characters() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let service = AccountService::new(db, 4);

        // 32 个双字节字符超过 32 字节但不超过 32 个字符
        let created = service
            .register(RegisterRequest {
                national_id: "ñ".repeat(32),
                password: "contraseña".to_string(),
                full_name: "é".repeat(255),
                semester: "2025-2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.national_id.chars().count(), 32);

        let too_long = service
            .register(RegisterRequest {
                national_id: "ñ".repeat(33),
                password: "contraseña".to_string(),
                full_name: "Ana".to_string(),
                semester: "2025-2".to_string(),
            })
            .await;
        assert!(matches!(too_long, Err(AppError::ValidationError(_))));
    }
}
