// Shared helpers for integration tests
#![allow(dead_code)]

use caturro_rewards::config::AdminConfig;
use caturro_rewards::models::{AccountResponse, PromotionRequest, PromotionResponse, RegisterRequest};
use caturro_rewards::services::*;
use caturro_rewards::utils::JwtService;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub const TEST_BCRYPT_COST: u32 = 4;
pub const TEST_COOLDOWN_SECONDS: i64 = 2 * 24 * 60 * 60;
pub const TEST_JWT_SECRET: &str = "test-secret";
pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "barista-secret";

/// Creates an in-memory database with migrations applied.
///
/// A single connection keeps every transaction serialized, which is what
/// a row lock gives us on Postgres.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn account_service(db: &DatabaseConnection) -> AccountService {
    AccountService::new(db.clone(), TEST_BCRYPT_COST)
}

pub fn draw_service(db: &DatabaseConnection) -> DrawService {
    DrawService::new(db.clone(), TEST_COOLDOWN_SECONDS)
}

pub fn jwt_service() -> JwtService {
    JwtService::new(TEST_JWT_SECRET, 3600)
}

pub fn admin_config() -> AdminConfig {
    AdminConfig {
        username: TEST_ADMIN_USERNAME.to_string(),
        password: TEST_ADMIN_PASSWORD.to_string(),
    }
}

pub fn admin_service(db: &DatabaseConnection) -> AdminService {
    AdminService::new(db.clone(), jwt_service(), admin_config())
}

pub fn register_request(national_id: &str) -> RegisterRequest {
    RegisterRequest {
        national_id: national_id.to_string(),
        password: "secret123".to_string(),
        full_name: format!("Customer {national_id}"),
        semester: "2025-2".to_string(),
    }
}

/// Registers a customer with a default password of `secret123`
pub async fn create_account(db: &DatabaseConnection, national_id: &str) -> AccountResponse {
    account_service(db)
        .register(register_request(national_id))
        .await
        .expect("Failed to register account")
}

pub async fn create_promotion(
    db: &DatabaseConnection,
    name: &str,
    weight: f64,
    points: i64,
) -> PromotionResponse {
    let mut request = PromotionRequest::new(name, weight);
    request.points = points;
    PromotionService::new(db.clone())
        .create(request)
        .await
        .expect("Failed to create promotion")
}
