use crate::models::*;
use crate::services::AccountService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/accounts",
    tag = "account",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account registered", body = AccountResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "National ID already registered")
    )
)]
pub async fn register(
    service: web::Data<AccountService>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    match service.register(request.into_inner()).await {
        Ok(account) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": account }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/sessions",
    tag = "account",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AccountResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    service: web::Data<AccountService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    match service.login(request.into_inner()).await {
        Ok(account) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": account }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/accounts",
    tag = "account",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All accounts, newest first", body = [AccountResponse]),
        (status = 401, description = "Missing or invalid admin token")
    )
)]
/// 后台顾客列表
pub async fn list_accounts(service: web::Data<AccountService>) -> Result<HttpResponse> {
    match service.list_accounts().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn account_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/accounts")
            .route(web::post().to(register))
            .route(web::get().to(list_accounts)),
    )
    .route("/sessions", web::post().to(login));
}
