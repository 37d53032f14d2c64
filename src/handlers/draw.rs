use crate::error::AppError;
use crate::models::*;
use crate::services::{DrawService, SpinLogService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/draws/{account_id}",
    tag = "draw",
    params(("account_id" = i64, Path, description = "Account ID")),
    request_body = DrawRequest,
    responses(
        (status = 200, description = "Prize drawn", body = DrawResponse),
        (status = 400, description = "Malformed request body"),
        (status = 404, description = "Unknown account or no active promotions"),
        (status = 409, description = "Active weights sum to zero"),
        (status = 429, description = "Cooldown active")
    )
)]
/// 转盘抽奖:
/// 1. 服务端按账户校验冷却期
/// 2. 按权重随机选择启用的奖品
/// 3. 写抽奖记录，奖品带积分则发放
pub async fn draw(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    // 请求体可省略；提供了但无法解析时拒绝
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        DrawRequest::default()
    } else {
        match serde_json::from_slice::<DrawRequest>(&body) {
            Ok(request) => request,
            Err(e) => {
                return Ok(
                    AppError::ValidationError(format!("Invalid draw request body: {e}"))
                        .error_response(),
                );
            }
        }
    };
    match service.draw(path.into_inner(), request.timestamp).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/accounts/{account_id}/draws",
    tag = "draw",
    params(
        ("account_id" = i64, Path, description = "Account ID"),
        ("limit" = Option<u64>, Query, description = "Max records (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Account spin history, newest first", body = [SpinRecordResponse]),
        (status = 404, description = "Unknown account")
    )
)]
pub async fn get_account_draws(
    service: web::Data<SpinLogService>,
    path: web::Path<i64>,
    query: web::Query<AccountDrawsQuery>,
) -> Result<HttpResponse> {
    match service.records_for(path.into_inner(), query.limit).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draws",
    tag = "draw",
    params(
        ("offset" = Option<u64>, Query, description = "Records to skip (default 0)"),
        ("limit" = Option<u64>, Query, description = "Page size (default 10, max 100)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Global spin log page", body = DrawLogPage),
        (status = 401, description = "Missing or invalid admin token")
    )
)]
/// 全部抽奖记录（后台，分页，最新在前）
pub async fn list_draws(
    service: web::Data<SpinLogService>,
    query: web::Query<DrawLogQuery>,
) -> Result<HttpResponse> {
    match service.all_records(query.offset, query.limit).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/draws", web::get().to(list_draws))
        .route("/draws/{account_id}", web::post().to(draw))
        .route(
            "/accounts/{account_id}/draws",
            web::get().to(get_account_draws),
        );
}
