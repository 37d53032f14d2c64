use crate::models::*;
use crate::services::{LedgerService, Movement};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/accounts/{account_id}/points",
    tag = "points",
    params(
        ("account_id" = i64, Path, description = "Account ID"),
        ("limit" = Option<u64>, Query, description = "History entries (default 50, max 100)"),
        ("offset" = Option<u64>, Query, description = "History entries to skip")
    ),
    responses(
        (status = 200, description = "Balance and history", body = PointsResponse),
        (status = 404, description = "Unknown account")
    )
)]
pub async fn get_points(
    service: web::Data<LedgerService>,
    path: web::Path<i64>,
    query: web::Query<PointsHistoryQuery>,
) -> Result<HttpResponse> {
    match service.points_overview(path.into_inner(), &query).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/points/credit",
    tag = "points",
    request_body = PointsAdjustRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Points credited", body = PointsAdjustResponse),
        (status = 400, description = "Non-positive amount"),
        (status = 404, description = "Unknown account")
    )
)]
pub async fn credit_points(
    service: web::Data<LedgerService>,
    request: web::Json<PointsAdjustRequest>,
) -> Result<HttpResponse> {
    match service.adjust(Movement::Credit, &request).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/points/debit",
    tag = "points",
    request_body = PointsAdjustRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Points redeemed", body = PointsAdjustResponse),
        (status = 400, description = "Non-positive amount or insufficient balance"),
        (status = 404, description = "Unknown account")
    )
)]
pub async fn debit_points(
    service: web::Data<LedgerService>,
    request: web::Json<PointsAdjustRequest>,
) -> Result<HttpResponse> {
    match service.adjust(Movement::Debit, &request).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn points_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/accounts/{account_id}/points", web::get().to(get_points))
        .service(
            web::scope("/points")
                .route("/credit", web::post().to(credit_points))
                .route("/debit", web::post().to(debit_points)),
        );
}
