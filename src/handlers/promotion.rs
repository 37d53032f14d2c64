use crate::models::*;
use crate::services::PromotionService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/promotions",
    tag = "promotion",
    params(
        ("active_only" = Option<bool>, Query, description = "Only active promotions (default true)")
    ),
    responses(
        (status = 200, description = "Promotions in wheel order", body = [PromotionResponse])
    )
)]
/// 奖品列表，顺序即转盘扇区顺序
pub async fn list_promotions(
    service: web::Data<PromotionService>,
    query: web::Query<PromotionQuery>,
) -> Result<HttpResponse> {
    match service.list(query.active_only.unwrap_or(true)).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/promotions/{id}",
    tag = "promotion",
    params(("id" = i64, Path, description = "Promotion ID")),
    responses(
        (status = 200, description = "Promotion", body = PromotionResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_promotion(
    service: web::Data<PromotionService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get(path.into_inner()).await {
        Ok(p) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": p }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/promotions",
    tag = "promotion",
    request_body = PromotionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Promotion created", body = PromotionResponse),
        (status = 400, description = "Invalid weight, color or name"),
        (status = 401, description = "Missing or invalid admin token")
    )
)]
pub async fn create_promotion(
    service: web::Data<PromotionService>,
    request: web::Json<PromotionRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()).await {
        Ok(p) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": p }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/promotions/{id}",
    tag = "promotion",
    params(("id" = i64, Path, description = "Promotion ID")),
    request_body = PromotionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Promotion updated", body = PromotionResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_promotion(
    service: web::Data<PromotionService>,
    path: web::Path<i64>,
    request: web::Json<PromotionRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), request.into_inner()).await {
        Ok(p) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": p }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/promotions/{id}/deactivate",
    tag = "promotion",
    params(("id" = i64, Path, description = "Promotion ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Promotion deactivated", body = PromotionResponse),
        (status = 404, description = "Not found")
    )
)]
pub async fn deactivate_promotion(
    service: web::Data<PromotionService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.deactivate(path.into_inner()).await {
        Ok(p) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": p }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/promotions/{id}",
    tag = "promotion",
    params(("id" = i64, Path, description = "Promotion ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Promotion deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Referenced by spin records, deactivate instead")
    )
)]
pub async fn delete_promotion(
    service: web::Data<PromotionService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn promotion_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/promotions")
            .route("", web::get().to(list_promotions))
            .route("", web::post().to(create_promotion))
            .route("/{id}", web::get().to(get_promotion))
            .route("/{id}", web::put().to(update_promotion))
            .route("/{id}", web::delete().to(delete_promotion))
            .route("/{id}/deactivate", web::post().to(deactivate_promotion)),
    );
}
