use crate::middlewares::AdminIdentity;
use crate::models::*;
use crate::services::AdminService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/sessions",
    tag = "admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin token issued", body = AdminLoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn admin_login(
    service: web::Data<AdminService>,
    request: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse> {
    match service.login(request.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/ping",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Admin token is valid"),
        (status = 401, description = "Missing or invalid admin token")
    )
)]
pub async fn admin_ping(identity: web::ReqData<AdminIdentity>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": { "username": identity.username }
    })))
}

#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Statistics", body = StatsResponse),
        (status = 401, description = "Missing or invalid admin token")
    )
)]
pub async fn stats(service: web::Data<AdminService>) -> Result<HttpResponse> {
    match service.stats().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/sessions", web::post().to(admin_login))
            .route("/ping", web::get().to(admin_ping))
            .route("/stats", web::get().to(stats)),
    );
}
