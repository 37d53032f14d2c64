use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::account::register,
        handlers::account::login,
        handlers::account::list_accounts,
        handlers::points::get_points,
        handlers::points::credit_points,
        handlers::points::debit_points,
        handlers::promotion::list_promotions,
        handlers::promotion::get_promotion,
        handlers::promotion::create_promotion,
        handlers::promotion::update_promotion,
        handlers::promotion::deactivate_promotion,
        handlers::promotion::delete_promotion,
        handlers::draw::draw,
        handlers::draw::get_account_draws,
        handlers::draw::list_draws,
        handlers::admin::admin_login,
        handlers::admin::admin_ping,
        handlers::admin::stats,
    ),
    components(
        schemas(
            ApiError,
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            AccountResponse,
            AccountSummary,
            PromotionQuery,
            PromotionRequest,
            PromotionResponse,
            PointsAdjustRequest,
            PointsHistoryQuery,
            LedgerEntryResponse,
            PointsResponse,
            PointsAdjustResponse,
            DrawRequest,
            DrawResponse,
            AccountDrawsQuery,
            DrawLogQuery,
            SpinRecordResponse,
            DrawLogPage,
            AdminLoginRequest,
            AdminLoginResponse,
            PromotionStat,
            StatsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health"),
        (name = "account", description = "Customer accounts API"),
        (name = "points", description = "Points ledger API"),
        (name = "promotion", description = "Prize wheel promotions API"),
        (name = "draw", description = "Prize wheel draws API"),
        (name = "admin", description = "Back office API"),
    ),
    info(
        title = "Caturro Rewards API",
        version = "1.0.0",
        description = "Caturro Café loyalty and prize wheel REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
