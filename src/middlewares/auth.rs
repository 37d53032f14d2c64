use crate::error::AppError;
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// 需要管理员令牌的路径规则
struct AdminPaths {
    // 任意方法都需要鉴权的前缀
    prefix_paths: Vec<&'static str>,
    // 仅 GET 需要鉴权的完整路径
    exact_get_paths: Vec<&'static str>,
    // 非 GET 方法需要鉴权的前缀（读公开，写需鉴权）
    write_prefix_paths: Vec<&'static str>,
    // 需要排除的路径（即使在前缀下也公开）
    excluded_paths: Vec<&'static str>,
}

impl AdminPaths {
    fn new() -> Self {
        Self {
            prefix_paths: vec!["/api/v1/admin/", "/api/v1/points/"],
            exact_get_paths: vec!["/api/v1/draws", "/api/v1/accounts"],
            write_prefix_paths: vec!["/api/v1/promotions"],
            excluded_paths: vec!["/api/v1/admin/sessions"],
        }
    }

    fn requires_admin(&self, method: &Method, path: &str) -> bool {
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        if self.excluded_paths.contains(&path) {
            return false;
        }

        if self
            .prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
        {
            return true;
        }

        if *method == Method::GET && self.exact_get_paths.contains(&path) {
            return true;
        }

        *method != Method::GET
            && *method != Method::HEAD
            && self
                .write_prefix_paths
                .iter()
                .any(|&prefix| path.starts_with(prefix))
    }
}

/// 管理员鉴权中间件：仅拦截后台路径，校验 Bearer 令牌并注入 AdminIdentity
pub struct AdminAuthMiddleware {
    jwt_service: JwtService,
}

impl AdminAuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

/// 通过鉴权的管理员
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub username: String,
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            admin_paths: AdminPaths::new(),
        }))
    }
}

pub struct AdminAuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    admin_paths: AdminPaths,
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        if !self.admin_paths.requires_admin(req.method(), req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let Some(token) = token else {
            let error = AppError::AuthError("Missing admin token".to_string());
            return Box::pin(async move { Err(error.into()) });
        };

        match self.jwt_service.verify_admin_token(token) {
            Ok(claims) => {
                req.extensions_mut().insert(AdminIdentity {
                    username: claims.sub,
                });
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(e) => {
                log::warn!("Rejected admin request to {}: {e}", req.path());
                let error = AppError::AuthError("Invalid admin token".to_string());
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}
