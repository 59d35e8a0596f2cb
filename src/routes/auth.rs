use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

// 学生注册
pub async fn register(
    req: HttpRequest,
    body: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(&req, body.into_inner()).await
}

// 登录（学生或管理员）
pub async fn login(req: HttpRequest, body: web::Json<LoginRequest>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(&req, body.into_inner()).await
}

// 管理员登录（独立入口）
pub async fn admin_login(
    req: HttpRequest,
    body: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.admin_login(&req, body.into_inner()).await
}

// 当前用户信息
pub async fn me(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.me(&req).await
}

// 刷新 access token
pub async fn refresh(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh(&req).await
}

// 注销
pub async fn logout(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&req).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            // 注册/登录接口限流，防止暴力破解
            .service(
                web::resource("/register")
                    .route(web::post().to(register))
                    .wrap(RateLimit::new(5, 60).with_prefix("auth_register")),
            )
            .service(
                web::resource("/login")
                    .route(web::post().to(login))
                    .wrap(RateLimit::new(10, 60).with_prefix("auth_login")),
            )
            .service(
                web::resource("/admin/login")
                    .route(web::post().to(admin_login))
                    .wrap(RateLimit::new(10, 60).with_prefix("auth_admin_login")),
            )
            .service(web::resource("/refresh").route(web::post().to(refresh)))
            .service(
                web::resource("/me")
                    .route(web::get().to(me))
                    .wrap(middlewares::RequireJWT),
            )
            .service(
                web::resource("/logout")
                    .route(web::post().to(logout))
                    .wrap(middlewares::RequireJWT),
            ),
    );
}
