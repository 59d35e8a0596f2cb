use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;

use crate::models::{ApiResponse, AppStartTime};

#[derive(Serialize)]
struct HealthInfo {
    name: &'static str,
    version: &'static str,
    uptime_seconds: i64,
}

// 健康检查
pub async fn health(req: HttpRequest) -> ActixResult<HttpResponse> {
    let uptime_seconds = req
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or(0);

    let info = HealthInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(info, "ok")))
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/health").service(web::resource("").route(web::get().to(health))));
}
