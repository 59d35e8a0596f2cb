use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::students::requests::UpdateProfileRequest;
use crate::models::users::entities::UserRole;
use crate::services::StudentService;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

// 学生仪表盘
pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.dashboard(&req).await
}

// 获取个人资料
pub async fn get_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_profile(&req).await
}

// 更新个人资料
pub async fn update_profile(
    req: HttpRequest,
    body: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.update_profile(&req, body.into_inner()).await
}

// 学生视频列表
pub async fn list_videos(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_videos(&req).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            .wrap(middlewares::RequireRole::new(&UserRole::Student))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/dashboard").route(web::get().to(dashboard)))
            .service(
                web::resource("/profile")
                    .route(web::get().to(get_profile))
                    .route(web::put().to(update_profile)),
            )
            .service(web::resource("/videos").route(web::get().to(list_videos))),
    );
}
