use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::StudentListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{AdminService, AssignmentService};
use crate::utils::SafeIDI64;

// 懒加载的全局服务实例
static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 仪表盘
pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.dashboard(&req).await
}

// 学生列表
pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.list_students(&req, query.into_inner()).await
}

// 学生详情
pub async fn get_student(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.get_student(&req, path.0).await
}

// 切换学生启用状态
pub async fn toggle_student(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.toggle_student(&req, path.0).await
}

// 作业列表
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.admin_list(&req, query.into_inner()).await
}

// 作业统计
pub async fn assignment_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.stats(&req).await
}

// 作业详情
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.admin_detail(&req, path.0).await
}

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSIGNMENT_SERVICE
        .create(&req, user_id, body.into_inner())
        .await
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update(&req, path.0, body.into_inner())
        .await
}

// 删除作业
pub async fn delete_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete(&req, path.0).await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            // 管理端接口：全部要求管理员角色
            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/dashboard").route(web::get().to(dashboard)))
            .service(web::resource("/students").route(web::get().to(list_students)))
            .service(web::resource("/students/{id}").route(web::get().to(get_student)))
            .service(web::resource("/students/{id}/toggle").route(web::put().to(toggle_student)))
            .service(
                web::resource("/assignments")
                    .route(web::get().to(list_assignments))
                    .route(web::post().to(create_assignment)),
            )
            // 注意放在 /assignments/{id} 之前，避免 "stats" 被当作 ID
            .service(web::resource("/assignments/stats").route(web::get().to(assignment_stats)))
            .service(
                web::resource("/assignments/{id}")
                    .route(web::get().to(get_assignment))
                    .route(web::put().to(update_assignment))
                    .route(web::delete().to(delete_assignment)),
            ),
    );
}
