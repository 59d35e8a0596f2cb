use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::assignments::requests::{
    AutoSaveRequest, SubmitAssignmentRequest, SuggestRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 学生作业列表
pub async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    let student_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSIGNMENT_SERVICE.list_for_student(&req, student_id).await
}

// 学生作业详情
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let student_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSIGNMENT_SERVICE
        .detail_for_student(&req, path.0, student_id)
        .await
}

// 提交作业
pub async fn submit_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let student_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSIGNMENT_SERVICE
        .submit(&req, path.0, student_id, body.into_inner())
        .await
}

// 自动保存答案
pub async fn auto_save_answer(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<AutoSaveRequest>,
) -> ActixResult<HttpResponse> {
    let student_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSIGNMENT_SERVICE
        .auto_save(&req, path.0, student_id, body.into_inner())
        .await
}

// 查询成绩
pub async fn get_assignment_result(
    req: HttpRequest,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let student_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSIGNMENT_SERVICE.result(&req, path.0, student_id).await
}

// 答案改进建议
pub async fn suggest_improvement(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SuggestRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .suggest(&req, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            // 学生端接口：全部要求学生角色
            .wrap(middlewares::RequireRole::new(&UserRole::Student))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_assignments)))
            .service(web::resource("/{id}").route(web::get().to(get_assignment)))
            .service(web::resource("/{id}/submit").route(web::post().to(submit_assignment)))
            .service(web::resource("/{id}/autosave").route(web::post().to(auto_save_answer)))
            .service(web::resource("/{id}/result").route(web::get().to(get_assignment_result)))
            .service(web::resource("/{id}/suggest").route(web::post().to(suggest_improvement))),
    );
}
