use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{StudentListParams, StudentListQuery, UpdateUserRequest};
use crate::models::{ApiResponse, ErrorCode};

/// 学生列表（分页 + 搜索 + 状态筛选）
pub async fn list_students(
    service: &AdminService,
    request: &HttpRequest,
    params: StudentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let is_active = match params.status.as_deref() {
        Some("active") => Some(true),
        Some("inactive") => Some(false),
        _ => None,
    };

    let query = StudentListQuery {
        page: params.pagination.page,
        size: params.pagination.size,
        search: params.search,
        is_active,
    };

    match storage.list_students_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询学生列表失败: {e}"),
            )),
        ),
    }
}

/// 学生详情
pub async fn get_student(
    service: &AdminService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_by_id(student_id).await {
        // 只暴露学生账号，管理员账号不经由这个入口查询
        Ok(Some(user)) if user.role == UserRole::Student => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "查询成功")))
        }
        Ok(_) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "学生不存在"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询学生失败: {e}"),
            )),
        ),
    }
}

/// 切换学生启用状态
pub async fn toggle_student_status(
    service: &AdminService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match storage.get_user_by_id(student_id).await {
        Ok(Some(user)) if user.role == UserRole::Student => user,
        Ok(_) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "学生不存在")));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生失败: {e}"),
                )),
            );
        }
    };

    let new_status = !student.is_active;
    let update = UpdateUserRequest {
        name: None,
        is_active: Some(new_status),
    };

    match storage.update_user(student_id, update).await {
        Ok(Some(user)) => {
            let message = if new_status {
                "学生已启用"
            } else {
                "学生已停用"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, message)))
        }
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "学生不存在"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新学生状态失败: {e}"),
            )),
        ),
    }
}
