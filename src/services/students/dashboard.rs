use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::students::responses::{StudentDashboardResponse, StudentStats};
use crate::models::{ApiResponse, ErrorCode};

/// 学生仪表盘
pub async fn get_student_dashboard(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let total_videos = storage.count_videos().await.unwrap_or(0);

    // 可见作业与已完成数
    let assignments = storage
        .list_assignments_for_student(user.id)
        .await
        .unwrap_or_default();
    let total_assignments = assignments.len() as i64;
    let mut submitted_assignments = 0;
    for assignment in &assignments {
        if let Ok(Some(_)) = storage.latest_final_submission(assignment.id, user.id).await {
            submitted_assignments += 1;
        }
    }

    let greeting = format!("Welcome back, {}!", user.name);
    let response = StudentDashboardResponse {
        user,
        stats: StudentStats {
            total_videos,
            total_assignments,
            submitted_assignments,
        },
        greeting,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
