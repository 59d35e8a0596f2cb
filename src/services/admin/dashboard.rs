use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::admin::responses::{AdminDashboardResponse, AdminStats, AdminSummary};
use crate::models::{ApiResponse, ErrorCode};

/// 管理端仪表盘
pub async fn get_admin_dashboard(
    service: &AdminService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let week_ago = chrono::Utc::now() - chrono::Duration::days(7);

    let stats_result = async {
        let total_students = storage.count_students().await?;
        let active_students = storage.count_active_students().await?;
        let total_videos = storage.count_videos().await?;
        let recent_students = storage.count_students_since(week_ago).await?;

        crate::errors::Result::Ok(AdminStats {
            total_students,
            active_students,
            inactive_students: total_students - active_students,
            total_videos,
            recent_students,
        })
    }
    .await;

    match stats_result {
        Ok(stats) => {
            let summary = AdminSummary {
                student_growth: if stats.recent_students > 0 {
                    "positive".to_string()
                } else {
                    "stable".to_string()
                },
                video_count: if stats.total_videos > 0 {
                    "good".to_string()
                } else {
                    "needs_content".to_string()
                },
            };

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AdminDashboardResponse { stats, summary },
                "查询成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询仪表盘失败: {e}"),
            )),
        ),
    }
}
