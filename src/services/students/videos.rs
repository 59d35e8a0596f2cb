use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};

/// 学生视频列表（限量，不分页）
pub async fn get_student_videos(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_recent_videos(50).await {
        Ok(videos) => Ok(HttpResponse::Ok().json(ApiResponse::success(videos, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询视频列表失败: {e}"),
            )),
        ),
    }
}
