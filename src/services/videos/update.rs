use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::VideoService;
use crate::models::videos::requests::UpdateVideoRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_video(
    service: &VideoService,
    request: &HttpRequest,
    video_id: i64,
    req: UpdateVideoRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_video(video_id, req).await {
        Ok(Some(video)) => Ok(HttpResponse::Ok().json(ApiResponse::success(video, "视频更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::VideoNotFound, "视频不存在"))),
        Err(e) => {
            tracing::error!("Failed to update video {}: {}", video_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("更新视频失败: {e}"),
                )),
            )
        }
    }
}
