use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::VideoService;
use crate::models::videos::requests::CreateVideoRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_video(
    service: &VideoService,
    request: &HttpRequest,
    req: CreateVideoRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 标题和地址必填
    if req.title.trim().is_empty() || req.video_url.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "Title and video URL are required",
        )));
    }

    match storage.create_video(req).await {
        Ok(video) => Ok(HttpResponse::Created().json(ApiResponse::success(video, "视频创建成功"))),
        Err(e) => {
            tracing::error!("Failed to create video: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建视频失败: {e}"),
                )),
            )
        }
    }
}
