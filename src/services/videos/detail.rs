use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::VideoService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_video(
    service: &VideoService,
    request: &HttpRequest,
    video_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_video_by_id(video_id).await {
        Ok(Some(video)) => Ok(HttpResponse::Ok().json(ApiResponse::success(video, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::VideoNotFound, "视频不存在"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询视频失败: {e}"),
            )),
        ),
    }
}
