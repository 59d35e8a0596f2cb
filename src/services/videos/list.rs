use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::VideoService;
use crate::models::videos::requests::{VideoListParams, VideoListQuery};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_videos(
    service: &VideoService,
    request: &HttpRequest,
    params: VideoListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let query = VideoListQuery {
        page: params.pagination.page,
        size: params.pagination.size,
        search: params.search,
    };

    match storage.list_videos_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询视频列表失败: {e}"),
            )),
        ),
    }
}
