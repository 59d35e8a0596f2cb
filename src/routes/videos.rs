use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::videos::requests::{CreateVideoRequest, UpdateVideoRequest, VideoListParams};
use crate::services::VideoService;
use crate::utils::SafeIDI64;

// 懒加载的全局 VideoService 实例
static VIDEO_SERVICE: Lazy<VideoService> = Lazy::new(VideoService::new_lazy);

// 列出视频
pub async fn list_videos(
    req: HttpRequest,
    query: web::Query<VideoListParams>,
) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.list_videos(&req, query.into_inner()).await
}

// 获取视频详情
pub async fn get_video(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.get_video(&req, path.0).await
}

// 创建视频
pub async fn create_video(
    req: HttpRequest,
    body: web::Json<CreateVideoRequest>,
) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.create_video(&req, body.into_inner()).await
}

// 更新视频
pub async fn update_video(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateVideoRequest>,
) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE
        .update_video(&req, path.0, body.into_inner())
        .await
}

// 删除视频
pub async fn delete_video(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.delete_video(&req, path.0).await
}

// 配置路由
pub fn configure_video_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/videos")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出视频 - 所有登录用户可访问
                    .route(web::get().to(list_videos))
                    // 创建视频 - 仅管理员
                    .route(
                        web::post()
                            .to(create_video)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // 获取视频详情 - 所有登录用户可访问
                    .route(web::get().to(get_video))
                    // 更新视频 - 仅管理员
                    .route(
                        web::put()
                            .to(update_video)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    // 删除视频 - 仅管理员
                    .route(
                        web::delete()
                            .to(delete_video)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
