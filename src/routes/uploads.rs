use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::UploadService;

// 懒加载的全局 UploadService 实例
static UPLOAD_SERVICE: Lazy<UploadService> = Lazy::new(UploadService::new_lazy);

// 单文件上传
pub async fn upload(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.upload(&req, payload).await
}

// 配置路由
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/uploads")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::post().to(upload))),
    );
}
