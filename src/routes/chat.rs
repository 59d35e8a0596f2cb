use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::chat::requests::ChatQueryRequest;
use crate::services::ChatService;

// 懒加载的全局 ChatService 实例
static CHAT_SERVICE: Lazy<ChatService> = Lazy::new(ChatService::new_lazy);

// 助手提问
pub async fn query(
    req: HttpRequest,
    body: web::Json<ChatQueryRequest>,
) -> ActixResult<HttpResponse> {
    CHAT_SERVICE.query(&req, body.into_inner()).await
}

// 配置路由
pub fn configure_chat_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/chat")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/query").route(web::post().to(query))),
    );
}
