use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::books::requests::{BookListParams, CreateBookRequest, UpdateBookRequest};
use crate::models::users::entities::UserRole;
use crate::services::BookService;
use crate::utils::SafeIDI64;

// 懒加载的全局 BookService 实例
static BOOK_SERVICE: Lazy<BookService> = Lazy::new(BookService::new_lazy);

// 列出图书
pub async fn list_books(
    req: HttpRequest,
    query: web::Query<BookListParams>,
) -> ActixResult<HttpResponse> {
    BOOK_SERVICE.list_books(&req, query.into_inner()).await
}

// 获取图书详情
pub async fn get_book(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    BOOK_SERVICE.get_book(&req, path.0).await
}

// 下载图书
pub async fn download_book(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    BOOK_SERVICE.download_book(&req, path.0).await
}

// 创建图书
pub async fn create_book(
    req: HttpRequest,
    body: web::Json<CreateBookRequest>,
) -> ActixResult<HttpResponse> {
    BOOK_SERVICE.create_book(&req, body.into_inner()).await
}

// 更新图书
pub async fn update_book(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateBookRequest>,
) -> ActixResult<HttpResponse> {
    BOOK_SERVICE
        .update_book(&req, path.0, body.into_inner())
        .await
}

// 删除图书
pub async fn delete_book(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    BOOK_SERVICE.delete_book(&req, path.0).await
}

// 配置路由
pub fn configure_book_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/books")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出图书 - 所有登录用户可访问
                    .route(web::get().to(list_books))
                    // 创建图书 - 仅管理员
                    .route(
                        web::post()
                            .to(create_book)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_book))
                    .route(
                        web::put()
                            .to(update_book)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_book)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(web::resource("/{id}/download").route(web::get().to(download_book))),
    );
}
