use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BookService;
use crate::models::books::requests::UpdateBookRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_book(
    service: &BookService,
    request: &HttpRequest,
    book_id: i64,
    req: UpdateBookRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_book(book_id, req).await {
        Ok(Some(book)) => Ok(HttpResponse::Ok().json(ApiResponse::success(book, "图书更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::BookNotFound, "图书不存在"))),
        Err(e) => {
            tracing::error!("Failed to update book {}: {}", book_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("更新图书失败: {e}"),
                )),
            )
        }
    }
}
