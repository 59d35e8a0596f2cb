use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BookService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_book(
    service: &BookService,
    request: &HttpRequest,
    book_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_book_by_id(book_id).await {
        Ok(Some(book)) => Ok(HttpResponse::Ok().json(ApiResponse::success(book, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::BookNotFound, "图书不存在"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询图书失败: {e}"),
            )),
        ),
    }
}
