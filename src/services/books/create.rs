use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BookService;
use crate::models::books::requests::CreateBookRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_book(
    service: &BookService,
    request: &HttpRequest,
    req: CreateBookRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "Title is required",
        )));
    }

    match storage.create_book(req).await {
        Ok(book) => Ok(HttpResponse::Created().json(ApiResponse::success(book, "图书创建成功"))),
        Err(e) => {
            tracing::error!("Failed to create book: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建图书失败: {e}"),
                )),
            )
        }
    }
}
