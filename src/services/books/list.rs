use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BookService;
use crate::models::books::requests::{BookListParams, BookListQuery};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_books(
    service: &BookService,
    request: &HttpRequest,
    params: BookListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let query = BookListQuery {
        page: params.pagination.page,
        size: params.pagination.size,
        search: params.search,
        category: params.category,
    };

    match storage.list_books_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询图书列表失败: {e}"),
            )),
        ),
    }
}
