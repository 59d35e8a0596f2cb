use std::path::Path;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BookService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_book(
    service: &BookService,
    request: &HttpRequest,
    book_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 删除记录前先拿到文件引用，随后清理磁盘文件
    let book = match storage.get_book_by_id(book_id).await {
        Ok(Some(book)) => book,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::BookNotFound, "图书不存在")));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询图书失败: {e}"),
                )),
            );
        }
    };

    match storage.delete_book(book_id).await {
        Ok(true) => {
            if let Some(file_url) = &book.file_url {
                let config = AppConfig::get();
                let file_name = Path::new(file_url)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or_default();
                let file_path = Path::new(&config.upload.dir).join(file_name);
                if let Err(e) = std::fs::remove_file(&file_path) {
                    tracing::warn!("Failed to remove book file {}: {}", file_path.display(), e);
                }
            }
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("图书删除成功")))
        }
        Ok(false) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::BookNotFound, "图书不存在"))),
        Err(e) => {
            tracing::error!("Failed to delete book {}: {}", book_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("删除图书失败: {e}"),
                )),
            )
        }
    }
}
