use std::path::Path;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BookService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

/// 下载图书
///
/// 有外部链接时重定向；否则从上传目录读文件流式返回。
/// 路径只取文件名部分，防止目录穿越。
pub async fn download_book(
    service: &BookService,
    request: &HttpRequest,
    book_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    if let Some(external_link) = &book.external_link {
        return Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, external_link.clone()))
            .finish());
    }

    if let Some(file_url) = &book.file_url {
        let config = AppConfig::get();
        let file_name = Path::new(file_url)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        let file_path = Path::new(&config.upload.dir).join(file_name);

        return match std::fs::read(&file_path) {
            Ok(bytes) => Ok(HttpResponse::Ok()
                .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}.pdf\"", book.title),
                ))
                .body(bytes)),
            Err(e) => {
                tracing::warn!("Book file missing on disk: {} ({})", file_path.display(), e);
                Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::FileNotFound,
                    "文件不存在",
                )))
            }
        };
    }

    Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::InvalidParams,
        "该图书没有可下载的文件或外部链接",
    )))
}
