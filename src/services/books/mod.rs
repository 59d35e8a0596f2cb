pub mod create;
pub mod delete;
pub mod detail;
pub mod download;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::books::requests::{BookListParams, CreateBookRequest, UpdateBookRequest};
use crate::storage::Storage;

pub struct BookService {
    storage: Option<Arc<dyn Storage>>,
}

impl BookService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_books(
        &self,
        request: &HttpRequest,
        params: BookListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_books(self, request, params).await
    }

    pub async fn get_book(&self, request: &HttpRequest, book_id: i64) -> ActixResult<HttpResponse> {
        detail::get_book(self, request, book_id).await
    }

    pub async fn download_book(
        &self,
        request: &HttpRequest,
        book_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::download_book(self, request, book_id).await
    }

    pub async fn create_book(
        &self,
        request: &HttpRequest,
        req: CreateBookRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_book(self, request, req).await
    }

    pub async fn update_book(
        &self,
        request: &HttpRequest,
        book_id: i64,
        req: UpdateBookRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_book(self, request, book_id, req).await
    }

    pub async fn delete_book(
        &self,
        request: &HttpRequest,
        book_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_book(self, request, book_id).await
    }
}
