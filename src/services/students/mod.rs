pub mod dashboard;
pub mod profile;
pub mod videos;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::UpdateProfileRequest;
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::get_student_dashboard(self, request).await
    }

    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::get_student_profile(self, request).await
    }

    pub async fn update_profile(
        &self,
        request: &HttpRequest,
        req: UpdateProfileRequest,
    ) -> ActixResult<HttpResponse> {
        profile::update_student_profile(self, request, req).await
    }

    pub async fn list_videos(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        videos::get_student_videos(self, request).await
    }
}
