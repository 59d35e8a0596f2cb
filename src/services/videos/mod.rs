pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::videos::requests::{CreateVideoRequest, UpdateVideoRequest, VideoListParams};
use crate::storage::Storage;

pub struct VideoService {
    storage: Option<Arc<dyn Storage>>,
}

impl VideoService {
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

    pub async fn list_videos(
        &self,
        request: &HttpRequest,
        params: VideoListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_videos(self, request, params).await
    }

    pub async fn get_video(
        &self,
        request: &HttpRequest,
        video_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_video(self, request, video_id).await
    }

    pub async fn create_video(
        &self,
        request: &HttpRequest,
        req: CreateVideoRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_video(self, request, req).await
    }

    pub async fn update_video(
        &self,
        request: &HttpRequest,
        video_id: i64,
        req: UpdateVideoRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_video(self, request, video_id, req).await
    }

    pub async fn delete_video(
        &self,
        request: &HttpRequest,
        video_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_video(self, request, video_id).await
    }
}
