use serde::{Deserialize, Serialize};

use crate::models::PaginationInfo;
use crate::models::videos::entities::Video;

/// 视频列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    pub items: Vec<Video>,
    pub pagination: PaginationInfo,
}
