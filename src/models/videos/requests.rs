use crate::models::common::pagination::PaginationQuery;
use serde::Deserialize;

/// 创建视频请求
#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
}

/// 更新视频请求
#[derive(Debug, Deserialize)]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
}

/// 视频列表查询参数（HTTP 请求）
#[derive(Debug, Deserialize)]
pub struct VideoListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct VideoListQuery {
    pub page: i64,
    pub size: i64,
    pub search: Option<String>,
}
