use crate::models::common::pagination::PaginationQuery;
use serde::Deserialize;

/// 创建图书请求
///
/// file_url 来自上传接口返回的引用。
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub file_url: Option<String>,
    pub external_link: Option<String>,
}

/// 更新图书请求
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub file_url: Option<String>,
    pub external_link: Option<String>,
}

/// 图书列表查询参数（HTTP 请求）
#[derive(Debug, Deserialize)]
pub struct BookListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub category: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct BookListQuery {
    pub page: i64,
    pub size: i64,
    pub search: Option<String>,
    pub category: Option<String>,
}
