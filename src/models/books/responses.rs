use serde::{Deserialize, Serialize};

use crate::models::PaginationInfo;
use crate::models::books::entities::Book;

/// 图书列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct BookListResponse {
    pub items: Vec<Book>,
    pub pagination: PaginationInfo,
}
