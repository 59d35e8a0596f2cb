use serde::{Deserialize, Serialize};

use crate::models::PaginationInfo;
use crate::models::users::entities::User;

/// 学生列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}
