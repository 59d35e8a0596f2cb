use crate::models::common::pagination::PaginationQuery;
use crate::models::users::entities::UserRole;
use serde::Deserialize;

/// 创建用户请求（存储层输入，password 字段已是哈希值）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// 更新用户请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// 学生列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize)]
pub struct StudentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    /// active / inactive
    pub status: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct StudentListQuery {
    pub page: i64,
    pub size: i64,
    pub search: Option<String>,
    pub is_active: Option<bool>,
}
