use serde::Deserialize;

/// 更新个人资料请求
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}
