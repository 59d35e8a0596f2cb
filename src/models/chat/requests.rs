use serde::Deserialize;

/// 助手提问请求
#[derive(Debug, Deserialize)]
pub struct ChatQueryRequest {
    pub question: String,
}
