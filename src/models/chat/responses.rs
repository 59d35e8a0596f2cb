use serde::{Deserialize, Serialize};

/// 助手回答
///
/// sources 列出回答引用的 API 路径，方便前端跳转。
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub sources: Vec<String>,
}
