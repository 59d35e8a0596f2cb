use serde::{Deserialize, Serialize};

/// 上传结果
///
/// 与 file_upload 类型答案嵌入的文件引用使用同一形状。
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    pub name: String,
    pub size: i64,
    pub content_type: String,
}
