pub mod common;

pub mod admin;
pub mod assignments;
pub mod auth;
pub mod books;
pub mod chat;
pub mod students;
pub mod submissions;
pub mod uploads;
pub mod users;
pub mod videos;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 应用启动时间，用于健康检查的 uptime 计算
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// ApiResponse 中的稳定判别值，前端据此分支处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 参数错误
    InvalidParams = 1001,

    // 认证相关
    Unauthorized = 2001,
    AuthFailed = 2002,
    TokenExpired = 2003,

    // 权限与状态冲突
    Forbidden = 3001,
    AssignmentAccessDenied = 3002,
    AttemptLimitExceeded = 3003,
    DeadlinePassed = 3004,
    AssignmentNotAvailable = 3005,
    AccountDisabled = 3006,

    // 资源不存在
    NotFound = 4001,
    UserNotFound = 4002,
    AssignmentNotFound = 4003,
    QuestionNotFound = 4004,
    SubmissionNotFound = 4005,
    VideoNotFound = 4006,
    BookNotFound = 4007,

    // 冲突
    UserAlreadyExists = 5001,
    SubmissionConflict = 5002,

    // 文件相关
    FileUploadFailed = 6001,
    FileTypeNotAllowed = 6002,
    FileSizeExceeded = 6003,
    FileNotFound = 6004,
    MultifileUploadNotAllowed = 6005,

    // 服务端错误
    InternalServerError = 9001,
}
