use serde::{Deserialize, Serialize};

/// 管理端仪表盘统计
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_students: i64,
    pub active_students: i64,
    pub inactive_students: i64,
    pub total_videos: i64,
    /// 最近 7 天注册的学生数
    pub recent_students: i64,
}

/// 管理端仪表盘摘要
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminSummary {
    pub student_growth: String,
    pub video_count: String,
}

/// 管理端仪表盘响应
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminDashboardResponse {
    pub stats: AdminStats,
    pub summary: AdminSummary,
}
