use serde::{Deserialize, Serialize};

use crate::models::users::entities::User;

/// 学生仪表盘统计
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentStats {
    pub total_videos: i64,
    pub total_assignments: i64,
    pub submitted_assignments: i64,
}

/// 学生仪表盘响应
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentDashboardResponse {
    pub user: User,
    pub stats: StudentStats,
    pub greeting: String,
}
