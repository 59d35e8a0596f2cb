use serde::{Deserialize, Serialize};

use crate::models::assignments::entities::AnswerValue;
use crate::models::submissions::entities::{Submission, SubmissionStatus};

/// 成绩查询中作业的简要信息
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentBrief {
    pub id: i64,
    pub title: String,
    pub total_marks: f64,
}

/// 单题作答结果
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResultItem {
    pub question_id: i64,
    pub question_title: String,
    pub question_type: String,
    pub answer: Option<AnswerValue>,
    pub score: Option<f64>,
    pub max_score: f64,
    pub feedback: Option<String>,
}

/// 提交的摘要视图
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionView {
    pub id: i64,
    pub attempt_number: i32,
    pub status: SubmissionStatus,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub total_score: Option<f64>,
    pub max_score: Option<f64>,
    pub percentage: Option<f64>,
    pub feedback: Option<String>,
}

impl From<&Submission> for SubmissionView {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id,
            attempt_number: submission.attempt_number,
            status: submission.status,
            submitted_at: submission.submitted_at,
            total_score: submission.total_score,
            max_score: submission.max_score,
            percentage: submission.percentage,
            feedback: submission.feedback.clone(),
        }
    }
}

/// 作业成绩响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResultResponse {
    pub submission: SubmissionView,
    pub assignment: AssignmentBrief,
    pub answers: Vec<AnswerResultItem>,
}
