use serde::{Deserialize, Serialize};

use crate::models::PaginationInfo;
use crate::models::assignments::entities::{
    AnswerValue, Assignment, AssignmentRecipient, Question, RecipientType,
};
use crate::models::submissions::entities::SubmissionStatus;

/// 作业创建者信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentCreator {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// 学生视角的作业完成状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentAssignmentStatus {
    NotStarted,
    InProgress,
    Submitted,
}

/// 学生最近一次提交的摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub id: i64,
    pub status: SubmissionStatus,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub total_score: Option<f64>,
    pub percentage: Option<f64>,
}

/// 学生作业列表项
///
/// status 是学生视角的完成状态，和 assignment.status（发布状态）不同。
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentAssignmentListItem {
    pub assignment: Assignment,
    pub creator: Option<AssignmentCreator>,
    pub status: StudentAssignmentStatus,
    pub attempts_used: i64,
    pub latest_submission: Option<SubmissionSummary>,
}

/// 学生作业列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentAssignmentListResponse {
    pub items: Vec<StudentAssignmentListItem>,
}

/// 自动保存的答案回显
#[derive(Debug, Serialize, Deserialize)]
pub struct LatestAnswer {
    pub question_id: i64,
    pub answer: Option<AnswerValue>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
}

/// 学生作业详情
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentAssignmentDetail {
    pub assignment: Assignment,
    // Question 序列化时跳过标准答案，选项跳过 is_correct
    pub questions: Vec<Question>,
    pub creator: Option<AssignmentCreator>,
    pub can_attempt: bool,
    pub attempts_used: i64,
    pub max_attempts: Option<i32>,
    pub latest_answers: Vec<LatestAnswer>,
}

/// 提交结果
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResult {
    pub submission_id: i64,
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub status: SubmissionStatus,
}

/// 建议响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

/// 管理端题目视图（含映射回客户端 ID 形式的标准答案和 is_correct 标记）
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminQuestionView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub question_type: String,
    pub marks: f64,
    pub order_index: i32,
    pub options: Vec<AdminOptionView>,
    /// MCQ：客户端形式的选项 ID 数组（"o{id}"）；判断题：布尔值
    pub correct_answer: Option<serde_json::Value>,
    pub allowed_file_types: Option<Vec<String>>,
    pub max_file_size: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminOptionView {
    pub id: String,
    pub db_id: i64,
    pub text: String,
    pub order_index: i32,
    pub is_correct: bool,
}

/// 管理端接收人视图
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminRecipientView {
    pub recipient_type: RecipientType,
    pub student: Option<AssignmentCreator>,
}

impl AdminRecipientView {
    pub fn from_recipient(
        recipient: &AssignmentRecipient,
        student: Option<AssignmentCreator>,
    ) -> Self {
        Self {
            recipient_type: recipient.recipient_type,
            student,
        }
    }
}

/// 管理端作业列表项
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminAssignmentListItem {
    pub assignment: Assignment,
    pub question_count: i64,
    pub submission_count: i64,
}

/// 管理端作业列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminAssignmentListResponse {
    pub items: Vec<AdminAssignmentListItem>,
    pub pagination: PaginationInfo,
}

/// 管理端作业详情
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminAssignmentDetail {
    pub assignment: Assignment,
    pub questions: Vec<AdminQuestionView>,
    pub recipients: Vec<AdminRecipientView>,
    pub submission_count: i64,
}

/// 管理端作业统计
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentStatsResponse {
    pub total_assignments: i64,
    pub published_assignments: i64,
    pub draft_assignments: i64,
    pub total_submissions: i64,
    pub graded_submissions: i64,
    pub pending_submissions: i64,
}
