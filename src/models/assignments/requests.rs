use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::assignments::entities::{
    AssignmentCategory, AssignmentStatus, QuestionType, RecipientType,
};
use crate::models::common::pagination::PaginationQuery;

/// 创建作业请求（完整图：作业 + 题目 + 选项 + 接收人）
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<AssignmentCategory>,
    pub status: Option<AssignmentStatus>,
    pub start_date: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-08-01T12:00:00Z"
    pub due_date: Option<DateTime<Utc>>,
    pub time_limit: Option<i32>,
    pub attempt_limit: Option<i32>,
    pub allow_late_submission: Option<bool>,
    pub shuffle_questions: Option<bool>,
    pub shuffle_options: Option<bool>,
    pub questions: Option<Vec<QuestionSpec>>,
    pub recipients: Option<RecipientsSpec>,
}

/// 更新作业请求
///
/// questions / recipients 提供时整体替换原有的子图。
#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<AssignmentCategory>,
    pub status: Option<AssignmentStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub time_limit: Option<i32>,
    pub attempt_limit: Option<i32>,
    pub allow_late_submission: Option<bool>,
    pub shuffle_questions: Option<bool>,
    pub shuffle_options: Option<bool>,
    pub questions: Option<Vec<QuestionSpec>>,
    pub recipients: Option<RecipientsSpec>,
}

/// 题目定义
#[derive(Debug, Deserialize)]
pub struct QuestionSpec {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub marks: Option<f64>,
    pub options: Option<Vec<OptionSpec>>,
    /// MCQ：客户端选项 ID 数组（入库时映射为存储 ID）；判断题：布尔值
    pub correct_answer: Option<serde_json::Value>,
    pub allowed_file_types: Option<Vec<String>>,
    pub max_file_size: Option<i32>,
}

/// 选项定义，id 为客户端侧临时标识（如 "o1"）
#[derive(Debug, Deserialize)]
pub struct OptionSpec {
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// 接收人定义
#[derive(Debug, Deserialize)]
pub struct RecipientsSpec {
    pub recipient_type: RecipientType,
    #[serde(default)]
    pub student_ids: Vec<i64>,
}

/// 管理端作业列表查询参数（HTTP 请求）
#[derive(Debug, Deserialize)]
pub struct AssignmentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub status: Option<AssignmentStatus>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct AssignmentListQuery {
    pub page: i64,
    pub size: i64,
    pub search: Option<String>,
    pub status: Option<AssignmentStatus>,
}

/// 提交作业请求
///
/// answers 键为题目 ID（JSON 对象键，十进制字符串），值的形状由题型决定。
#[derive(Debug, Deserialize)]
pub struct SubmitAssignmentRequest {
    pub answers: Option<HashMap<String, serde_json::Value>>,
    pub time_taken: Option<i32>,
}

/// 自动保存请求
#[derive(Debug, Deserialize)]
pub struct AutoSaveRequest {
    pub question_id: i64,
    pub answer: serde_json::Value,
}

/// 建议请求
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub question_id: i64,
    pub answer_text: Option<String>,
}
