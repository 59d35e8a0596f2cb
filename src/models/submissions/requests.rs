use crate::models::assignments::entities::AnswerValue;
use crate::models::submissions::entities::SubmissionStatus;

/// 定稿提交的写入参数（存储层输入）
///
/// 评分在业务层完成，存储层只负责把整张提交图原子落库。
#[derive(Debug, Clone)]
pub struct FinalizeSubmissionRequest {
    pub assignment_id: i64,
    pub student_id: i64,
    /// 复用未完成提交时为 Some（沿用其尝试号），否则新建下一次尝试
    pub reuse_submission_id: Option<i64>,
    pub attempt_number: i32,
    pub status: SubmissionStatus,
    pub time_taken: Option<i32>,
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub answers: Vec<GradedAnswerWrite>,
}

/// 单条答案的写入参数
#[derive(Debug, Clone)]
pub struct GradedAnswerWrite {
    pub question_id: i64,
    pub value: Option<AnswerValue>,
    /// None 表示等待人工评分
    pub score: Option<f64>,
    pub max_score: f64,
}
