use serde::{Deserialize, Serialize};

// 作业分类
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentCategory {
    Quiz,
    Assignment,
    Test,
    Exam,
}

impl std::fmt::Display for AssignmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentCategory::Quiz => write!(f, "quiz"),
            AssignmentCategory::Assignment => write!(f, "assignment"),
            AssignmentCategory::Test => write!(f, "test"),
            AssignmentCategory::Exam => write!(f, "exam"),
        }
    }
}

impl std::str::FromStr for AssignmentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiz" => Ok(AssignmentCategory::Quiz),
            "assignment" => Ok(AssignmentCategory::Assignment),
            "test" => Ok(AssignmentCategory::Test),
            "exam" => Ok(AssignmentCategory::Exam),
            _ => Err(format!("Invalid assignment category: {s}")),
        }
    }
}

// 作业状态：draft -> published -> locked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Draft,
    Published,
    Locked,
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Draft => write!(f, "draft"),
            AssignmentStatus::Published => write!(f, "published"),
            AssignmentStatus::Locked => write!(f, "locked"),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AssignmentStatus::Draft),
            "published" => Ok(AssignmentStatus::Published),
            "locked" => Ok(AssignmentStatus::Locked),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    McqSingle,
    McqMultiple,
    TrueFalse,
    ShortAnswer,
    LongAnswer,
    FileUpload,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::McqSingle => write!(f, "mcq_single"),
            QuestionType::McqMultiple => write!(f, "mcq_multiple"),
            QuestionType::TrueFalse => write!(f, "true_false"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
            QuestionType::LongAnswer => write!(f, "long_answer"),
            QuestionType::FileUpload => write!(f, "file_upload"),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mcq_single" => Ok(QuestionType::McqSingle),
            "mcq_multiple" => Ok(QuestionType::McqMultiple),
            "true_false" => Ok(QuestionType::TrueFalse),
            "short_answer" => Ok(QuestionType::ShortAnswer),
            "long_answer" => Ok(QuestionType::LongAnswer),
            "file_upload" => Ok(QuestionType::FileUpload),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

// 接收人类型
//
// 原始设计里还有 batch 类型，但从未被任何路径解析，这里不保留。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientType {
    AllStudents,
    SelectedStudents,
}

impl std::fmt::Display for RecipientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipientType::AllStudents => write!(f, "all_students"),
            RecipientType::SelectedStudents => write!(f, "selected_students"),
        }
    }
}

impl std::str::FromStr for RecipientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all_students" => Ok(RecipientType::AllStudents),
            "selected_students" => Ok(RecipientType::SelectedStudents),
            _ => Err(format!("Invalid recipient type: {s}")),
        }
    }
}

/// 标准答案
///
/// MCQ 存选项 ID 集合，判断题存布尔值。数据库里是 JSON 文本。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Boolean(bool),
    Options(Vec<i64>),
}

impl CorrectAnswer {
    /// 从数据库 JSON 解析
    pub fn from_json(raw: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).ok()?;
        match value {
            serde_json::Value::Bool(flag) => Some(CorrectAnswer::Boolean(flag)),
            serde_json::Value::Array(items) => Some(CorrectAnswer::Options(
                items.iter().filter_map(|v| v.as_i64()).collect(),
            )),
            // 单个 ID 按单元素集合处理
            serde_json::Value::Number(n) => n.as_i64().map(|id| CorrectAnswer::Options(vec![id])),
            _ => None,
        }
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

/// 学生答案值
///
/// 标签联合保证一条答案只有一种取值，非法组合不可表示。
/// 序列化为裸 JSON 值：选项数组 / 布尔 / 字符串 / 文件对象。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Boolean(bool),
    Options(Vec<i64>),
    Text(String),
    File { url: String, name: String, size: i64 },
}

impl AnswerValue {
    /// 按题目类型解释客户端提交的原始 JSON 值
    ///
    /// 返回 None 表示未作答或值的形状与题型不符。
    pub fn from_submitted(question_type: QuestionType, raw: &serde_json::Value) -> Option<Self> {
        if raw.is_null() {
            return None;
        }

        match question_type {
            QuestionType::McqSingle | QuestionType::McqMultiple => match raw {
                serde_json::Value::Array(items) => {
                    let ids: Vec<i64> = items.iter().filter_map(|v| v.as_i64()).collect();
                    if ids.is_empty() {
                        None
                    } else {
                        Some(AnswerValue::Options(ids))
                    }
                }
                serde_json::Value::Number(n) => n.as_i64().map(|id| AnswerValue::Options(vec![id])),
                _ => None,
            },
            QuestionType::TrueFalse => raw.as_bool().map(AnswerValue::Boolean),
            QuestionType::ShortAnswer | QuestionType::LongAnswer => {
                raw.as_str().map(|s| AnswerValue::Text(s.to_string()))
            }
            QuestionType::FileUpload => {
                let obj = raw.as_object()?;
                Some(AnswerValue::File {
                    url: obj.get("url")?.as_str()?.to_string(),
                    name: obj
                        .get("name")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    size: obj.get("size").and_then(|v| v.as_i64()).unwrap_or(0),
                })
            }
        }
    }
}

/// 作业
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: AssignmentCategory,
    pub status: AssignmentStatus,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    // 分钟
    pub time_limit: Option<i32>,
    // None 表示不限次数
    pub attempt_limit: Option<i32>,
    pub allow_late_submission: bool,
    pub shuffle_questions: bool,
    pub shuffle_options: bool,
    pub total_marks: f64,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 作业是否对学生开放
    ///
    /// 仅 published 且已过开始时间（未设置开始时间视为已开始）。
    pub fn is_available(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        if self.status != AssignmentStatus::Published {
            return false;
        }
        match self.start_date {
            Some(start) => now >= start,
            None => true,
        }
    }

    /// 是否已过截止时间
    pub fn is_overdue(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        matches!(self.due_date, Some(due) if now > due)
    }

    /// 过期后是否还能迟交
    pub fn can_submit_late(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.allow_late_submission && self.is_overdue(now)
    }

    /// 还能否发起新的尝试
    pub fn can_attempt(&self, attempts_used: i64) -> bool {
        match self.attempt_limit {
            Some(limit) => attempts_used < limit as i64,
            None => true,
        }
    }
}

/// 题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub assignment_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub question_type: QuestionType,
    pub marks: f64,
    pub order_index: i32,
    // 学生侧响应不序列化标准答案
    #[serde(skip_serializing, default)]
    pub correct_answer: Option<CorrectAnswer>,
    pub allowed_file_types: Option<Vec<String>>,
    // MB
    pub max_file_size: Option<i32>,
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// 题目能否自动评分
    pub fn is_auto_gradable(&self) -> bool {
        matches!(
            self.question_type,
            QuestionType::McqSingle | QuestionType::McqMultiple | QuestionType::TrueFalse
        )
    }

    /// 自动评分
    ///
    /// 返回 None 表示需要人工评分：题型不可自动评分，或标准答案缺失/
    /// 形状不符/正确选项集合为空（退化的答案键一律转人工，而不是除零）。
    /// 未作答的可评分题目计 0 分。
    pub fn check_answer(&self, answer: Option<&AnswerValue>) -> Option<f64> {
        match self.question_type {
            QuestionType::McqSingle => {
                let correct = self.correct_option_ids()?;
                let score = match answer {
                    Some(AnswerValue::Options(selected)) => {
                        if selected.len() == 1 && correct.contains(&selected[0]) {
                            self.marks
                        } else {
                            0.0
                        }
                    }
                    _ => 0.0,
                };
                Some(score)
            }
            QuestionType::McqMultiple => {
                let correct = self.correct_option_ids()?;
                let k = correct.len() as f64;
                let score = match answer {
                    Some(AnswerValue::Options(selected)) => {
                        // 选择集合无序且去重
                        let selected: std::collections::BTreeSet<i64> =
                            selected.iter().copied().collect();
                        let c = selected.iter().filter(|id| correct.contains(id)).count() as f64;
                        let w = selected.len() as f64 - c;
                        // 线性部分得分：每个正确选项 +marks/k，每个错误选项 -marks/k，下限 0
                        ((c - w) * self.marks / k).max(0.0)
                    }
                    _ => 0.0,
                };
                Some(score)
            }
            QuestionType::TrueFalse => {
                let correct = match &self.correct_answer {
                    Some(CorrectAnswer::Boolean(flag)) => *flag,
                    _ => return None,
                };
                let score = match answer {
                    Some(AnswerValue::Boolean(submitted)) if *submitted == correct => self.marks,
                    _ => 0.0,
                };
                Some(score)
            }
            QuestionType::ShortAnswer | QuestionType::LongAnswer | QuestionType::FileUpload => {
                None
            }
        }
    }

    fn correct_option_ids(&self) -> Option<&Vec<i64>> {
        match &self.correct_answer {
            Some(CorrectAnswer::Options(ids)) if !ids.is_empty() => Some(ids),
            _ => None,
        }
    }
}

/// 题目选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub order_index: i32,
    #[serde(skip_serializing, default)]
    pub is_correct: bool,
}

/// 作业接收人
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecipient {
    pub id: i64,
    pub assignment_id: i64,
    pub recipient_type: RecipientType,
    pub student_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn question(question_type: QuestionType, marks: f64, correct: Option<CorrectAnswer>) -> Question {
        Question {
            id: 1,
            assignment_id: 1,
            title: "q".to_string(),
            description: None,
            question_type,
            marks,
            order_index: 0,
            correct_answer: correct,
            allowed_file_types: None,
            max_file_size: None,
            options: Vec::new(),
        }
    }

    fn assignment(status: AssignmentStatus) -> Assignment {
        Assignment {
            id: 1,
            title: "a".to_string(),
            description: None,
            category: AssignmentCategory::Quiz,
            status,
            start_date: None,
            due_date: None,
            time_limit: None,
            attempt_limit: None,
            allow_late_submission: false,
            shuffle_questions: false,
            shuffle_options: false,
            total_marks: 0.0,
            created_by: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_true_false_grading() {
        let q = question(
            QuestionType::TrueFalse,
            1.0,
            Some(CorrectAnswer::Boolean(true)),
        );
        assert_eq!(q.check_answer(Some(&AnswerValue::Boolean(true))), Some(1.0));
        assert_eq!(q.check_answer(Some(&AnswerValue::Boolean(false))), Some(0.0));
        // 未作答计 0 分
        assert_eq!(q.check_answer(None), Some(0.0));
    }

    #[test]
    fn test_mcq_single_grading() {
        let q = question(
            QuestionType::McqSingle,
            2.0,
            Some(CorrectAnswer::Options(vec![7])),
        );
        assert_eq!(
            q.check_answer(Some(&AnswerValue::Options(vec![7]))),
            Some(2.0)
        );
        assert_eq!(
            q.check_answer(Some(&AnswerValue::Options(vec![8]))),
            Some(0.0)
        );
        // 单选题多选不得分
        assert_eq!(
            q.check_answer(Some(&AnswerValue::Options(vec![7, 8]))),
            Some(0.0)
        );
    }

    #[test]
    fn test_mcq_multiple_exact_set_scores_full_marks() {
        let q = question(
            QuestionType::McqMultiple,
            3.0,
            Some(CorrectAnswer::Options(vec![1, 2, 3])),
        );
        assert_eq!(
            q.check_answer(Some(&AnswerValue::Options(vec![3, 1, 2]))),
            Some(3.0)
        );
    }

    #[test]
    fn test_mcq_multiple_complement_scores_zero() {
        let q = question(
            QuestionType::McqMultiple,
            3.0,
            Some(CorrectAnswer::Options(vec![1, 2, 3])),
        );
        assert_eq!(
            q.check_answer(Some(&AnswerValue::Options(vec![4, 5, 6]))),
            Some(0.0)
        );
    }

    #[test]
    fn test_mcq_multiple_partial_credit_cancels_out() {
        // k=2，一对一错恰好抵消
        let q = question(
            QuestionType::McqMultiple,
            2.0,
            Some(CorrectAnswer::Options(vec![1, 2])),
        );
        assert_eq!(
            q.check_answer(Some(&AnswerValue::Options(vec![1, 9]))),
            Some(0.0)
        );
    }

    #[test]
    fn test_mcq_multiple_partial_credit_fraction() {
        // k=3，两对零错 → 2/3 分值
        let q = question(
            QuestionType::McqMultiple,
            3.0,
            Some(CorrectAnswer::Options(vec![1, 2, 3])),
        );
        assert_eq!(
            q.check_answer(Some(&AnswerValue::Options(vec![1, 2]))),
            Some(2.0)
        );
    }

    #[test]
    fn test_mcq_multiple_duplicate_selection_is_deduplicated() {
        let q = question(
            QuestionType::McqMultiple,
            2.0,
            Some(CorrectAnswer::Options(vec![1, 2])),
        );
        assert_eq!(
            q.check_answer(Some(&AnswerValue::Options(vec![1, 1]))),
            Some(1.0)
        );
    }

    #[test]
    fn test_mcq_multiple_empty_key_requires_manual_grading() {
        let q = question(
            QuestionType::McqMultiple,
            2.0,
            Some(CorrectAnswer::Options(vec![])),
        );
        assert_eq!(q.check_answer(Some(&AnswerValue::Options(vec![1]))), None);
    }

    #[test]
    fn test_text_questions_require_manual_grading() {
        let q = question(QuestionType::ShortAnswer, 5.0, None);
        assert_eq!(
            q.check_answer(Some(&AnswerValue::Text("essay".to_string()))),
            None
        );
        let q = question(QuestionType::FileUpload, 5.0, None);
        assert_eq!(q.check_answer(None), None);
    }

    #[test]
    fn test_draft_assignment_never_available() {
        let a = assignment(AssignmentStatus::Draft);
        assert!(!a.is_available(Utc::now()));
        let a = assignment(AssignmentStatus::Locked);
        assert!(!a.is_available(Utc::now()));
    }

    #[test]
    fn test_published_availability_respects_start_date() {
        let now = Utc::now();
        let mut a = assignment(AssignmentStatus::Published);
        assert!(a.is_available(now));

        a.start_date = Some(now + Duration::hours(1));
        assert!(!a.is_available(now));

        a.start_date = Some(now - Duration::hours(1));
        assert!(a.is_available(now));
    }

    #[test]
    fn test_overdue_and_late_submission() {
        let now = Utc::now();
        let mut a = assignment(AssignmentStatus::Published);
        assert!(!a.is_overdue(now));

        a.due_date = Some(now - Duration::minutes(5));
        assert!(a.is_overdue(now));
        assert!(!a.can_submit_late(now));

        a.allow_late_submission = true;
        assert!(a.can_submit_late(now));

        a.due_date = Some(now + Duration::minutes(5));
        assert!(!a.is_overdue(now));
        assert!(!a.can_submit_late(now));
    }

    #[test]
    fn test_attempt_limit() {
        let mut a = assignment(AssignmentStatus::Published);
        assert!(a.can_attempt(100));

        a.attempt_limit = Some(1);
        assert!(a.can_attempt(0));
        assert!(!a.can_attempt(1));
        assert!(!a.can_attempt(2));
    }

    #[test]
    fn test_answer_value_coercion_by_type() {
        use serde_json::json;

        assert_eq!(
            AnswerValue::from_submitted(QuestionType::McqSingle, &json!(5)),
            Some(AnswerValue::Options(vec![5]))
        );
        assert_eq!(
            AnswerValue::from_submitted(QuestionType::McqMultiple, &json!([1, 2])),
            Some(AnswerValue::Options(vec![1, 2]))
        );
        assert_eq!(
            AnswerValue::from_submitted(QuestionType::TrueFalse, &json!(true)),
            Some(AnswerValue::Boolean(true))
        );
        assert_eq!(
            AnswerValue::from_submitted(QuestionType::ShortAnswer, &json!("text")),
            Some(AnswerValue::Text("text".to_string()))
        );
        assert_eq!(
            AnswerValue::from_submitted(
                QuestionType::FileUpload,
                &json!({"url": "/uploads/x.pdf", "name": "x.pdf", "size": 12})
            ),
            Some(AnswerValue::File {
                url: "/uploads/x.pdf".to_string(),
                name: "x.pdf".to_string(),
                size: 12
            })
        );
        // 形状不符视为未作答
        assert_eq!(
            AnswerValue::from_submitted(QuestionType::TrueFalse, &json!("yes")),
            None
        );
        assert_eq!(
            AnswerValue::from_submitted(QuestionType::McqSingle, &serde_json::Value::Null),
            None
        );
    }

    #[test]
    fn test_correct_answer_from_json() {
        assert_eq!(
            CorrectAnswer::from_json("[1,2,3]"),
            Some(CorrectAnswer::Options(vec![1, 2, 3]))
        );
        assert_eq!(
            CorrectAnswer::from_json("true"),
            Some(CorrectAnswer::Boolean(true))
        );
        assert_eq!(
            CorrectAnswer::from_json("7"),
            Some(CorrectAnswer::Options(vec![7]))
        );
        assert_eq!(CorrectAnswer::from_json("\"oops\""), None);
        assert_eq!(CorrectAnswer::from_json("not json"), None);
    }

    #[test]
    fn test_physics_quiz_scenario() {
        // 一道单选（Newton 正确）+ 一道判断（true 正确），各 1 分
        let newton = 11;
        let joule = 12;
        let q1 = question(
            QuestionType::McqSingle,
            1.0,
            Some(CorrectAnswer::Options(vec![newton])),
        );
        let q2 = question(
            QuestionType::TrueFalse,
            1.0,
            Some(CorrectAnswer::Boolean(true)),
        );

        // 全对
        let s1 = q1
            .check_answer(Some(&AnswerValue::Options(vec![newton])))
            .unwrap();
        let s2 = q2.check_answer(Some(&AnswerValue::Boolean(true))).unwrap();
        let total = s1 + s2;
        let max = q1.marks + q2.marks;
        assert_eq!(total, 2.0);
        assert_eq!(max, 2.0);
        assert_eq!(total / max * 100.0, 100.0);

        // 全错
        let s1 = q1
            .check_answer(Some(&AnswerValue::Options(vec![joule])))
            .unwrap();
        let s2 = q2.check_answer(Some(&AnswerValue::Boolean(false))).unwrap();
        assert_eq!(s1 + s2, 0.0);
    }
}
