use serde::{Deserialize, Serialize};

use crate::models::assignments::entities::AnswerValue;

// 提交状态机：in_progress -> {submitted, late} -> graded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    InProgress,
    Submitted,
    Graded,
    Late,
}

impl SubmissionStatus {
    /// 已定稿的提交（可作为"成绩"查询）
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Submitted | SubmissionStatus::Graded | SubmissionStatus::Late
        )
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::InProgress => write!(f, "in_progress"),
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Graded => write!(f, "graded"),
            SubmissionStatus::Late => write!(f, "late"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(SubmissionStatus::InProgress),
            "submitted" => Ok(SubmissionStatus::Submitted),
            "graded" => Ok(SubmissionStatus::Graded),
            "late" => Ok(SubmissionStatus::Late),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

/// 一次提交（学生对某作业的一次尝试）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub attempt_number: i32,
    pub status: SubmissionStatus,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub total_score: Option<f64>,
    pub max_score: Option<f64>,
    pub percentage: Option<f64>,
    // 分钟
    pub time_taken: Option<i32>,
    pub feedback: Option<String>,
    pub graded_by: Option<i64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    pub fn calculate_percentage(&self) -> Option<f64> {
        match (self.total_score, self.max_score) {
            (Some(total), Some(max)) if max > 0.0 => Some(total / max * 100.0),
            _ => None,
        }
    }
}

/// 一条答案（一次提交内对一道题的作答）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub submission_id: i64,
    pub question_id: i64,
    pub value: Option<AnswerValue>,
    pub score: Option<f64>,
    pub max_score: f64,
    pub feedback: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn submission(total: Option<f64>, max: Option<f64>) -> Submission {
        Submission {
            id: 1,
            assignment_id: 1,
            student_id: 1,
            attempt_number: 1,
            status: SubmissionStatus::Submitted,
            submitted_at: None,
            total_score: total,
            max_score: max,
            percentage: None,
            time_taken: None,
            feedback: None,
            graded_by: None,
            graded_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_calculate_percentage() {
        assert_eq!(
            submission(Some(3.0), Some(4.0)).calculate_percentage(),
            Some(75.0)
        );
        assert_eq!(
            submission(Some(2.0), Some(2.0)).calculate_percentage(),
            Some(100.0)
        );
        // max_score 为 0 或缺失时不计算百分比
        assert_eq!(submission(Some(1.0), Some(0.0)).calculate_percentage(), None);
        assert_eq!(submission(None, Some(4.0)).calculate_percentage(), None);
    }

    #[test]
    fn test_final_statuses() {
        assert!(!SubmissionStatus::InProgress.is_final());
        assert!(SubmissionStatus::Submitted.is_final());
        assert!(SubmissionStatus::Graded.is_final());
        assert!(SubmissionStatus::Late.is_final());
    }
}
