use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, check_recipient_access};
use crate::models::assignments::responses::{
    AssignmentCreator, LatestAnswer, StudentAssignmentDetail,
};
use crate::models::{ApiResponse, ErrorCode};

/// 学生作业详情
///
/// 门禁顺序：接收人检查 -> 可用性检查。题目序列化时不带标准答案。
pub async fn get_assignment_for_student(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 接收人门禁
    if let Err(resp) = check_recipient_access(&storage, assignment_id, student_id).await {
        return Ok(resp);
    }

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业失败: {e}"),
                )),
            );
        }
    };

    // 可用性门禁
    if !assignment.is_available(chrono::Utc::now()) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotAvailable,
            "作业尚未开放",
        )));
    }

    let questions = match storage.get_assignment_questions(assignment_id).await {
        Ok(questions) => questions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询题目失败: {e}"),
                )),
            );
        }
    };

    // 尝试记录
    let submissions = match storage.list_submissions(assignment_id, student_id).await {
        Ok(submissions) => submissions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交记录失败: {e}"),
                )),
            );
        }
    };

    let attempts_used = submissions.len() as i64;
    let can_attempt = assignment.can_attempt(attempts_used);

    // 最近一次提交的答案（自动保存回显）
    let mut latest_answers = Vec::new();
    if let Some(latest) = submissions.first() {
        match storage.get_submission_answers(latest.id).await {
            Ok(answers) => {
                latest_answers = answers
                    .into_iter()
                    .map(|answer| LatestAnswer {
                        question_id: answer.question_id,
                        answer: answer.value,
                        score: answer.score,
                        feedback: answer.feedback,
                    })
                    .collect();
            }
            Err(e) => {
                tracing::warn!("Failed to load latest answers: {}", e);
            }
        }
    }

    let creator = match storage.get_user_by_id(assignment.created_by).await {
        Ok(Some(user)) => Some(AssignmentCreator {
            id: user.id,
            name: user.name,
            email: user.email,
        }),
        _ => None,
    };

    let detail = StudentAssignmentDetail {
        max_attempts: assignment.attempt_limit,
        assignment,
        questions,
        creator,
        can_attempt,
        attempts_used,
        latest_answers,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "查询成功")))
}
