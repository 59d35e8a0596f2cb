use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, check_recipient_access};
use crate::errors::AcademyError;
use crate::models::assignments::entities::AnswerValue;
use crate::models::assignments::requests::SubmitAssignmentRequest;
use crate::models::assignments::responses::SubmitResult;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::submissions::requests::{FinalizeSubmissionRequest, GradedAnswerWrite};
use crate::models::{ApiResponse, ErrorCode};

/// 提交作业并同步评分
///
/// 门禁顺序：接收人 -> 可用性 -> 迟交策略 -> 尝试次数。
/// 可自动评分的题目在这里逐题打分；全部答案与总分由存储层在一个
/// 事务内落库，任何失败都不会留下部分评分状态。
pub async fn submit_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    student_id: i64,
    req: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let now = chrono::Utc::now();

    // 1. 接收人门禁
    if let Err(resp) = check_recipient_access(&storage, assignment_id, student_id).await {
        return Ok(resp);
    }

    // 2. 可用性门禁
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

    if !assignment.is_available(now) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotAvailable,
            "作业当前不可提交",
        )));
    }

    // 3. 迟交策略
    let overdue = assignment.is_overdue(now);
    if overdue && !assignment.can_submit_late(now) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::DeadlinePassed,
            "作业已过截止时间",
        )));
    }

    // 4. 尝试次数门禁
    //
    // 存在未完成的提交时复用它的尝试槽位（自动保存已占用该次尝试），
    // 否则按已用次数开新尝试。
    let in_progress = match storage
        .find_in_progress_submission(assignment_id, student_id)
        .await
    {
        Ok(submission) => submission,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交记录失败: {e}"),
                )),
            );
        }
    };

    let attempts_used = match storage.count_submissions(assignment_id, student_id).await {
        Ok(count) => count,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("统计尝试次数失败: {e}"),
                )),
            );
        }
    };

    let (reuse_submission_id, attempt_number) = match &in_progress {
        Some(submission) => (Some(submission.id), submission.attempt_number),
        None => {
            if !assignment.can_attempt(attempts_used) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::AttemptLimitExceeded,
                    "已达到最大尝试次数",
                )));
            }
            (None, attempts_used as i32 + 1)
        }
    };

    // 5. 逐题评分
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

    let submitted = req.answers.unwrap_or_default();

    let mut total_score = 0.0;
    let mut max_score = 0.0;
    let mut answers = Vec::with_capacity(questions.len());

    for question in &questions {
        max_score += question.marks;

        let raw = submitted.get(&question.id.to_string());
        let value =
            raw.and_then(|raw| AnswerValue::from_submitted(question.question_type, raw));

        // None 分数 = 等待人工评分；自动评分题未作答计 0 分
        let score = question.check_answer(value.as_ref());
        if let Some(score) = score {
            total_score += score;
        }

        answers.push(GradedAnswerWrite {
            question_id: question.id,
            value,
            score,
            max_score: question.marks,
        });
    }

    let percentage = if max_score > 0.0 {
        total_score / max_score * 100.0
    } else {
        0.0
    };

    let status = if overdue {
        SubmissionStatus::Late
    } else {
        SubmissionStatus::Submitted
    };

    // 6. 原子落库
    let finalize = FinalizeSubmissionRequest {
        assignment_id,
        student_id,
        reuse_submission_id,
        attempt_number,
        status,
        time_taken: req.time_taken,
        total_score,
        max_score,
        percentage,
        answers,
    };

    match storage.finalize_submission(finalize).await {
        Ok(submission) => {
            tracing::info!(
                "Student {} submitted assignment {} (attempt {}, score {}/{})",
                student_id,
                assignment_id,
                submission.attempt_number,
                total_score,
                max_score
            );

            let result = SubmitResult {
                submission_id: submission.id,
                total_score,
                max_score,
                percentage,
                status: submission.status,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, "提交成功")))
        }
        // 并发提交竞争同一尝试槽位：唯一索引仲裁，落败方收到 409
        Err(AcademyError::Conflict(msg)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubmissionConflict,
                msg,
            )))
        }
        Err(e) => {
            tracing::error!("Failed to finalize submission: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "提交失败，已回滚",
                )),
            )
        }
    }
}
