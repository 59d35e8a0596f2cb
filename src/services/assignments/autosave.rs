use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, check_recipient_access};
use crate::errors::AcademyError;
use crate::models::assignments::entities::AnswerValue;
use crate::models::assignments::requests::AutoSaveRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 自动保存单题答案
///
/// 找不到未完成的提交时就地创建一个（受尝试次数限制）。
/// 草稿写入是尽力而为的，不走事务。
pub async fn auto_save_answer(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    student_id: i64,
    req: AutoSaveRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 接收人门禁
    if let Err(resp) = check_recipient_access(&storage, assignment_id, student_id).await {
        return Ok(resp);
    }

    // 找到或创建未完成的提交
    let submission = match storage
        .find_in_progress_submission(assignment_id, student_id)
        .await
    {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            let assignment = match storage.get_assignment_by_id(assignment_id).await {
                Ok(Some(assignment)) => assignment,
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::AssignmentNotFound,
                        "作业不存在",
                    )));
                }
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("查询作业失败: {e}"),
                        ),
                    ));
                }
            };

            if !assignment.is_available(chrono::Utc::now()) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentNotAvailable,
                    "作业当前不可作答",
                )));
            }

            let attempts_used = match storage.count_submissions(assignment_id, student_id).await {
                Ok(count) => count,
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("统计尝试次数失败: {e}"),
                        ),
                    ));
                }
            };

            if !assignment.can_attempt(attempts_used) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::AttemptLimitExceeded,
                    "已达到最大尝试次数",
                )));
            }

            match storage
                .create_in_progress_submission(assignment_id, student_id, attempts_used as i32 + 1)
                .await
            {
                Ok(submission) => submission,
                Err(AcademyError::Conflict(msg)) => {
                    return Ok(HttpResponse::Conflict()
                        .json(ApiResponse::error_empty(ErrorCode::SubmissionConflict, msg)));
                }
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("创建提交失败: {e}"),
                        ),
                    ));
                }
            }
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交记录失败: {e}"),
                )),
            );
        }
    };

    // 定位题目，按题型解释答案值
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

    let question = match questions.iter().find(|q| q.id == req.question_id) {
        Some(question) => question,
        None => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "题目不存在",
            )));
        }
    };

    let value = AnswerValue::from_submitted(question.question_type, &req.answer);

    match storage
        .upsert_answer(submission.id, question.id, value, question.marks)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("答案已保存"))),
        Err(e) => {
            tracing::warn!("Auto-save failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("保存答案失败: {e}"),
                )),
            )
        }
    }
}
