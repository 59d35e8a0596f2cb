use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, check_recipient_access};
use crate::models::submissions::responses::{
    AnswerResultItem, AssignmentBrief, SubmissionResultResponse, SubmissionView,
};
use crate::models::{ApiResponse, ErrorCode};

/// 学生查询作业成绩
///
/// 只有已定稿的提交（submitted/graded/late）算作成绩，in_progress 不可见。
pub async fn get_assignment_result(
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

    let submission = match storage
        .latest_final_submission(assignment_id, student_id)
        .await
    {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "尚无已提交的记录",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询成绩失败: {e}"),
                )),
            );
        }
    };

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

    let answers = match storage.get_submission_answers(submission.id).await {
        Ok(answers) => answers,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询答案失败: {e}"),
                )),
            );
        }
    };

    // 题目信息用于标注每条答案
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
    let question_map: HashMap<i64, _> = questions.iter().map(|q| (q.id, q)).collect();

    let answer_items = answers
        .into_iter()
        .map(|answer| {
            let question = question_map.get(&answer.question_id);
            AnswerResultItem {
                question_id: answer.question_id,
                question_title: question
                    .map(|q| q.title.clone())
                    .unwrap_or_else(|| "（题目已删除）".to_string()),
                question_type: question
                    .map(|q| q.question_type.to_string())
                    .unwrap_or_default(),
                answer: answer.value,
                score: answer.score,
                max_score: answer.max_score,
                feedback: answer.feedback,
            }
        })
        .collect();

    let response = SubmissionResultResponse {
        submission: SubmissionView::from(&submission),
        assignment: AssignmentBrief {
            id: assignment.id,
            title: assignment.title,
            total_marks: assignment.total_marks,
        },
        answers: answer_items,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
