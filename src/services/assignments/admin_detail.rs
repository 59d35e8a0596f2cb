use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::entities::{CorrectAnswer, Question, RecipientType};
use crate::models::assignments::responses::{
    AdminAssignmentDetail, AdminOptionView, AdminQuestionView, AdminRecipientView,
    AssignmentCreator,
};
use crate::models::{ApiResponse, ErrorCode};

/// 管理端作业详情
///
/// 标准答案里的存储 ID 映射回客户端形式（"o{id}"），方便前端编辑器回填。
pub async fn get_assignment_admin(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    let recipients = match storage.get_assignment_recipients(assignment_id).await {
        Ok(recipients) => recipients,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询接收人失败: {e}"),
                )),
            );
        }
    };

    // 接收人附带学生信息
    let mut recipient_views = Vec::with_capacity(recipients.len());
    for recipient in &recipients {
        let student = match (recipient.recipient_type, recipient.student_id) {
            (RecipientType::SelectedStudents, Some(student_id)) => {
                match storage.get_user_by_id(student_id).await {
                    Ok(Some(user)) => Some(AssignmentCreator {
                        id: user.id,
                        name: user.name,
                        email: user.email,
                    }),
                    _ => None,
                }
            }
            _ => None,
        };
        recipient_views.push(AdminRecipientView::from_recipient(recipient, student));
    }

    let submission_count = match storage
        .count_submissions_for_assignment(assignment_id)
        .await
    {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!("Failed to count submissions: {}", e);
            0
        }
    };

    let question_views = questions.iter().map(question_to_admin_view).collect();

    let detail = AdminAssignmentDetail {
        assignment,
        questions: question_views,
        recipients: recipient_views,
        submission_count,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "查询成功")))
}

/// 题目转管理端视图：标准答案映射为客户端选项 ID
fn question_to_admin_view(question: &Question) -> AdminQuestionView {
    let options: Vec<AdminOptionView> = question
        .options
        .iter()
        .map(|option| AdminOptionView {
            id: format!("o{}", option.id),
            db_id: option.id,
            text: option.text.clone(),
            order_index: option.order_index,
            is_correct: option.is_correct,
        })
        .collect();

    let correct_answer = match &question.correct_answer {
        Some(CorrectAnswer::Options(ids)) => Some(serde_json::Value::Array(
            ids.iter()
                .map(|id| serde_json::Value::String(format!("o{id}")))
                .collect(),
        )),
        Some(CorrectAnswer::Boolean(flag)) => Some(serde_json::Value::Bool(*flag)),
        None => None,
    };

    AdminQuestionView {
        id: question.id,
        title: question.title.clone(),
        description: question.description.clone(),
        question_type: question.question_type.to_string(),
        marks: question.marks,
        order_index: question.order_index,
        options,
        correct_answer,
        allowed_file_types: question.allowed_file_types.clone(),
        max_file_size: question.max_file_size,
    }
}
