use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 创建作业（完整图）
pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    created_by: i64,
    req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "作业标题不能为空",
        )));
    }

    // MCQ 题必须带选项
    if let Some(questions) = &req.questions {
        for question in questions {
            let needs_options = matches!(
                question.question_type,
                crate::models::assignments::entities::QuestionType::McqSingle
                    | crate::models::assignments::entities::QuestionType::McqMultiple
            );
            if needs_options
                && question
                    .options
                    .as_ref()
                    .is_none_or(|options| options.is_empty())
            {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::InvalidParams,
                    format!("选择题 \"{}\" 缺少选项", question.title),
                )));
            }
        }
    }

    match storage.create_assignment_graph(created_by, req).await {
        Ok(assignment) => {
            tracing::info!(
                "Assignment {} created by user {}",
                assignment.id,
                created_by
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
        }
        Err(e) => {
            tracing::error!("Failed to create assignment: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建作业失败: {e}"),
                )),
            )
        }
    }
}
