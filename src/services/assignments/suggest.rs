use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rand::prelude::IndexedRandom;

use super::AssignmentService;
use crate::models::assignments::requests::SuggestRequest;
use crate::models::assignments::responses::SuggestionResponse;
use crate::models::{ApiResponse, ErrorCode};

// 固定建议池。建议路径从不失败，不会阻塞提交流程。
const SUGGESTIONS: &[&str] = &[
    "Consider providing more specific examples to support your answer.",
    "Your answer could benefit from additional details about the key concepts.",
    "Try to connect your response to real-world applications.",
    "Consider revising for clarity and conciseness.",
];

/// 为学生的文字答案给出改进建议
pub async fn suggest_improvement(
    _service: &AssignmentService,
    _request: &HttpRequest,
    _assignment_id: i64,
    req: SuggestRequest,
) -> ActixResult<HttpResponse> {
    if req.question_id <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "question_id is required",
        )));
    }

    let suggestion = SUGGESTIONS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(SUGGESTIONS[0])
        .to_string();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SuggestionResponse { suggestion },
        "查询成功",
    )))
}
