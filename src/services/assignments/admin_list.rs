use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::requests::{AssignmentListParams, AssignmentListQuery};
use crate::models::{ApiResponse, ErrorCode};

/// 管理端作业列表
pub async fn list_assignments_admin(
    service: &AssignmentService,
    request: &HttpRequest,
    params: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let query = AssignmentListQuery {
        page: params.pagination.page,
        size: params.pagination.size,
        search: params.search,
        status: params.status,
    };

    match storage.list_assignments_admin(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询作业列表失败: {e}"),
            )),
        ),
    }
}
