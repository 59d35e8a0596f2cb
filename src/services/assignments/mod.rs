pub mod admin_detail;
pub mod admin_list;
pub mod autosave;
pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod result;
pub mod stats;
pub mod submit;
pub mod suggest;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{
    AssignmentListParams, AutoSaveRequest, CreateAssignmentRequest, SubmitAssignmentRequest,
    SuggestRequest, UpdateAssignmentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学生端操作

    pub async fn list_for_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments_for_student(self, request, student_id).await
    }

    pub async fn detail_for_student(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment_for_student(self, request, assignment_id, student_id).await
    }

    pub async fn submit(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        student_id: i64,
        req: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, request, assignment_id, student_id, req).await
    }

    pub async fn auto_save(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        student_id: i64,
        req: AutoSaveRequest,
    ) -> ActixResult<HttpResponse> {
        autosave::auto_save_answer(self, request, assignment_id, student_id, req).await
    }

    pub async fn result(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        result::get_assignment_result(self, request, assignment_id, student_id).await
    }

    pub async fn suggest(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: SuggestRequest,
    ) -> ActixResult<HttpResponse> {
        suggest::suggest_improvement(self, request, assignment_id, req).await
    }

    // 管理端操作

    pub async fn admin_list(
        &self,
        request: &HttpRequest,
        params: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        admin_list::list_assignments_admin(self, request, params).await
    }

    pub async fn admin_detail(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        admin_detail::get_assignment_admin(self, request, assignment_id).await
    }

    pub async fn create(
        &self,
        request: &HttpRequest,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, created_by, req).await
    }

    pub async fn update(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, assignment_id, req).await
    }

    pub async fn delete(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }

    pub async fn stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::get_assignment_stats(self, request).await
    }
}

/// 接收人门禁：接收人检查先于可用性检查
///
/// 未通过一律返回 403，不区分"作业不存在"，避免泄露资源存在性。
pub(crate) async fn check_recipient_access(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
    student_id: i64,
) -> Result<(), HttpResponse> {
    match storage
        .is_assignment_recipient(assignment_id, student_id)
        .await
    {
        Ok(true) => Ok(()),
        Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AssignmentAccessDenied,
            "无权访问此作业",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("校验作业权限失败: {e}"),
            )),
        ),
    }
}
