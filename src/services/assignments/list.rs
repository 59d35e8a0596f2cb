use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::responses::{
    AssignmentCreator, StudentAssignmentListItem, StudentAssignmentListResponse,
    StudentAssignmentStatus, SubmissionSummary,
};
use crate::models::{ApiResponse, ErrorCode};

/// 学生作业列表
///
/// 只返回接收人匹配的已发布作业，并为每个作业附上完成状态和最近一次提交摘要。
pub async fn list_assignments_for_student(
    service: &AssignmentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let assignments = match storage.list_assignments_for_student(student_id).await {
        Ok(assignments) => assignments,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业列表失败: {e}"),
                )),
            );
        }
    };

    let mut items = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let submissions = match storage.list_submissions(assignment.id, student_id).await {
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

        let latest = submissions.first();
        let status = match latest {
            Some(submission) if submission.status.is_final() => {
                StudentAssignmentStatus::Submitted
            }
            Some(_) => StudentAssignmentStatus::InProgress,
            None => StudentAssignmentStatus::NotStarted,
        };

        let creator = match storage.get_user_by_id(assignment.created_by).await {
            Ok(Some(user)) => Some(AssignmentCreator {
                id: user.id,
                name: user.name,
                email: user.email,
            }),
            _ => None,
        };

        items.push(StudentAssignmentListItem {
            status,
            attempts_used: submissions.len() as i64,
            latest_submission: latest.map(|submission| SubmissionSummary {
                id: submission.id,
                status: submission.status,
                submitted_at: submission.submitted_at,
                total_score: submission.total_score,
                percentage: submission.percentage,
            }),
            creator,
            assignment,
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentAssignmentListResponse { items },
        "查询成功",
    )))
}
