//! 规则式聊天助手
//!
//! 按关键词把问题归类为意图，再用存储层的计数/列表拼出回答。
//! 没有任何规则命中时退回为数据概览，因此这条路径从不失败。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::ChatService;
use crate::middlewares::RequireJWT;
use crate::models::chat::{requests::ChatQueryRequest, responses::ChatAnswer};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 意图
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Intent {
    Profile,
    StudentCount,
    StudentList,
    Videos,
    Stats,
    Fallback,
}

/// 关键词匹配
///
/// 规则顺序即优先级：具体的在前，宽泛的在后。
pub(crate) fn match_intent(question: &str) -> Intent {
    let q = question.to_lowercase();

    if q.contains("profile") || q.contains("my profile") || q.contains("account") {
        return Intent::Profile;
    }
    if q.contains("how many students") || q.contains("students count") || q.trim() == "students" {
        return Intent::StudentCount;
    }
    if q.contains("list students") || (q.contains("students") && q.contains("list")) {
        return Intent::StudentList;
    }
    if q.contains("video") || q.contains("videos") || q.contains("recent videos") {
        return Intent::Videos;
    }
    if q.contains("dashboard") || q.contains("stats") || q.contains("how many") {
        return Intent::Stats;
    }

    Intent::Fallback
}

async fn answer_intent(
    storage: &Arc<dyn Storage>,
    user: &User,
    intent: Intent,
) -> crate::errors::Result<ChatAnswer> {
    let mut sources = Vec::new();

    let answer = match intent {
        Intent::Profile => {
            sources.push("/api/v1/student/profile".to_string());
            format!(
                "Name: {}\nEmail: {}\nRole: {}",
                user.name, user.email, user.role
            )
        }
        Intent::StudentCount => {
            let total = storage.count_students().await?;
            sources.push("/api/v1/admin/students".to_string());
            format!("There are {total} students registered.")
        }
        Intent::StudentList => {
            // 学生名单只有管理员能看
            if user.role != UserRole::Admin {
                return Ok(ChatAnswer {
                    answer: "You need admin access to list students.".to_string(),
                    sources,
                });
            }
            let students = storage.list_students(50).await?;
            sources.push("/api/v1/admin/students".to_string());
            let list: Vec<String> = students
                .iter()
                .take(20)
                .map(|s| {
                    let suffix = if s.is_active { "" } else { " (inactive)" };
                    format!("{} <{}>{}", s.name, s.email, suffix)
                })
                .collect();
            format!("Students:\n{}", list.join("\n"))
        }
        Intent::Videos => {
            let videos = storage.list_recent_videos(10).await?;
            sources.push("/api/v1/student/videos".to_string());
            let list: Vec<String> = videos.iter().map(|v| format!("- {}", v.title)).collect();
            format!("Recent videos:\n{}", list.join("\n"))
        }
        Intent::Stats => {
            let total_students = storage.count_students().await?;
            let active_students = storage.count_active_students().await?;
            let total_videos = storage.count_videos().await?;
            sources.push("/api/v1/admin/dashboard".to_string());
            format!(
                "Students: {total_students} (active: {active_students}). Videos: {total_videos}."
            )
        }
        Intent::Fallback => {
            let total = storage.count_students().await?;
            let videos_count = storage.count_videos().await?;
            sources.push("/api/v1".to_string());
            format!(
                "I can report {total} students and {videos_count} videos. Ask something \
                 specific like \"my profile\", \"recent videos\", or \"students\" (admin)."
            )
        }
    };

    Ok(ChatAnswer { answer, sources })
}

/// POST /chat/query
pub async fn handle_query(
    service: &ChatService,
    request: &HttpRequest,
    req: ChatQueryRequest,
) -> ActixResult<HttpResponse> {
    if req.question.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "Question is required",
        )));
    }

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let storage = service.get_storage(request);
    let intent = match_intent(&req.question);

    match answer_intent(&storage, &user, intent).await {
        Ok(answer) => Ok(HttpResponse::Ok().json(ApiResponse::success(answer, "查询成功"))),
        Err(e) => {
            // 数据查询失败时降级为通用回答，助手不向调用方抛错
            tracing::warn!("Chat data lookup failed: {}", e);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ChatAnswer {
                    answer: "Sorry, I could not process that request.".to_string(),
                    sources: vec![],
                },
                "查询成功",
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_intent() {
        assert_eq!(match_intent("show my profile"), Intent::Profile);
        assert_eq!(match_intent("my account"), Intent::Profile);
    }

    #[test]
    fn test_student_intents() {
        assert_eq!(match_intent("how many students are there"), Intent::StudentCount);
        assert_eq!(match_intent("students"), Intent::StudentCount);
        assert_eq!(match_intent("list students please"), Intent::StudentList);
    }

    #[test]
    fn test_video_intent() {
        assert_eq!(match_intent("recent videos"), Intent::Videos);
        assert_eq!(match_intent("any new video?"), Intent::Videos);
    }

    #[test]
    fn test_stats_and_fallback() {
        assert_eq!(match_intent("show dashboard stats"), Intent::Stats);
        assert_eq!(match_intent("how many books"), Intent::Stats);
        assert_eq!(match_intent("tell me a joke"), Intent::Fallback);
    }
}
