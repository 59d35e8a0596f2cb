use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::{Assignment, AssignmentRecipient, Question},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::{AdminAssignmentListResponse, AssignmentStatsResponse},
    },
    books::{
        entities::Book,
        requests::{BookListQuery, CreateBookRequest, UpdateBookRequest},
        responses::BookListResponse,
    },
    submissions::{
        entities::{Answer, Submission},
        requests::FinalizeSubmissionRequest,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, StudentListQuery, UpdateUserRequest},
        responses::StudentListResponse,
    },
    videos::{
        entities::Video,
        requests::{CreateVideoRequest, UpdateVideoRequest, VideoListQuery},
        responses::VideoListResponse,
    },
};

use crate::errors::Result;
use crate::models::assignments::entities::AnswerValue;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 分页列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 列出学生（不分页，用于助手）
    async fn list_students(&self, limit: u64) -> Result<Vec<User>>;
    // 统计全部用户数
    async fn count_users(&self) -> Result<i64>;
    // 统计学生数
    async fn count_students(&self) -> Result<i64>;
    // 统计活跃学生数
    async fn count_active_students(&self) -> Result<i64>;
    // 统计某时间之后注册的学生数
    async fn count_students_since(&self, since: chrono::DateTime<chrono::Utc>) -> Result<i64>;

    /// 视频管理方法
    async fn create_video(&self, video: CreateVideoRequest) -> Result<Video>;
    async fn get_video_by_id(&self, video_id: i64) -> Result<Option<Video>>;
    async fn list_videos_with_pagination(&self, query: VideoListQuery)
    -> Result<VideoListResponse>;
    async fn list_recent_videos(&self, limit: u64) -> Result<Vec<Video>>;
    async fn update_video(
        &self,
        video_id: i64,
        update: UpdateVideoRequest,
    ) -> Result<Option<Video>>;
    async fn delete_video(&self, video_id: i64) -> Result<bool>;
    async fn count_videos(&self) -> Result<i64>;

    /// 图书管理方法
    async fn create_book(&self, book: CreateBookRequest) -> Result<Book>;
    async fn get_book_by_id(&self, book_id: i64) -> Result<Option<Book>>;
    async fn list_books_with_pagination(&self, query: BookListQuery) -> Result<BookListResponse>;
    async fn update_book(&self, book_id: i64, update: UpdateBookRequest) -> Result<Option<Book>>;
    async fn delete_book(&self, book_id: i64) -> Result<bool>;

    /// 作业管理方法
    // 创建完整作业图（作业 + 题目 + 选项 + 接收人）
    async fn create_assignment_graph(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 获取作业的全部题目（按 order_index，选项已填充）
    async fn get_assignment_questions(&self, assignment_id: i64) -> Result<Vec<Question>>;
    // 获取作业的接收人列表
    async fn get_assignment_recipients(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentRecipient>>;
    // 更新作业（提供 questions/recipients 时整体替换子图）
    async fn update_assignment_graph(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业（级联删除题目/选项/提交/答案/接收人）
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;
    // 管理端分页列出作业
    async fn list_assignments_admin(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AdminAssignmentListResponse>;
    // 管理端作业统计
    async fn assignment_stats(&self) -> Result<AssignmentStatsResponse>;
    // 接收人解析：学生是否可见该作业
    async fn is_assignment_recipient(&self, assignment_id: i64, student_id: i64) -> Result<bool>;
    // 学生可见的已发布作业
    async fn list_assignments_for_student(&self, student_id: i64) -> Result<Vec<Assignment>>;

    /// 提交管理方法
    // 某学生对某作业的全部提交（尝试号倒序）
    async fn list_submissions(&self, assignment_id: i64, student_id: i64)
    -> Result<Vec<Submission>>;
    // 尝试次数
    async fn count_submissions(&self, assignment_id: i64, student_id: i64) -> Result<i64>;
    // 某作业的全部提交数（管理端）
    async fn count_submissions_for_assignment(&self, assignment_id: i64) -> Result<i64>;
    // 查找未完成的提交
    async fn find_in_progress_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 新建 in_progress 提交（尝试号唯一约束仲裁并发）
    async fn create_in_progress_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        attempt_number: i32,
    ) -> Result<Submission>;
    // 自动保存：按 (submission_id, question_id) upsert 一条答案
    async fn upsert_answer(
        &self,
        submission_id: i64,
        question_id: i64,
        value: Option<AnswerValue>,
        max_score: f64,
    ) -> Result<()>;
    // 某次提交的全部答案
    async fn get_submission_answers(&self, submission_id: i64) -> Result<Vec<Answer>>;
    // 最近一次已定稿的提交（submitted/graded/late）
    async fn latest_final_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 定稿提交：提交行 + 全部答案 + 总分在一个事务内写入
    async fn finalize_submission(&self, req: FinalizeSubmissionRequest) -> Result<Submission>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
