//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod books;
mod submissions;
mod users;
mod videos;

use crate::config::AppConfig;
use crate::errors::{AcademyError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AcademyError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AcademyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AcademyError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AcademyError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AcademyError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{
        entities::{AnswerValue, Assignment, AssignmentRecipient, Question},
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_students(&self, limit: u64) -> Result<Vec<User>> {
        self.list_students_impl(limit).await
    }

    async fn count_users(&self) -> Result<i64> {
        self.count_users_impl().await
    }

    async fn count_students(&self) -> Result<i64> {
        self.count_students_impl().await
    }

    async fn count_active_students(&self) -> Result<i64> {
        self.count_active_students_impl().await
    }

    async fn count_students_since(&self, since: chrono::DateTime<chrono::Utc>) -> Result<i64> {
        self.count_students_since_impl(since).await
    }

    // 视频模块
    async fn create_video(&self, video: CreateVideoRequest) -> Result<Video> {
        self.create_video_impl(video).await
    }

    async fn get_video_by_id(&self, video_id: i64) -> Result<Option<Video>> {
        self.get_video_by_id_impl(video_id).await
    }

    async fn list_videos_with_pagination(
        &self,
        query: VideoListQuery,
    ) -> Result<VideoListResponse> {
        self.list_videos_with_pagination_impl(query).await
    }

    async fn list_recent_videos(&self, limit: u64) -> Result<Vec<Video>> {
        self.list_recent_videos_impl(limit).await
    }

    async fn update_video(
        &self,
        video_id: i64,
        update: UpdateVideoRequest,
    ) -> Result<Option<Video>> {
        self.update_video_impl(video_id, update).await
    }

    async fn delete_video(&self, video_id: i64) -> Result<bool> {
        self.delete_video_impl(video_id).await
    }

    async fn count_videos(&self) -> Result<i64> {
        self.count_videos_impl().await
    }

    // 图书模块
    async fn create_book(&self, book: CreateBookRequest) -> Result<Book> {
        self.create_book_impl(book).await
    }

    async fn get_book_by_id(&self, book_id: i64) -> Result<Option<Book>> {
        self.get_book_by_id_impl(book_id).await
    }

    async fn list_books_with_pagination(&self, query: BookListQuery) -> Result<BookListResponse> {
        self.list_books_with_pagination_impl(query).await
    }

    async fn update_book(&self, book_id: i64, update: UpdateBookRequest) -> Result<Option<Book>> {
        self.update_book_impl(book_id, update).await
    }

    async fn delete_book(&self, book_id: i64) -> Result<bool> {
        self.delete_book_impl(book_id).await
    }

    // 作业模块
    async fn create_assignment_graph(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_graph_impl(created_by, req).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn get_assignment_questions(&self, assignment_id: i64) -> Result<Vec<Question>> {
        self.get_assignment_questions_impl(assignment_id).await
    }

    async fn get_assignment_recipients(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentRecipient>> {
        self.get_assignment_recipients_impl(assignment_id).await
    }

    async fn update_assignment_graph(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_graph_impl(assignment_id, update)
            .await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    async fn list_assignments_admin(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AdminAssignmentListResponse> {
        self.list_assignments_admin_impl(query).await
    }

    async fn assignment_stats(&self) -> Result<AssignmentStatsResponse> {
        self.assignment_stats_impl().await
    }

    async fn is_assignment_recipient(&self, assignment_id: i64, student_id: i64) -> Result<bool> {
        self.is_assignment_recipient_impl(assignment_id, student_id)
            .await
    }

    async fn list_assignments_for_student(&self, student_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_for_student_impl(student_id).await
    }

    // 提交模块
    async fn list_submissions(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        self.list_submissions_impl(assignment_id, student_id).await
    }

    async fn count_submissions(&self, assignment_id: i64, student_id: i64) -> Result<i64> {
        self.count_submissions_impl(assignment_id, student_id).await
    }

    async fn count_submissions_for_assignment(&self, assignment_id: i64) -> Result<i64> {
        self.count_submissions_for_assignment_impl(assignment_id)
            .await
    }

    async fn find_in_progress_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.find_in_progress_submission_impl(assignment_id, student_id)
            .await
    }

    async fn create_in_progress_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        attempt_number: i32,
    ) -> Result<Submission> {
        self.create_in_progress_submission_impl(assignment_id, student_id, attempt_number)
            .await
    }

    async fn upsert_answer(
        &self,
        submission_id: i64,
        question_id: i64,
        value: Option<AnswerValue>,
        max_score: f64,
    ) -> Result<()> {
        self.upsert_answer_impl(submission_id, question_id, value, max_score)
            .await
    }

    async fn get_submission_answers(&self, submission_id: i64) -> Result<Vec<Answer>> {
        self.get_submission_answers_impl(submission_id).await
    }

    async fn latest_final_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.latest_final_submission_impl(assignment_id, student_id)
            .await
    }

    async fn finalize_submission(&self, req: FinalizeSubmissionRequest) -> Result<Submission> {
        self.finalize_submission_impl(req).await
    }
}
