//! 视频存储操作

use super::SeaOrmStorage;
use crate::entity::videos::{ActiveModel, Column, Entity as Videos};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginationInfo,
    videos::{
        entities::Video,
        requests::{CreateVideoRequest, UpdateVideoRequest, VideoListQuery},
        responses::VideoListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建视频
    pub async fn create_video_impl(&self, req: CreateVideoRequest) -> Result<Video> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            video_url: Set(req.video_url),
            thumbnail_url: Set(req.thumbnail_url),
            duration: Set(req.duration),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建视频失败: {e}")))?;

        Ok(result.into_video())
    }

    /// 通过 ID 获取视频
    pub async fn get_video_by_id_impl(&self, video_id: i64) -> Result<Option<Video>> {
        let result = Videos::find_by_id(video_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询视频失败: {e}")))?;

        Ok(result.map(|m| m.into_video()))
    }

    /// 分页列出视频
    pub async fn list_videos_with_pagination_impl(
        &self,
        query: VideoListQuery,
    ) -> Result<VideoListResponse> {
        let page = query.page.max(1) as u64;
        let size = query.size.clamp(1, 100) as u64;

        let mut select = Videos::find();

        // 搜索条件（按标题或描述）
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询视频总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询视频页数失败: {e}")))?;

        let items: Vec<Video> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询视频列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_video())
            .collect();

        Ok(VideoListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 最近的视频（限量）
    pub async fn list_recent_videos_impl(&self, limit: u64) -> Result<Vec<Video>> {
        let results = Videos::find()
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询视频列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_video()).collect())
    }

    /// 更新视频
    pub async fn update_video_impl(
        &self,
        video_id: i64,
        update: UpdateVideoRequest,
    ) -> Result<Option<Video>> {
        let existing = self.get_video_by_id_impl(video_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(video_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(video_url) = update.video_url {
            model.video_url = Set(video_url);
        }

        if let Some(thumbnail_url) = update.thumbnail_url {
            model.thumbnail_url = Set(Some(thumbnail_url));
        }

        if let Some(duration) = update.duration {
            model.duration = Set(Some(duration));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新视频失败: {e}")))?;

        self.get_video_by_id_impl(video_id).await
    }

    /// 删除视频
    pub async fn delete_video_impl(&self, video_id: i64) -> Result<bool> {
        let result = Videos::delete_by_id(video_id)
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除视频失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计视频数
    pub async fn count_videos_impl(&self) -> Result<i64> {
        let count = Videos::find()
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计视频数失败: {e}")))?;

        Ok(count as i64)
    }
}
