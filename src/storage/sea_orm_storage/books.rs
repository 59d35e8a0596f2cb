//! 图书存储操作

use super::SeaOrmStorage;
use crate::entity::books::{ActiveModel, Column, Entity as Books};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginationInfo,
    books::{
        entities::Book,
        requests::{BookListQuery, CreateBookRequest, UpdateBookRequest},
        responses::BookListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建图书
    pub async fn create_book_impl(&self, req: CreateBookRequest) -> Result<Book> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            author: Set(req.author),
            description: Set(req.description),
            category: Set(req.category),
            file_url: Set(req.file_url),
            external_link: Set(req.external_link),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建图书失败: {e}")))?;

        Ok(result.into_book())
    }

    /// 通过 ID 获取图书
    pub async fn get_book_by_id_impl(&self, book_id: i64) -> Result<Option<Book>> {
        let result = Books::find_by_id(book_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询图书失败: {e}")))?;

        Ok(result.map(|m| m.into_book()))
    }

    /// 分页列出图书
    pub async fn list_books_with_pagination_impl(
        &self,
        query: BookListQuery,
    ) -> Result<BookListResponse> {
        let page = query.page.max(1) as u64;
        let size = query.size.clamp(1, 100) as u64;

        let mut select = Books::find();

        // 搜索条件（按标题、作者或描述）
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Author.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }

        // 分类筛选
        if let Some(ref category) = query.category
            && !category.trim().is_empty()
        {
            let escaped = escape_like_pattern(category.trim());
            select = select.filter(Column::Category.contains(&escaped));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询图书总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询图书页数失败: {e}")))?;

        let items: Vec<Book> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询图书列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_book())
            .collect();

        Ok(BookListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新图书
    pub async fn update_book_impl(
        &self,
        book_id: i64,
        update: UpdateBookRequest,
    ) -> Result<Option<Book>> {
        let existing = self.get_book_by_id_impl(book_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(book_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(author) = update.author {
            model.author = Set(Some(author));
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }

        if let Some(file_url) = update.file_url {
            model.file_url = Set(Some(file_url));
        }

        if let Some(external_link) = update.external_link {
            model.external_link = Set(Some(external_link));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新图书失败: {e}")))?;

        self.get_book_by_id_impl(book_id).await
    }

    /// 删除图书
    pub async fn delete_book_impl(&self, book_id: i64) -> Result<bool> {
        let result = Books::delete_by_id(book_id)
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除图书失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
