//! 作业存储操作
//!
//! 作业图（作业 + 题目 + 选项 + 接收人）的写入在单个事务内完成。
//! 客户端提交的选项临时 ID（如 "o1"）在选项落库后映射为存储 ID。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignment_recipients::{
    ActiveModel as RecipientActiveModel, Column as RecipientColumn, Entity as AssignmentRecipients,
};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments, Relation};
use crate::entity::question_options::{
    ActiveModel as OptionActiveModel, Column as OptionColumn, Entity as QuestionOptions,
};
use crate::entity::questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Questions,
};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{AcademyError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::{
            Assignment, AssignmentCategory, AssignmentRecipient, AssignmentStatus, Question,
            QuestionType, RecipientType,
        },
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, QuestionSpec, RecipientsSpec,
            UpdateAssignmentRequest,
        },
        responses::{
            AdminAssignmentListItem, AdminAssignmentListResponse, AssignmentStatsResponse,
        },
    },
    submissions::entities::SubmissionStatus,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建完整作业图
    pub async fn create_assignment_graph_impl(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            created_by: Set(created_by),
            title: Set(req.title),
            description: Set(req.description),
            category: Set(req
                .category
                .unwrap_or(AssignmentCategory::Assignment)
                .to_string()),
            status: Set(req.status.unwrap_or(AssignmentStatus::Draft).to_string()),
            start_date: Set(req.start_date.map(|dt| dt.timestamp())),
            due_date: Set(req.due_date.map(|dt| dt.timestamp())),
            time_limit: Set(req.time_limit),
            attempt_limit: Set(req.attempt_limit),
            allow_late_submission: Set(req.allow_late_submission.unwrap_or(false)),
            shuffle_questions: Set(req.shuffle_questions.unwrap_or(false)),
            shuffle_options: Set(req.shuffle_options.unwrap_or(false)),
            total_marks: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let assignment = model
            .insert(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建作业失败: {e}")))?;

        let mut total_marks = 0.0;
        if let Some(questions) = req.questions {
            total_marks = insert_questions_tx(&txn, assignment.id, questions).await?;
        }

        if let Some(recipients) = req.recipients {
            insert_recipients_tx(&txn, assignment.id, &recipients).await?;
        }

        // 回填总分
        let mut update = ActiveModel {
            id: Set(assignment.id),
            ..Default::default()
        };
        update.total_marks = Set(total_marks);
        update
            .update(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新作业总分失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_assignment_by_id_impl(assignment.id)
            .await?
            .ok_or_else(|| AcademyError::database_operation("作业创建后查询失败"))
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 获取作业的全部题目（按展示顺序，选项已填充）
    pub async fn get_assignment_questions_impl(&self, assignment_id: i64) -> Result<Vec<Question>> {
        let question_models = Questions::find()
            .filter(QuestionColumn::AssignmentId.eq(assignment_id))
            .order_by_asc(QuestionColumn::OrderIndex)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询题目失败: {e}")))?;

        let question_ids: Vec<i64> = question_models.iter().map(|q| q.id).collect();
        let mut questions: Vec<Question> = question_models
            .into_iter()
            .map(|m| m.into_question())
            .collect();

        if question_ids.is_empty() {
            return Ok(questions);
        }

        let option_models = QuestionOptions::find()
            .filter(OptionColumn::QuestionId.is_in(question_ids))
            .order_by_asc(OptionColumn::OrderIndex)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询选项失败: {e}")))?;

        let mut options_by_question: HashMap<i64, Vec<_>> = HashMap::new();
        for option in option_models {
            options_by_question
                .entry(option.question_id)
                .or_default()
                .push(option.into_option());
        }

        for question in &mut questions {
            if let Some(options) = options_by_question.remove(&question.id) {
                question.options = options;
            }
        }

        Ok(questions)
    }

    /// 获取作业的接收人列表
    pub async fn get_assignment_recipients_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentRecipient>> {
        let results = AssignmentRecipients::find()
            .filter(RecipientColumn::AssignmentId.eq(assignment_id))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询接收人失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_recipient()).collect())
    }

    /// 更新作业图
    pub async fn update_assignment_graph_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let existing = self.get_assignment_by_id_impl(assignment_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(category) = update.category {
            model.category = Set(category.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(Some(start_date.timestamp()));
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date.timestamp()));
        }
        if let Some(time_limit) = update.time_limit {
            model.time_limit = Set(Some(time_limit));
        }
        if let Some(attempt_limit) = update.attempt_limit {
            model.attempt_limit = Set(Some(attempt_limit));
        }
        if let Some(allow_late) = update.allow_late_submission {
            model.allow_late_submission = Set(allow_late);
        }
        if let Some(shuffle_questions) = update.shuffle_questions {
            model.shuffle_questions = Set(shuffle_questions);
        }
        if let Some(shuffle_options) = update.shuffle_options {
            model.shuffle_options = Set(shuffle_options);
        }

        // 题目整体替换：旧题目连同选项和历史答案级联删除
        if let Some(questions) = update.questions {
            Questions::delete_many()
                .filter(QuestionColumn::AssignmentId.eq(assignment_id))
                .exec(&txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("删除旧题目失败: {e}")))?;

            let total_marks = insert_questions_tx(&txn, assignment_id, questions).await?;
            model.total_marks = Set(total_marks);
        }

        model
            .update(&txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新作业失败: {e}")))?;

        // 接收人整体替换
        if let Some(recipients) = update.recipients {
            AssignmentRecipients::delete_many()
                .filter(RecipientColumn::AssignmentId.eq(assignment_id))
                .exec(&txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("删除旧接收人失败: {e}")))?;

            insert_recipients_tx(&txn, assignment_id, &recipients).await?;
        }

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 删除作业（外键级联清理题目/选项/提交/答案/接收人）
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 管理端分页列出作业
    pub async fn list_assignments_admin_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AdminAssignmentListResponse> {
        let page = query.page.max(1) as u64;
        let size = query.size.clamp(1, 100) as u64;

        let mut select = Assignments::find();

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

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业页数失败: {e}")))?;

        let assignments: Vec<Assignment> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询作业列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_assignment())
            .collect();

        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();

        // 批量统计题目数和提交数
        let mut question_counts: HashMap<i64, i64> = HashMap::new();
        let mut submission_counts: HashMap<i64, i64> = HashMap::new();
        if !assignment_ids.is_empty() {
            let question_models = Questions::find()
                .filter(QuestionColumn::AssignmentId.is_in(assignment_ids.clone()))
                .all(&self.db)
                .await
                .map_err(|e| AcademyError::database_operation(format!("查询题目失败: {e}")))?;
            for q in question_models {
                *question_counts.entry(q.assignment_id).or_default() += 1;
            }

            let submission_models = Submissions::find()
                .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids))
                .all(&self.db)
                .await
                .map_err(|e| AcademyError::database_operation(format!("查询提交失败: {e}")))?;
            for s in submission_models {
                *submission_counts.entry(s.assignment_id).or_default() += 1;
            }
        }

        let items = assignments
            .into_iter()
            .map(|assignment| {
                let question_count = question_counts.get(&assignment.id).copied().unwrap_or(0);
                let submission_count = submission_counts.get(&assignment.id).copied().unwrap_or(0);
                AdminAssignmentListItem {
                    assignment,
                    question_count,
                    submission_count,
                }
            })
            .collect();

        Ok(AdminAssignmentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 管理端作业统计
    pub async fn assignment_stats_impl(&self) -> Result<AssignmentStatsResponse> {
        let total_assignments = Assignments::find()
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计作业数失败: {e}")))?
            as i64;

        let published_assignments = Assignments::find()
            .filter(Column::Status.eq(AssignmentStatus::Published.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计已发布作业数失败: {e}")))?
            as i64;

        let draft_assignments = Assignments::find()
            .filter(Column::Status.eq(AssignmentStatus::Draft.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计草稿作业数失败: {e}")))?
            as i64;

        let total_submissions = Submissions::find()
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计提交数失败: {e}")))?
            as i64;

        let graded_submissions = Submissions::find()
            .filter(SubmissionColumn::Status.eq(SubmissionStatus::Graded.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计已评分提交数失败: {e}")))?
            as i64;

        Ok(AssignmentStatsResponse {
            total_assignments,
            published_assignments,
            draft_assignments,
            total_submissions,
            graded_submissions,
            pending_submissions: total_submissions - graded_submissions,
        })
    }

    /// 接收人解析：存在 all_students 记录，或 selected_students 且学生 ID 匹配
    pub async fn is_assignment_recipient_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<bool> {
        let count = AssignmentRecipients::find()
            .filter(RecipientColumn::AssignmentId.eq(assignment_id))
            .filter(
                Condition::any()
                    .add(RecipientColumn::RecipientType.eq(RecipientType::AllStudents.to_string()))
                    .add(
                        Condition::all()
                            .add(
                                RecipientColumn::RecipientType
                                    .eq(RecipientType::SelectedStudents.to_string()),
                            )
                            .add(RecipientColumn::StudentId.eq(student_id)),
                    ),
            )
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询接收人失败: {e}")))?;

        Ok(count > 0)
    }

    /// 学生可见的已发布作业（接收人匹配）
    pub async fn list_assignments_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        let results = Assignments::find()
            .filter(Column::Status.eq(AssignmentStatus::Published.to_string()))
            .join(JoinType::InnerJoin, Relation::Recipients.def())
            .filter(
                Condition::any()
                    .add(RecipientColumn::RecipientType.eq(RecipientType::AllStudents.to_string()))
                    .add(
                        Condition::all()
                            .add(
                                RecipientColumn::RecipientType
                                    .eq(RecipientType::SelectedStudents.to_string()),
                            )
                            .add(RecipientColumn::StudentId.eq(student_id)),
                    ),
            )
            .distinct()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学生作业失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }
}

/// 在事务内插入题目和选项，返回题目总分
///
/// correct_answer 中的客户端选项 ID 在选项落库后映射为存储 ID；
/// 选项的 is_correct 标记与映射后的答案键保持一致。
async fn insert_questions_tx(
    txn: &DatabaseTransaction,
    assignment_id: i64,
    questions: Vec<QuestionSpec>,
) -> Result<f64> {
    let mut total_marks = 0.0;

    for (index, spec) in questions.into_iter().enumerate() {
        let marks = spec.marks.unwrap_or(1.0).max(0.0);
        total_marks += marks;

        let question = QuestionActiveModel {
            assignment_id: Set(assignment_id),
            title: Set(spec.title),
            description: Set(spec.description),
            question_type: Set(spec.question_type.to_string()),
            marks: Set(marks),
            order_index: Set(index as i32),
            correct_answer: Set(None),
            allowed_file_types: Set(spec
                .allowed_file_types
                .as_ref()
                .and_then(|types| serde_json::to_string(types).ok())),
            max_file_size: Set(spec.max_file_size),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| AcademyError::database_operation(format!("创建题目失败: {e}")))?;

        // 客户端 correct_answer 里引用的选项 ID 集合
        let correct_client_ids: Vec<String> = match &spec.correct_answer {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
            _ => Vec::new(),
        };

        let mut correct_db_ids: Vec<i64> = Vec::new();
        if let Some(options) = spec.options {
            for (option_index, option) in options.into_iter().enumerate() {
                let client_id = option.id.clone();
                let is_correct = option.is_correct
                    || client_id
                        .as_ref()
                        .is_some_and(|cid| correct_client_ids.contains(cid));

                let created = OptionActiveModel {
                    question_id: Set(question.id),
                    text: Set(option.text),
                    order_index: Set(option_index as i32),
                    is_correct: Set(is_correct),
                    ..Default::default()
                }
                .insert(txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("创建选项失败: {e}")))?;

                if is_correct {
                    correct_db_ids.push(created.id);
                }
            }
        }

        // 回填映射后的标准答案
        let correct_answer_json = match spec.question_type {
            QuestionType::McqSingle | QuestionType::McqMultiple => {
                if correct_db_ids.is_empty() {
                    None
                } else {
                    serde_json::to_string(&correct_db_ids).ok()
                }
            }
            QuestionType::TrueFalse => spec
                .correct_answer
                .as_ref()
                .and_then(|v| v.as_bool())
                .and_then(|flag| serde_json::to_string(&flag).ok()),
            _ => None,
        };

        if correct_answer_json.is_some() {
            let mut update = QuestionActiveModel {
                id: Set(question.id),
                ..Default::default()
            };
            update.correct_answer = Set(correct_answer_json);
            update
                .update(txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("更新标准答案失败: {e}")))?;
        }
    }

    Ok(total_marks)
}

/// 在事务内插入接收人
async fn insert_recipients_tx(
    txn: &DatabaseTransaction,
    assignment_id: i64,
    recipients: &RecipientsSpec,
) -> Result<()> {
    match recipients.recipient_type {
        RecipientType::AllStudents => {
            RecipientActiveModel {
                assignment_id: Set(assignment_id),
                recipient_type: Set(RecipientType::AllStudents.to_string()),
                student_id: Set(None),
                ..Default::default()
            }
            .insert(txn)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建接收人失败: {e}")))?;
        }
        RecipientType::SelectedStudents => {
            for student_id in &recipients.student_ids {
                RecipientActiveModel {
                    assignment_id: Set(assignment_id),
                    recipient_type: Set(RecipientType::SelectedStudents.to_string()),
                    student_id: Set(Some(*student_id)),
                    ..Default::default()
                }
                .insert(txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("创建接收人失败: {e}")))?;
            }
        }
    }

    Ok(())
}
