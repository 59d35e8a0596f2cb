//! 提交与答案存储操作
//!
//! 定稿提交（提交行 + 全部答案 + 总分）在单个事务内写入：要么全部落库，
//! 要么全部回滚，调用方不会看到部分评分状态。自动保存是尽力而为的草稿，
//! 不使用事务。
//!
//! 并发提交同一尝试槽位由 (assignment_id, student_id, attempt_number)
//! 唯一索引仲裁，落败方得到冲突错误而不是错误的尝试号。

use super::SeaOrmStorage;
use crate::entity::answers::{
    ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as Answers,
};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{AcademyError, Result};
use crate::models::assignments::entities::AnswerValue;
use crate::models::submissions::{
    entities::{Answer, Submission, SubmissionStatus},
    requests::FinalizeSubmissionRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 某学生对某作业的全部提交（尝试号倒序）
    pub async fn list_submissions_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::AttemptNumber)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 已用尝试次数
    pub async fn count_submissions_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<i64> {
        let count = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计提交数失败: {e}")))?;

        Ok(count as i64)
    }

    /// 某作业的全部提交数
    pub async fn count_submissions_for_assignment_impl(&self, assignment_id: i64) -> Result<i64> {
        let count = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("统计提交数失败: {e}")))?;

        Ok(count as i64)
    }

    /// 查找未完成的提交
    pub async fn find_in_progress_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.eq(SubmissionStatus::InProgress.to_string()))
            .order_by_desc(Column::AttemptNumber)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询未完成提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 新建 in_progress 提交
    pub async fn create_in_progress_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        attempt_number: i32,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            attempt_number: Set(attempt_number),
            status: Set(SubmissionStatus::InProgress.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(map_submission_insert_err)?;

        Ok(result.into_submission())
    }

    /// 自动保存：按 (submission_id, question_id) upsert 一条答案
    pub async fn upsert_answer_impl(
        &self,
        submission_id: i64,
        question_id: i64,
        value: Option<AnswerValue>,
        max_score: f64,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let existing = Answers::find()
            .filter(AnswerColumn::SubmissionId.eq(submission_id))
            .filter(AnswerColumn::QuestionId.eq(question_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询答案失败: {e}")))?;

        match existing {
            Some(answer) => {
                let mut model = AnswerActiveModel {
                    id: Set(answer.id),
                    ..Default::default()
                };
                apply_answer_value(&mut model, value.as_ref());
                model.auto_saved_at = Set(Some(now));

                model
                    .update(&self.db)
                    .await
                    .map_err(|e| AcademyError::database_operation(format!("更新答案失败: {e}")))?;
            }
            None => {
                let mut model = AnswerActiveModel {
                    submission_id: Set(submission_id),
                    question_id: Set(question_id),
                    score: Set(None),
                    max_score: Set(max_score),
                    ..Default::default()
                };
                apply_answer_value(&mut model, value.as_ref());
                model.auto_saved_at = Set(Some(now));

                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| AcademyError::database_operation(format!("保存答案失败: {e}")))?;
            }
        }

        Ok(())
    }

    /// 某次提交的全部答案
    pub async fn get_submission_answers_impl(&self, submission_id: i64) -> Result<Vec<Answer>> {
        let results = Answers::find()
            .filter(AnswerColumn::SubmissionId.eq(submission_id))
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询答案失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_answer()).collect())
    }

    /// 最近一次已定稿的提交
    pub async fn latest_final_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.is_in([
                SubmissionStatus::Submitted.to_string(),
                SubmissionStatus::Graded.to_string(),
                SubmissionStatus::Late.to_string(),
            ]))
            .order_by_desc(Column::AttemptNumber)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 定稿提交
    ///
    /// 复用未完成提交时先清掉它的草稿答案再写入定稿答案；
    /// 否则按给定尝试号新建提交行。整个写入在一个事务内。
    pub async fn finalize_submission_impl(
        &self,
        req: FinalizeSubmissionRequest,
    ) -> Result<Submission> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcademyError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();

        let submission_id = match req.reuse_submission_id {
            Some(submission_id) => {
                // 丢弃草稿答案，定稿答案整体重写
                Answers::delete_many()
                    .filter(AnswerColumn::SubmissionId.eq(submission_id))
                    .exec(&txn)
                    .await
                    .map_err(|e| {
                        AcademyError::database_operation(format!("清理草稿答案失败: {e}"))
                    })?;

                let model = ActiveModel {
                    id: Set(submission_id),
                    status: Set(req.status.to_string()),
                    submitted_at: Set(Some(now)),
                    total_score: Set(Some(req.total_score)),
                    max_score: Set(Some(req.max_score)),
                    percentage: Set(Some(req.percentage)),
                    time_taken: Set(req.time_taken),
                    updated_at: Set(now),
                    ..Default::default()
                };

                model.update(&txn).await.map_err(|e| {
                    AcademyError::database_operation(format!("更新提交失败: {e}"))
                })?;

                submission_id
            }
            None => {
                let model = ActiveModel {
                    assignment_id: Set(req.assignment_id),
                    student_id: Set(req.student_id),
                    attempt_number: Set(req.attempt_number),
                    status: Set(req.status.to_string()),
                    submitted_at: Set(Some(now)),
                    total_score: Set(Some(req.total_score)),
                    max_score: Set(Some(req.max_score)),
                    percentage: Set(Some(req.percentage)),
                    time_taken: Set(req.time_taken),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };

                let created = model.insert(&txn).await.map_err(map_submission_insert_err)?;
                created.id
            }
        };

        // 每道题写一条答案
        for answer in req.answers {
            let mut model = AnswerActiveModel {
                submission_id: Set(submission_id),
                question_id: Set(answer.question_id),
                score: Set(answer.score),
                max_score: Set(answer.max_score),
                ..Default::default()
            };
            apply_answer_value(&mut model, answer.value.as_ref());

            model
                .insert(&txn)
                .await
                .map_err(|e| AcademyError::database_operation(format!("写入答案失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| AcademyError::database_operation(format!("提交事务失败: {e}")))?;

        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| AcademyError::database_operation("提交定稿后查询失败"))?;

        Ok(result.into_submission())
    }
}

/// 写入答案值：恰好填充一个值槽位，其余清空
fn apply_answer_value(model: &mut AnswerActiveModel, value: Option<&AnswerValue>) {
    model.answer_text = Set(None);
    model.answer_options = Set(None);
    model.answer_boolean = Set(None);
    model.file_url = Set(None);
    model.file_name = Set(None);
    model.file_size = Set(None);

    match value {
        Some(AnswerValue::Options(ids)) => {
            model.answer_options = Set(serde_json::to_string(ids).ok());
        }
        Some(AnswerValue::Boolean(flag)) => {
            model.answer_boolean = Set(Some(*flag));
        }
        Some(AnswerValue::Text(text)) => {
            model.answer_text = Set(Some(text.clone()));
        }
        Some(AnswerValue::File { url, name, size }) => {
            model.file_url = Set(Some(url.clone()));
            model.file_name = Set(Some(name.clone()));
            model.file_size = Set(Some(*size));
        }
        None => {}
    }
}

/// 提交插入错误映射：唯一约束冲突（尝试号竞争）转为冲突错误
fn map_submission_insert_err(e: sea_orm::DbErr) -> AcademyError {
    if matches!(e.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))) {
        AcademyError::conflict("同一尝试号的提交已存在，请重试")
    } else {
        AcademyError::database_operation(format!("创建提交失败: {e}"))
    }
}
