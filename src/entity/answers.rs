//! 答案实体
//!
//! 互斥的可空值列是关系模型的现实；业务层使用 `AnswerValue` 标签联合。
//! 读取按已填充的列分发，写入由题目类型决定填充哪一列并清空其余列。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub question_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub answer_text: Option<String>,
    // JSON：选中的选项 ID 数组
    #[sea_orm(column_type = "Text", nullable)]
    pub answer_options: Option<String>,
    pub answer_boolean: Option<bool>,
    #[sea_orm(column_type = "Text", nullable)]
    pub file_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub score: Option<f64>,
    pub max_score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub auto_saved_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 按已填充的列恢复答案值
    ///
    /// 按列而不是按题目类型分发：题目被改类型后旧答案仍能读出。
    pub fn answer_value(&self) -> Option<crate::models::assignments::entities::AnswerValue> {
        use crate::models::assignments::entities::AnswerValue;

        if let Some(raw) = &self.answer_options {
            return serde_json::from_str::<Vec<i64>>(raw)
                .ok()
                .map(AnswerValue::Options);
        }
        if let Some(flag) = self.answer_boolean {
            return Some(AnswerValue::Boolean(flag));
        }
        if let Some(text) = &self.answer_text {
            return Some(AnswerValue::Text(text.clone()));
        }
        if let Some(url) = &self.file_url {
            return Some(AnswerValue::File {
                url: url.clone(),
                name: self.file_name.clone().unwrap_or_default(),
                size: self.file_size.unwrap_or(0),
            });
        }
        None
    }

    pub fn into_answer(self) -> crate::models::submissions::entities::Answer {
        let value = self.answer_value();
        crate::models::submissions::entities::Answer {
            id: self.id,
            submission_id: self.submission_id,
            question_id: self.question_id,
            value,
            score: self.score,
            max_score: self.max_score,
            feedback: self.feedback,
        }
    }
}
