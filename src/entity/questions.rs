//! 题目实体

use sea_orm::entity::prelude::*;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub question_type: String,
    pub marks: f64,
    pub order_index: i32,
    // JSON：MCQ 为选项 ID 数组，判断题为布尔值
    #[sea_orm(column_type = "Text", nullable)]
    pub correct_answer: Option<String>,
    // JSON：允许的扩展名数组
    #[sea_orm(column_type = "Text", nullable)]
    pub allowed_file_types: Option<String>,
    pub max_file_size: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(has_many = "super::question_options::Entity")]
    Options,
    #[sea_orm(has_many = "super::answers::Entity")]
    Answers,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::question_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Options.def()
    }
}

impl Related<super::answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_question(self) -> crate::models::assignments::entities::Question {
        use crate::models::assignments::entities::{CorrectAnswer, Question, QuestionType};

        let correct_answer = self
            .correct_answer
            .as_deref()
            .and_then(CorrectAnswer::from_json);

        let allowed_file_types = self
            .allowed_file_types
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok());

        Question {
            id: self.id,
            assignment_id: self.assignment_id,
            title: self.title,
            description: self.description,
            question_type: QuestionType::from_str(&self.question_type)
                .unwrap_or(QuestionType::ShortAnswer),
            marks: self.marks,
            order_index: self.order_index,
            correct_answer,
            allowed_file_types,
            max_file_size: self.max_file_size,
            options: Vec::new(),
        }
    }
}
