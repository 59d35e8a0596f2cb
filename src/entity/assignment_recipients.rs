//! 作业接收人实体

use sea_orm::entity::prelude::*;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignment_recipients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub recipient_type: String,
    pub student_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_recipient(self) -> crate::models::assignments::entities::AssignmentRecipient {
        use crate::models::assignments::entities::{AssignmentRecipient, RecipientType};

        AssignmentRecipient {
            id: self.id,
            assignment_id: self.assignment_id,
            recipient_type: RecipientType::from_str(&self.recipient_type)
                .unwrap_or(RecipientType::SelectedStudents),
            student_id: self.student_id,
        }
    }
}
