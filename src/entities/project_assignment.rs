use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Header row for a batch of inventory assigned to a project.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
    #[sea_orm(has_many = "super::assignment_line::Entity")]
    AssignmentLine,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::assignment_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignmentLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
