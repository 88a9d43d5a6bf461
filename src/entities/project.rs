use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub contracting_company: String,
    pub start_date: Date,
    pub end_date: Date,
    pub budget: i64,
    /// JSON array of [`Activity`], addressed by index.
    pub activities: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_assignment::Entity")]
    ProjectAssignment,
    #[sea_orm(has_many = "super::crew_assignment::Entity")]
    CrewAssignment,
}

impl Related<super::project_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectAssignment.def()
    }
}

impl Related<super::crew_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CrewAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// One scheduled piece of work inside a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Activity {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[serde(default)]
    pub done: bool,
}

impl Model {
    /// Decode the activities column. A malformed column is treated as empty
    /// rather than failing the read.
    pub fn activity_list(&self) -> Vec<Activity> {
        serde_json::from_value(self.activities.clone()).unwrap_or_default()
    }
}
