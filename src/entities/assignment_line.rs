use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A (source inventory entry, quantity) pairing attached to an assignment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assignment_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub inventory_entry_id: Uuid,
    pub quantity_assigned: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project_assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::project_assignment::Column::Id"
    )]
    ProjectAssignment,
    #[sea_orm(
        belongs_to = "super::inventory_entry::Entity",
        from = "Column::InventoryEntryId",
        to = "super::inventory_entry::Column::Id"
    )]
    InventoryEntry,
}

impl Related<super::project_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectAssignment.def()
    }
}

impl Related<super::inventory_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
