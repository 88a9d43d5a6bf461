use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only audit row: one record per accepted quantity adjustment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_adjustments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub entry_id: Uuid,
    /// Positive for additions, negative for removals.
    pub delta: i32,
    /// Resulting on-hand quantity after this adjustment landed.
    pub quantity_after: i32,
    pub adjusted_by: String,
    pub reason: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventory_entry::Entity",
        from = "Column::EntryId",
        to = "super::inventory_entry::Column::Id"
    )]
    InventoryEntry,
}

impl Related<super::inventory_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
