use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A quantity of one material held at one warehouse.
///
/// `quantity` never goes negative and is only mutated through the ledger's
/// conditional adjustment statement, never by direct overwrite.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub material_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: i32,
    /// Who registered the entry (user email or RUT).
    pub entered_by: String,
    pub entered_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
    #[sea_orm(has_many = "super::inventory_adjustment::Entity")]
    InventoryAdjustment,
    #[sea_orm(has_many = "super::assignment_line::Entity")]
    AssignmentLine,
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::inventory_adjustment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryAdjustment.def()
    }
}

impl Related<super::assignment_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignmentLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
