use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// A trackable good or tool type, independent of physical location.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// "material" or "tool"; see [`MaterialCategory`].
    pub category: String,
    /// Unit of measure; see [`UnitOfMeasure`].
    pub unit: String,
    /// Optional and unique across materials when present.
    pub barcode: Option<String>,
    /// Relative URL under the uploads mount.
    pub image_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inventory_entry::Entity")]
    InventoryEntry,
}

impl Related<super::inventory_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MaterialCategory {
    Material,
    Tool,
}

/// Units of measure accepted for a material.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UnitOfMeasure {
    Bag,
    Unit,
    Kg,
    Liter,
    Box,
    Meter,
    Roll,
    Gallon,
    Piece,
    Dozen,
    Package,
    Sack,
    Barrel,
    Ton,
    CubicMeter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("bag", UnitOfMeasure::Bag)]
    #[case("kg", UnitOfMeasure::Kg)]
    #[case("cubic-meter", UnitOfMeasure::CubicMeter)]
    #[case("dozen", UnitOfMeasure::Dozen)]
    fn unit_round_trips_through_strings(#[case] text: &str, #[case] unit: UnitOfMeasure) {
        assert_eq!(unit.to_string(), text);
        assert_eq!(UnitOfMeasure::from_str(text).unwrap(), unit);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert!(UnitOfMeasure::from_str("furlong").is_err());
    }

    #[test]
    fn category_parses_both_variants() {
        assert_eq!(
            MaterialCategory::from_str("material").unwrap(),
            MaterialCategory::Material
        );
        assert_eq!(
            MaterialCategory::from_str("tool").unwrap(),
            MaterialCategory::Tool
        );
    }
}
