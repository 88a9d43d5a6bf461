use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Personnel directory entry. Attendance and inventory attribution refer to
/// workers by RUT; authentication lives outside this service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    /// Chilean tax identifier, unique per user. Format `NNNNNNN-K`.
    pub rut: String,
    pub email: String,
    /// JSON array of role names.
    pub roles: Json,
    pub photo_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn role_list(&self) -> Vec<String> {
        serde_json::from_value(self.roles.clone()).unwrap_or_default()
    }
}
