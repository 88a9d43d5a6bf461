use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One check-in, optionally closed by a check-out, for one worker (by RUT).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub rut: String,
    pub check_in: DateTimeUtc,
    /// None while the record is still open.
    pub check_out: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
