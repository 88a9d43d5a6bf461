use crate::{
    db::DbPool,
    entities::{
        assignment_line::{self, Entity as AssignmentLine},
        inventory_adjustment::{self, Entity as InventoryAdjustment},
        inventory_entry::{self, Entity as InventoryEntry},
        material::{self, Entity as Material},
        warehouse::{self, Entity as Warehouse},
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// An inventory entry joined with the material and warehouse it refers to.
pub type DetailedEntry = (
    inventory_entry::Model,
    Option<material::Model>,
    Option<warehouse::Model>,
);

/// Stock ledger. Quantities move only through [`apply_delta`], a single
/// conditional UPDATE, so two concurrent adjustments can never lose a write
/// and no adjustment can drive an entry negative.
#[derive(Clone)]
pub struct InventoryService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl InventoryService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<DetailedEntry>, ServiceError> {
        let db = self.db_pool.as_ref();
        let entries = InventoryEntry::find()
            .order_by_desc(inventory_entry::Column::EnteredAt)
            .all(db)
            .await?;

        let materials: HashMap<Uuid, material::Model> = Material::find()
            .all(db)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let warehouses: HashMap<Uuid, warehouse::Model> = Warehouse::find()
            .all(db)
            .await?
            .into_iter()
            .map(|w| (w.id, w))
            .collect();

        Ok(entries
            .into_iter()
            .map(|e| {
                let m = materials.get(&e.material_id).cloned();
                let w = warehouses.get(&e.warehouse_id).cloned();
                (e, m, w)
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<DetailedEntry, ServiceError> {
        let db = self.db_pool.as_ref();
        let entry = find_entry(db, id).await?;
        let material = Material::find_by_id(entry.material_id).one(db).await?;
        let warehouse = Warehouse::find_by_id(entry.warehouse_id).one(db).await?;
        Ok((entry, material, warehouse))
    }

    /// Register stock of a material at a warehouse. Fails when either
    /// reference does not resolve. The opening quantity is recorded in the
    /// audit trail like any other addition.
    #[instrument(skip(self), fields(%material_id, %warehouse_id))]
    pub async fn create(
        &self,
        material_id: Uuid,
        warehouse_id: Uuid,
        initial_quantity: i32,
        entered_by: String,
    ) -> Result<inventory_entry::Model, ServiceError> {
        if initial_quantity < 0 {
            return Err(ServiceError::ValidationError(
                "initial quantity must not be negative".into(),
            ));
        }

        let db = self.db_pool.as_ref();
        if Material::find_by_id(material_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Material {} not found",
                material_id
            )));
        }
        if Warehouse::find_by_id(warehouse_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Warehouse {} not found",
                warehouse_id
            )));
        }

        let now = Utc::now();
        let entry_id = Uuid::new_v4();
        let created = db
            .transaction::<_, inventory_entry::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let entry = inventory_entry::ActiveModel {
                        id: Set(entry_id),
                        material_id: Set(material_id),
                        warehouse_id: Set(warehouse_id),
                        quantity: Set(initial_quantity),
                        entered_by: Set(entered_by.clone()),
                        entered_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    if initial_quantity > 0 {
                        record_adjustment(
                            txn,
                            entry_id,
                            initial_quantity,
                            initial_quantity,
                            &entered_by,
                            Some("initial stock".into()),
                        )
                        .await?;
                    }
                    Ok(entry)
                })
            })
            .await?;

        self.event_sender
            .send(Event::InventoryEntryCreated {
                entry_id: created.id,
                material_id,
                warehouse_id,
                quantity: created.quantity,
            })
            .await
            .map_err(ServiceError::EventError)?;
        info!(entry_id = %created.id, quantity = created.quantity, "inventory entry created");
        Ok(created)
    }

    /// Apply a signed delta to an entry. Negative deltas that would take the
    /// quantity below zero are rejected and leave the entry untouched.
    #[instrument(skip(self), fields(%entry_id, delta))]
    pub async fn adjust(
        &self,
        entry_id: Uuid,
        delta: i32,
        adjusted_by: String,
        reason: Option<String>,
    ) -> Result<inventory_entry::Model, ServiceError> {
        if delta == 0 {
            return Err(ServiceError::ValidationError(
                "adjustment delta must not be zero".into(),
            ));
        }

        let updated = self
            .db_pool
            .transaction::<_, inventory_entry::Model, ServiceError>({
                let adjusted_by = adjusted_by.clone();
                move |txn| {
                    Box::pin(async move {
                        apply_delta(txn, entry_id, delta, &adjusted_by, reason).await
                    })
                }
            })
            .await?;

        self.event_sender
            .send(Event::InventoryAdjusted {
                entry_id,
                delta,
                quantity_after: updated.quantity,
                adjusted_by,
            })
            .await
            .map_err(ServiceError::EventError)?;
        Ok(updated)
    }

    /// The audit trail for one entry, newest first.
    #[instrument(skip(self))]
    pub async fn adjustments(
        &self,
        entry_id: Uuid,
    ) -> Result<Vec<inventory_adjustment::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        find_entry(db, entry_id).await?;
        let rows = InventoryAdjustment::find()
            .filter(inventory_adjustment::Column::EntryId.eq(entry_id))
            .order_by_desc(inventory_adjustment::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(rows)
    }

    /// Delete an entry. Refused while assignment lines still draw from it.
    #[instrument(skip(self))]
    pub async fn delete(&self, entry_id: Uuid) -> Result<inventory_entry::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        let entry = find_entry(db, entry_id).await?;

        let referencing = AssignmentLine::find()
            .filter(assignment_line::Column::InventoryEntryId.eq(entry_id))
            .count(db)
            .await?;
        if referencing > 0 {
            return Err(ServiceError::Conflict(format!(
                "Inventory entry {} is referenced by {} assignment lines",
                entry_id, referencing
            )));
        }

        InventoryAdjustment::delete_many()
            .filter(inventory_adjustment::Column::EntryId.eq(entry_id))
            .exec(db)
            .await?;
        InventoryEntry::delete_by_id(entry_id).exec(db).await?;
        info!(%entry_id, "inventory entry deleted");
        Ok(entry)
    }
}

async fn find_entry<C: ConnectionTrait>(
    conn: &C,
    entry_id: Uuid,
) -> Result<inventory_entry::Model, ServiceError> {
    InventoryEntry::find_by_id(entry_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Inventory entry {} not found", entry_id)))
}

/// Apply a signed delta with one conditional UPDATE and append the audit row.
///
/// Callers that batch several deltas (assignment batches) run this inside
/// their own transaction; a zero-row update means the entry is missing or
/// the removal would overdraw it, and the caller's transaction rolls back.
pub(crate) async fn apply_delta<C: ConnectionTrait>(
    conn: &C,
    entry_id: Uuid,
    delta: i32,
    adjusted_by: &str,
    reason: Option<String>,
) -> Result<inventory_entry::Model, ServiceError> {
    let mut update = InventoryEntry::update_many()
        .col_expr(
            inventory_entry::Column::Quantity,
            Expr::col(inventory_entry::Column::Quantity).add(delta),
        )
        .col_expr(
            inventory_entry::Column::UpdatedAt,
            Expr::value(Utc::now()),
        )
        .filter(inventory_entry::Column::Id.eq(entry_id));
    if delta < 0 {
        update = update.filter(inventory_entry::Column::Quantity.gte(-delta));
    }

    let result = update.exec(conn).await?;
    if result.rows_affected == 0 {
        // Disambiguate: missing entry vs. insufficient stock.
        let entry = find_entry(conn, entry_id).await?;
        return Err(ServiceError::InsufficientStock(format!(
            "Cannot remove {} from inventory entry {}: only {} on hand",
            -delta, entry_id, entry.quantity
        )));
    }

    let entry = find_entry(conn, entry_id).await?;
    record_adjustment(conn, entry_id, delta, entry.quantity, adjusted_by, reason).await?;
    Ok(entry)
}

async fn record_adjustment<C: ConnectionTrait>(
    conn: &C,
    entry_id: Uuid,
    delta: i32,
    quantity_after: i32,
    adjusted_by: &str,
    reason: Option<String>,
) -> Result<(), ServiceError> {
    inventory_adjustment::ActiveModel {
        id: Set(Uuid::new_v4()),
        entry_id: Set(entry_id),
        delta: Set(delta),
        quantity_after: Set(quantity_after),
        adjusted_by: Set(adjusted_by.to_string()),
        reason: Set(reason),
        created_at: Set(Utc::now()),
    }
    .insert(conn)
    .await?;
    Ok(())
}
