use crate::{
    db::DbPool,
    entities::{
        assignment_line::{self, Entity as AssignmentLine},
        inventory_entry::{self, Entity as InventoryEntry},
        material::{self, Entity as Material},
        project::{self, Entity as Project},
        project_assignment::{self, Entity as ProjectAssignment},
        warehouse::{self, Entity as Warehouse},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::inventory::apply_delta,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// One requested line of an assignment batch.
#[derive(Debug, Clone)]
pub struct AssignmentLineDraft {
    pub inventory_entry_id: Uuid,
    pub quantity: i32,
}

/// An assignment line joined with its source entry context.
pub type DetailedLine = (
    assignment_line::Model,
    Option<inventory_entry::Model>,
    Option<material::Model>,
    Option<warehouse::Model>,
);

/// Moves stock between the warehouse ledger and projects. Every batch runs
/// inside one transaction: either all lines deduct, or none do.
#[derive(Clone)]
pub struct AssignmentService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl AssignmentService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<project_assignment::Model>, ServiceError> {
        let assignments = ProjectAssignment::find()
            .order_by_desc(project_assignment::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(assignments)
    }

    #[instrument(skip(self))]
    pub async fn get(
        &self,
        assignment_id: Uuid,
    ) -> Result<(project_assignment::Model, Vec<DetailedLine>), ServiceError> {
        let db = self.db_pool.as_ref();
        let assignment = find_assignment(db, assignment_id).await?;
        let lines = assignment
            .find_related(AssignmentLine)
            .all(db)
            .await?;

        let entry_ids: Vec<Uuid> = lines.iter().map(|l| l.inventory_entry_id).collect();
        let entries: HashMap<Uuid, inventory_entry::Model> = InventoryEntry::find()
            .filter(inventory_entry::Column::Id.is_in(entry_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();
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

        let detailed = lines
            .into_iter()
            .map(|line| {
                let entry = entries.get(&line.inventory_entry_id).cloned();
                let mat = entry
                    .as_ref()
                    .and_then(|e| materials.get(&e.material_id).cloned());
                let wh = entry
                    .as_ref()
                    .and_then(|e| warehouses.get(&e.warehouse_id).cloned());
                (line, entry, mat, wh)
            })
            .collect();
        Ok((assignment, detailed))
    }

    /// Assign inventory to a project. Each line deducts from its source
    /// entry through the ledger's conditional subtract, all inside one
    /// transaction, so a failing line (unknown entry, overdraw) rolls the
    /// whole batch back. Over-assignment past the on-hand quantity is
    /// therefore impossible.
    #[instrument(skip(self, lines), fields(%project_id, line_count = lines.len()))]
    pub async fn assign(
        &self,
        project_id: Uuid,
        lines: Vec<AssignmentLineDraft>,
        assigned_by: String,
    ) -> Result<project_assignment::Model, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(
                "an assignment needs at least one line".into(),
            ));
        }
        if let Some(bad) = lines.iter().find(|l| l.quantity <= 0) {
            return Err(ServiceError::ValidationError(format!(
                "assigned quantity must be positive (entry {})",
                bad.inventory_entry_id
            )));
        }

        let db = self.db_pool.as_ref();
        if Project::find_by_id(project_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Project {} not found",
                project_id
            )));
        }

        let line_count = lines.len();
        let assignment = self
            .db_pool
            .transaction::<_, project_assignment::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let assignment = project_assignment::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        project_id: Set(project_id),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;

                    for line in lines {
                        apply_delta(
                            txn,
                            line.inventory_entry_id,
                            -line.quantity,
                            &assigned_by,
                            Some(format!("assigned to project {}", project_id)),
                        )
                        .await?;

                        assignment_line::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            assignment_id: Set(assignment.id),
                            inventory_entry_id: Set(line.inventory_entry_id),
                            quantity_assigned: Set(line.quantity),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(assignment)
                })
            })
            .await?;

        self.event_sender
            .send(Event::InventoryAssigned {
                assignment_id: assignment.id,
                project_id,
                line_count,
            })
            .await
            .map_err(ServiceError::EventError)?;
        info!(assignment_id = %assignment.id, "inventory assigned to project");
        Ok(assignment)
    }

    /// Remove one line: its quantity returns to the source entry, then the
    /// line is deleted, both in one transaction.
    #[instrument(skip(self), fields(%assignment_id, %line_id))]
    pub async fn unassign(
        &self,
        assignment_id: Uuid,
        line_id: Uuid,
        returned_by: String,
    ) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();
        find_assignment(db, assignment_id).await?;

        let line = AssignmentLine::find_by_id(line_id)
            .filter(assignment_line::Column::AssignmentId.eq(assignment_id))
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Assignment line {} not found on assignment {}",
                    line_id, assignment_id
                ))
            })?;

        let entry_id = line.inventory_entry_id;
        let quantity = line.quantity_assigned;
        self.db_pool
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    apply_delta(
                        txn,
                        entry_id,
                        quantity,
                        &returned_by,
                        Some(format!("returned from assignment {}", assignment_id)),
                    )
                    .await?;
                    AssignmentLine::delete_by_id(line_id).exec(txn).await?;
                    Ok(())
                })
            })
            .await?;

        self.event_sender
            .send(Event::AssignmentLineReturned {
                assignment_id,
                entry_id,
                quantity,
            })
            .await
            .map_err(ServiceError::EventError)?;
        Ok(())
    }

    /// Delete a whole assignment, returning every line's quantity to its
    /// source entry first.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        assignment_id: Uuid,
        returned_by: String,
    ) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();
        find_assignment(db, assignment_id).await?;

        self.db_pool
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let lines = AssignmentLine::find()
                        .filter(assignment_line::Column::AssignmentId.eq(assignment_id))
                        .all(txn)
                        .await?;
                    for line in lines {
                        apply_delta(
                            txn,
                            line.inventory_entry_id,
                            line.quantity_assigned,
                            &returned_by,
                            Some(format!("returned from assignment {}", assignment_id)),
                        )
                        .await?;
                        AssignmentLine::delete_by_id(line.id).exec(txn).await?;
                    }
                    ProjectAssignment::delete_by_id(assignment_id)
                        .exec(txn)
                        .await?;
                    Ok(())
                })
            })
            .await?;
        info!(%assignment_id, "assignment deleted, stock returned");
        Ok(())
    }
}

async fn find_assignment<C: ConnectionTrait>(
    conn: &C,
    assignment_id: Uuid,
) -> Result<project_assignment::Model, ServiceError> {
    ProjectAssignment::find_by_id(assignment_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Assignment {} not found", assignment_id))
        })
}
