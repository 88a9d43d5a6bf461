use crate::{
    db::DbPool,
    entities::warehouse::{self, Entity as Warehouse},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct WarehouseDraft {
    pub name: String,
    pub location: String,
    pub phone: String,
}

#[derive(Clone)]
pub struct WarehouseService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl WarehouseService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<warehouse::Model>, ServiceError> {
        let warehouses = Warehouse::find()
            .order_by_asc(warehouse::Column::Name)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(warehouses)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<warehouse::Model, ServiceError> {
        Warehouse::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Warehouse {} not found", id)))
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: WarehouseDraft) -> Result<warehouse::Model, ServiceError> {
        self.check_name(&draft.name, None).await?;

        let now = Utc::now();
        let created = warehouse::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(draft.name),
            location: Set(draft.location),
            phone: Set(draft.phone),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db_pool.as_ref())
        .await?;

        self.event_sender
            .send(Event::WarehouseCreated(created.id))
            .await
            .map_err(ServiceError::EventError)?;
        info!(warehouse_id = %created.id, "warehouse created");
        Ok(created)
    }

    #[instrument(skip(self, draft), fields(warehouse_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        draft: WarehouseDraft,
    ) -> Result<warehouse::Model, ServiceError> {
        let existing = self.get(id).await?;
        self.check_name(&draft.name, Some(id)).await?;

        let mut model: warehouse::ActiveModel = existing.into();
        model.name = Set(draft.name);
        model.location = Set(draft.location);
        model.phone = Set(draft.phone);
        model.updated_at = Set(Utc::now());
        Ok(model.update(self.db_pool.as_ref()).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<warehouse::Model, ServiceError> {
        let existing = self.get(id).await?;
        Warehouse::delete_by_id(id).exec(self.db_pool.as_ref()).await?;
        self.event_sender
            .send(Event::WarehouseDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;
        Ok(existing)
    }

    async fn check_name(&self, name: &str, exclude: Option<Uuid>) -> Result<(), ServiceError> {
        let mut query = Warehouse::find().filter(warehouse::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(warehouse::Column::Id.ne(id));
        }
        if query.one(self.db_pool.as_ref()).await?.is_some() {
            return Err(ServiceError::Duplicate(format!(
                "A warehouse named \"{}\" already exists",
                name
            )));
        }
        Ok(())
    }
}
