use crate::{
    db::DbPool,
    entities::{
        inventory_entry::{self, Entity as InventoryEntry},
        material::{self, Entity as Material, MaterialCategory, UnitOfMeasure},
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Validated input for creating or replacing a material.
#[derive(Debug, Clone)]
pub struct MaterialDraft {
    pub name: String,
    pub description: String,
    pub category: MaterialCategory,
    pub unit: UnitOfMeasure,
    pub barcode: Option<String>,
}

/// Registry of material and tool types.
#[derive(Clone)]
pub struct MaterialService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl MaterialService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<material::Model>, ServiceError> {
        let materials = Material::find()
            .order_by_asc(material::Column::Name)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(materials)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<material::Model, ServiceError> {
        Material::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Material {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_by_barcode(&self, barcode: &str) -> Result<material::Model, ServiceError> {
        Material::find()
            .filter(material::Column::Barcode.eq(barcode))
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No material registered with barcode {}", barcode))
            })
    }

    /// Create a material. The name must be unique, and so must a non-empty
    /// barcode when one is supplied.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(
        &self,
        draft: MaterialDraft,
        image_url: Option<String>,
    ) -> Result<material::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        self.check_duplicates(&draft, None).await?;

        let now = Utc::now();
        let model = material::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(draft.name),
            description: Set(draft.description),
            category: Set(draft.category.to_string()),
            unit: Set(draft.unit.to_string()),
            barcode: Set(draft.barcode.filter(|b| !b.is_empty())),
            image_url: Set(image_url),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(db).await?;

        self.event_sender
            .send(Event::MaterialCreated(created.id))
            .await
            .map_err(ServiceError::EventError)?;
        info!(material_id = %created.id, "material created");
        Ok(created)
    }

    /// Update a material in place. The duplicate checks exclude the material
    /// itself, so re-submitting the current name or barcode succeeds. A
    /// `None` image keeps the stored reference; `Some` replaces it.
    #[instrument(skip(self, draft), fields(material_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        draft: MaterialDraft,
        image_url: Option<String>,
    ) -> Result<material::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        let existing = self.get(id).await?;
        self.check_duplicates(&draft, Some(id)).await?;

        let mut model: material::ActiveModel = existing.into();
        model.name = Set(draft.name);
        model.description = Set(draft.description);
        model.category = Set(draft.category.to_string());
        model.unit = Set(draft.unit.to_string());
        model.barcode = Set(draft.barcode.filter(|b| !b.is_empty()));
        if let Some(url) = image_url {
            model.image_url = Set(Some(url));
        }
        model.updated_at = Set(Utc::now());
        let updated = model.update(db).await?;

        self.event_sender
            .send(Event::MaterialUpdated(updated.id))
            .await
            .map_err(ServiceError::EventError)?;
        Ok(updated)
    }

    /// Delete a material. Refused while inventory entries still reference it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<material::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        let existing = self.get(id).await?;

        let referencing = InventoryEntry::find()
            .filter(inventory_entry::Column::MaterialId.eq(id))
            .count(db)
            .await?;
        if referencing > 0 {
            return Err(ServiceError::Conflict(format!(
                "Material {} is referenced by {} inventory entries",
                id, referencing
            )));
        }

        Material::delete_by_id(id).exec(db).await?;
        self.event_sender
            .send(Event::MaterialDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;
        info!(material_id = %id, "material deleted");
        Ok(existing)
    }

    async fn check_duplicates(
        &self,
        draft: &MaterialDraft,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();

        let mut name_query = Material::find().filter(material::Column::Name.eq(&draft.name));
        if let Some(id) = exclude {
            name_query = name_query.filter(material::Column::Id.ne(id));
        }
        if name_query.one(db).await?.is_some() {
            return Err(ServiceError::Duplicate(format!(
                "A material named \"{}\" already exists",
                draft.name
            )));
        }

        if let Some(barcode) = draft.barcode.as_deref().filter(|b| !b.is_empty()) {
            let mut barcode_query =
                Material::find().filter(material::Column::Barcode.eq(barcode));
            if let Some(id) = exclude {
                barcode_query = barcode_query.filter(material::Column::Id.ne(id));
            }
            if barcode_query.one(db).await?.is_some() {
                return Err(ServiceError::Duplicate(format!(
                    "Barcode {} is already registered to another material",
                    barcode
                )));
            }
        }

        Ok(())
    }
}
