use crate::{
    db::DbPool,
    entities::user::{self, Entity as User},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UserDraft {
    pub username: String,
    pub rut: String,
    pub email: String,
    pub roles: Vec<String>,
    pub photo_url: Option<String>,
}

/// Personnel directory. Authentication is handled outside this service;
/// these records exist so attendance and stock attribution resolve to
/// real people.
#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl UserService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
        let users = User::find()
            .order_by_asc(user::Column::Username)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(users)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<user::Model, ServiceError> {
        User::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_by_rut(&self, rut: &str) -> Result<user::Model, ServiceError> {
        User::find()
            .filter(user::Column::Rut.eq(rut))
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No user with RUT {}", rut)))
    }

    #[instrument(skip(self, draft), fields(rut = %draft.rut))]
    pub async fn create(&self, draft: UserDraft) -> Result<user::Model, ServiceError> {
        self.check_rut(&draft.rut, None).await?;

        let now = Utc::now();
        let created = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(draft.username),
            rut: Set(draft.rut),
            email: Set(draft.email),
            roles: Set(serde_json::to_value(&draft.roles)
                .map_err(|e| ServiceError::InternalError(e.to_string()))?),
            photo_url: Set(draft.photo_url),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db_pool.as_ref())
        .await?;

        self.event_sender
            .send(Event::UserCreated(created.id))
            .await
            .map_err(ServiceError::EventError)?;
        info!(user_id = %created.id, "user created");
        Ok(created)
    }

    #[instrument(skip(self, draft), fields(user_id = %id))]
    pub async fn update(&self, id: Uuid, draft: UserDraft) -> Result<user::Model, ServiceError> {
        let existing = self.get(id).await?;
        self.check_rut(&draft.rut, Some(id)).await?;

        let mut model: user::ActiveModel = existing.into();
        model.username = Set(draft.username);
        model.rut = Set(draft.rut);
        model.email = Set(draft.email);
        model.roles = Set(serde_json::to_value(&draft.roles)
            .map_err(|e| ServiceError::InternalError(e.to_string()))?);
        if let Some(url) = draft.photo_url {
            model.photo_url = Set(Some(url));
        }
        model.updated_at = Set(Utc::now());
        Ok(model.update(self.db_pool.as_ref()).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<user::Model, ServiceError> {
        let existing = self.get(id).await?;
        User::delete_by_id(id).exec(self.db_pool.as_ref()).await?;
        self.event_sender
            .send(Event::UserDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;
        Ok(existing)
    }

    async fn check_rut(&self, rut: &str, exclude: Option<Uuid>) -> Result<(), ServiceError> {
        let mut query = User::find().filter(user::Column::Rut.eq(rut));
        if let Some(id) = exclude {
            query = query.filter(user::Column::Id.ne(id));
        }
        if query.one(self.db_pool.as_ref()).await?.is_some() {
            return Err(ServiceError::Duplicate(format!(
                "RUT {} is already registered",
                rut
            )));
        }
        Ok(())
    }
}
