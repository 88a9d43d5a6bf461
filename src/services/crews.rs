use crate::{
    db::DbPool,
    entities::{
        crew_assignment::{self, CrewStatus, Entity as CrewAssignment},
        project::Entity as Project,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Assigns workers to projects and tracks the assignment lifecycle.
#[derive(Clone)]
pub struct CrewService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl CrewService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<crew_assignment::Model>, ServiceError> {
        let assignments = CrewAssignment::find()
            .order_by_desc(crew_assignment::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(assignments)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<crew_assignment::Model, ServiceError> {
        CrewAssignment::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Crew assignment {} not found", id)))
    }

    #[instrument(skip(self, participants), fields(%project_id))]
    pub async fn create(
        &self,
        project_id: Uuid,
        participants: Vec<String>,
    ) -> Result<crew_assignment::Model, ServiceError> {
        if participants.is_empty() {
            return Err(ServiceError::ValidationError(
                "a crew assignment needs at least one participant".into(),
            ));
        }
        let db = self.db_pool.as_ref();
        if Project::find_by_id(project_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Project {} not found",
                project_id
            )));
        }

        let now = Utc::now();
        let created = crew_assignment::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            participants: Set(serde_json::to_value(&participants)
                .map_err(|e| ServiceError::InternalError(e.to_string()))?),
            status: Set(CrewStatus::Assigned.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        self.event_sender
            .send(Event::CrewAssigned {
                assignment_id: created.id,
                project_id,
            })
            .await
            .map_err(ServiceError::EventError)?;
        info!(assignment_id = %created.id, "crew assigned to project");
        Ok(created)
    }

    #[instrument(skip(self, participants), fields(assignment_id = %id))]
    pub async fn update_participants(
        &self,
        id: Uuid,
        participants: Vec<String>,
    ) -> Result<crew_assignment::Model, ServiceError> {
        if participants.is_empty() {
            return Err(ServiceError::ValidationError(
                "a crew assignment needs at least one participant".into(),
            ));
        }
        let existing = self.get(id).await?;
        let mut model: crew_assignment::ActiveModel = existing.into();
        model.participants = Set(serde_json::to_value(&participants)
            .map_err(|e| ServiceError::InternalError(e.to_string()))?);
        model.updated_at = Set(Utc::now());
        Ok(model.update(self.db_pool.as_ref()).await?)
    }

    #[instrument(skip(self), fields(assignment_id = %id))]
    pub async fn set_status(
        &self,
        id: Uuid,
        status: CrewStatus,
    ) -> Result<crew_assignment::Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut model: crew_assignment::ActiveModel = existing.into();
        model.status = Set(status.to_string());
        model.updated_at = Set(Utc::now());
        Ok(model.update(self.db_pool.as_ref()).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.get(id).await?;
        CrewAssignment::delete_by_id(id)
            .exec(self.db_pool.as_ref())
            .await?;
        Ok(())
    }
}
