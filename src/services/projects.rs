use crate::{
    db::DbPool,
    entities::project::{self, Activity, Entity as Project},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub contracting_company: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: i64,
    pub activities: Vec<Activity>,
}

#[derive(Clone)]
pub struct ProjectService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl ProjectService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// All projects, earliest deadline first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<project::Model>, ServiceError> {
        let projects = Project::find()
            .order_by_asc(project::Column::EndDate)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(projects)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<project::Model, ServiceError> {
        Project::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Project {} not found", id)))
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&self, draft: ProjectDraft) -> Result<project::Model, ServiceError> {
        validate_dates(&draft)?;

        let now = Utc::now();
        let created = project::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(draft.title),
            description: Set(draft.description),
            contracting_company: Set(draft.contracting_company),
            start_date: Set(draft.start_date),
            end_date: Set(draft.end_date),
            budget: Set(draft.budget),
            activities: Set(serde_json::to_value(&draft.activities)
                .map_err(|e| ServiceError::InternalError(e.to_string()))?),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db_pool.as_ref())
        .await?;

        self.event_sender
            .send(Event::ProjectCreated(created.id))
            .await
            .map_err(ServiceError::EventError)?;
        info!(project_id = %created.id, "project created");
        Ok(created)
    }

    #[instrument(skip(self, draft), fields(project_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        draft: ProjectDraft,
    ) -> Result<project::Model, ServiceError> {
        validate_dates(&draft)?;
        let existing = self.get(id).await?;

        let mut model: project::ActiveModel = existing.into();
        model.title = Set(draft.title);
        model.description = Set(draft.description);
        model.contracting_company = Set(draft.contracting_company);
        model.start_date = Set(draft.start_date);
        model.end_date = Set(draft.end_date);
        model.budget = Set(draft.budget);
        model.activities = Set(serde_json::to_value(&draft.activities)
            .map_err(|e| ServiceError::InternalError(e.to_string()))?);
        model.updated_at = Set(Utc::now());
        Ok(model.update(self.db_pool.as_ref()).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.get(id).await?;
        Project::delete_by_id(id).exec(self.db_pool.as_ref()).await?;
        self.event_sender
            .send(Event::ProjectDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;
        Ok(())
    }

    /// Append one activity to the project's list.
    #[instrument(skip(self, activity), fields(project_id = %id))]
    pub async fn add_activity(
        &self,
        id: Uuid,
        activity: Activity,
    ) -> Result<project::Model, ServiceError> {
        if activity.start_date > activity.end_date {
            return Err(ServiceError::ValidationError(
                "activity start date must not be after its end date".into(),
            ));
        }

        let existing = self.get(id).await?;
        let mut activities = existing.activity_list();
        activities.push(activity);
        self.store_activities(existing, activities).await
    }

    /// Flip one activity's done flag, addressed by position.
    #[instrument(skip(self), fields(project_id = %id, index))]
    pub async fn set_activity_done(
        &self,
        id: Uuid,
        index: usize,
        done: bool,
    ) -> Result<project::Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut activities = existing.activity_list();
        let activity = activities.get_mut(index).ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "activity index {} out of range (project has {})",
                index,
                existing.activity_list().len()
            ))
        })?;
        activity.done = done;
        self.store_activities(existing, activities).await
    }

    async fn store_activities(
        &self,
        existing: project::Model,
        activities: Vec<Activity>,
    ) -> Result<project::Model, ServiceError> {
        let mut model: project::ActiveModel = existing.into();
        model.activities = Set(serde_json::to_value(&activities)
            .map_err(|e| ServiceError::InternalError(e.to_string()))?);
        model.updated_at = Set(Utc::now());
        Ok(model.update(self.db_pool.as_ref()).await?)
    }
}

fn validate_dates(draft: &ProjectDraft) -> Result<(), ServiceError> {
    if draft.start_date > draft.end_date {
        return Err(ServiceError::ValidationError(
            "project start date must not be after its end date".into(),
        ));
    }
    for activity in &draft.activities {
        if activity.start_date > activity.end_date {
            return Err(ServiceError::ValidationError(format!(
                "activity \"{}\" has its start date after its end date",
                activity.name
            )));
        }
    }
    Ok(())
}
