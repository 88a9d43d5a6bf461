use crate::{
    db::DbPool,
    entities::{
        forum_comment::{self, Entity as ForumComment},
        forum_post::{self, Entity as ForumPost},
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub author: String,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct ForumService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl ForumService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<forum_post::Model>, ServiceError> {
        let posts = ForumPost::find()
            .order_by_desc(forum_post::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(posts)
    }

    #[instrument(skip(self))]
    pub async fn by_author(&self, author: &str) -> Result<Vec<forum_post::Model>, ServiceError> {
        let posts = ForumPost::find()
            .filter(forum_post::Column::Author.eq(author))
            .order_by_desc(forum_post::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(posts)
    }

    #[instrument(skip(self))]
    pub async fn get(
        &self,
        id: Uuid,
    ) -> Result<(forum_post::Model, Vec<forum_comment::Model>), ServiceError> {
        let db = self.db_pool.as_ref();
        let post = self.find_post(id).await?;
        let comments = post
            .find_related(ForumComment)
            .order_by_asc(forum_comment::Column::CreatedAt)
            .all(db)
            .await?;
        Ok((post, comments))
    }

    #[instrument(skip(self, draft), fields(author = %draft.author))]
    pub async fn create(&self, draft: PostDraft) -> Result<forum_post::Model, ServiceError> {
        let now = Utc::now();
        let created = forum_post::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(draft.title),
            content: Set(draft.content),
            author: Set(draft.author),
            image_url: Set(draft.image_url),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db_pool.as_ref())
        .await?;

        self.event_sender
            .send(Event::ForumPostCreated(created.id))
            .await
            .map_err(ServiceError::EventError)?;
        info!(post_id = %created.id, "forum post created");
        Ok(created)
    }

    #[instrument(skip(self, draft), fields(post_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        draft: PostDraft,
    ) -> Result<forum_post::Model, ServiceError> {
        let existing = self.find_post(id).await?;
        let mut model: forum_post::ActiveModel = existing.into();
        model.title = Set(draft.title);
        model.content = Set(draft.content);
        model.author = Set(draft.author);
        model.image_url = Set(draft.image_url);
        model.updated_at = Set(Utc::now());
        Ok(model.update(self.db_pool.as_ref()).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();
        self.find_post(id).await?;
        ForumComment::delete_many()
            .filter(forum_comment::Column::PostId.eq(id))
            .exec(db)
            .await?;
        ForumPost::delete_by_id(id).exec(db).await?;
        self.event_sender
            .send(Event::ForumPostDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;
        Ok(())
    }

    #[instrument(skip(self, content), fields(post_id = %id, author = %author))]
    pub async fn comment(
        &self,
        id: Uuid,
        author: String,
        content: String,
    ) -> Result<forum_comment::Model, ServiceError> {
        self.find_post(id).await?;
        let comment = forum_comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            post_id: Set(id),
            author: Set(author),
            content: Set(content),
            created_at: Set(Utc::now()),
        }
        .insert(self.db_pool.as_ref())
        .await?;
        Ok(comment)
    }

    #[instrument(skip(self), fields(post_id = %post_id, comment_id = %comment_id))]
    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();
        let comment = ForumComment::find_by_id(comment_id)
            .filter(forum_comment::Column::PostId.eq(post_id))
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Comment {} not found on post {}",
                    comment_id, post_id
                ))
            })?;
        ForumComment::delete_by_id(comment.id).exec(db).await?;
        Ok(())
    }

    async fn find_post(&self, id: Uuid) -> Result<forum_post::Model, ServiceError> {
        ForumPost::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Forum post {} not found", id)))
    }
}
