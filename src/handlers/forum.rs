use crate::{
    entities::{forum_comment, forum_post},
    errors::ServiceError,
    handlers::common::{collection, created, success, validate_input},
    services::forum::PostDraft,
    AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{delete, get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Titles and bodies made only of digits carry no content.
fn not_digits_only(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        let mut err = ValidationError::new("digits_only");
        err.message = Some("cannot be only numbers".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<forum_comment::Model>>,
}

impl PostResponse {
    fn new(post: forum_post::Model, comments: Option<Vec<forum_comment::Model>>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author,
            image_url: post.image_url,
            created_at: post.created_at,
            updated_at: post.updated_at,
            comments,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostRequest {
    #[validate(
        length(min = 5, max = 200, message = "title must be 5 to 200 characters"),
        custom = "not_digits_only"
    )]
    pub title: String,
    #[validate(
        length(min = 10, max = 3000, message = "content must be 10 to 3000 characters"),
        custom = "not_digits_only"
    )]
    pub content: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    pub image_url: Option<String>,
}

impl From<PostRequest> for PostDraft {
    fn from(req: PostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            author: req.author,
            image_url: req.image_url.filter(|u| !u.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CommentRequest {
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    #[validate(length(min = 8, max = 3000, message = "comment must be 8 to 3000 characters"))]
    pub content: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
        .route("/author/:author", get(posts_by_author))
        .route("/:id/comments", put(add_comment))
        .route("/:id/comments/:comment_id", delete(delete_comment))
}

pub async fn list_posts(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let posts = state.services.forum.list().await?;
    Ok(collection(
        posts
            .into_iter()
            .map(|p| PostResponse::new(p, None))
            .collect::<Vec<_>>(),
    ))
}

pub async fn posts_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> Result<Response, ServiceError> {
    let posts = state.services.forum.by_author(&author).await?;
    Ok(collection(
        posts
            .into_iter()
            .map(|p| PostResponse::new(p, None))
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let (post, comments) = state.services.forum.get(id).await?;
    Ok(success(PostResponse::new(post, Some(comments))))
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(req): Json<PostRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let post = state.services.forum.create(req.into()).await?;
    Ok(created(PostResponse::new(post, None)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PostRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let post = state.services.forum.update(id, req.into()).await?;
    Ok(success(PostResponse::new(post, None)))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    state.services.forum.delete(id).await?;
    Ok(success(serde_json::json!({ "id": id })))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let comment = state
        .services
        .forum
        .comment(id, req.author, req.content)
        .await?;
    Ok(created(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, ServiceError> {
    state.services.forum.delete_comment(id, comment_id).await?;
    Ok(success(serde_json::json!({ "id": id, "comment_id": comment_id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only_titles_are_rejected() {
        let req = PostRequest {
            title: "1234567890".into(),
            content: "a perfectly fine body of text".into(),
            author: "maria".into(),
            image_url: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn mixed_title_passes() {
        let req = PostRequest {
            title: "Safety briefing notes 2024".into(),
            content: "minutes from the morning meeting".into(),
            author: "maria".into(),
            image_url: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn short_comment_is_rejected() {
        let req = CommentRequest {
            author: "jose".into(),
            content: "ok".into(),
        };
        assert!(req.validate().is_err());
    }
}
