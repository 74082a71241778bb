use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{instrument, info, warn};

use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::dto::{CommentDto, CommentResponse, CommentView, MessageResponse};
use crate::errors::ApiError;
use crate::extract::{BlogJson, BlogJsonRejection, IdPath};
use crate::repo;

/// Handler for commenting on a post as the logged-in user
///
/// This function handles POST requests to `/api/post/{post_id}/comment/`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `current_user` - The commenter, from the session cookie
/// * `post_id` - The post being commented on
/// * `payload` - The comment text; read only after the post is found
///
/// ### Returns
///
/// 201 with the new comment
#[instrument(skip(pool, current_user, payload), fields(user_id = %current_user.id()))]
pub async fn add_comment_handler(
    State(pool): State<Arc<DbPool>>,
    current_user: CurrentUser,
    IdPath(post_id): IdPath<i32>,
    payload: Result<BlogJson<CommentDto>, BlogJsonRejection>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let post = repo::get_post(&pool, post_id)
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let BlogJson(payload) = payload?;
    let text = payload.validate()?;

    let comment = repo::create_comment(&pool, post.get_id(), current_user.id(), text)
        .map_err(ApiError::Database)?;

    info!("Comment {} added to post {}", comment.get_id(), post_id);

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            message: "Comment added successfully",
            comment: CommentView::new(&comment, current_user.user().get_username()),
        }),
    ))
}

/// Handler for deleting one's own comment
///
/// This function handles DELETE requests to `/api/comment/{comment_id}/delete/`.
///
/// Only the comment's writer may delete it; owning the post is not enough.
#[instrument(skip(pool, current_user), fields(user_id = %current_user.id()))]
pub async fn delete_comment_handler(
    State(pool): State<Arc<DbPool>>,
    current_user: CurrentUser,
    IdPath(comment_id): IdPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let comment = repo::get_comment(&pool, comment_id)
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    if !comment.is_authored_by(current_user.id()) {
        warn!("User {} may not delete comment {}", current_user.id(), comment_id);
        return Err(ApiError::Forbidden);
    }

    repo::delete_comment(&pool, comment_id).map_err(ApiError::Database)?;

    info!("Comment {} deleted", comment_id);

    Ok(Json(MessageResponse { message: "Comment deleted successfully" }))
}
