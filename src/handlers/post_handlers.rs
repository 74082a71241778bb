use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{instrument, debug, info, warn};

use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::dto::{
    CommentView, LikeResponse, MessageResponse, PaginationView, PostDetail, PostDetailView, PostDto,
    PostList, PostListItem, PostResponse, PostView, PostsQuery,
};
use crate::errors::ApiError;
use crate::extract::{BlogJson, BlogJsonRejection, IdPath};
use crate::models::Post;
use crate::pagination::{parse_per_page, Paginator};
use crate::repo;

/// Loads a post or answers 404
fn find_post(pool: &DbPool, post_id: i32) -> Result<Post, ApiError> {
    repo::get_post(pool, post_id)
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::not_found("Post not found"))
}

/// Handler for creating a post as the logged-in user
///
/// This function handles POST requests to `/api/create-post/`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `current_user` - The author, from the session cookie
/// * `payload` - Title and content
///
/// ### Returns
///
/// 201 with the new post
#[instrument(skip(pool, current_user, payload), fields(user_id = %current_user.id()))]
pub async fn create_post_handler(
    State(pool): State<Arc<DbPool>>,
    current_user: CurrentUser,
    BlogJson(payload): BlogJson<PostDto>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let (title, content) = payload.validate()?;

    let post = repo::create_post(&pool, current_user.id(), title, content).map_err(ApiError::Database)?;

    info!("User {} created post {}", current_user.id(), post.get_id());

    Ok((
        StatusCode::CREATED,
        Json(PostResponse {
            message: "Post created successfully",
            post: PostView::new(&post, current_user.user().get_username(), 0),
        }),
    ))
}

/// Handler for listing posts a page at a time, newest first
///
/// This function handles GET requests to `/api/posts/?page=&limit=`.
///
/// Bad `page` or `limit` values never fail the request; see
/// [`crate::pagination`].
#[instrument(skip(pool))]
pub async fn list_posts_handler(
    State(pool): State<Arc<DbPool>>,
    query: Result<Query<PostsQuery>, QueryRejection>,
) -> Result<Json<PostList>, ApiError> {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let per_page = parse_per_page(query.limit.as_deref());
    let total = repo::count_posts(&pool).map_err(ApiError::Database)?;
    let page = Paginator::new(total, per_page).page_from_query(query.page.as_deref());

    let posts: Vec<PostListItem> = repo::list_post_summaries(&pool, page.offset, page.limit)
        .map_err(ApiError::Database)?
        .into_iter()
        .map(PostListItem::from)
        .collect();

    debug!("Page {} of {} holds {} posts", page.number, page.total_pages, posts.len());

    Ok(Json(PostList {
        posts,
        pagination: PaginationView::from(&page),
    }))
}

/// Handler for a single post with its comments
///
/// This function handles GET requests to `/api/post/{post_id}/`.
#[instrument(skip(pool))]
pub async fn get_post_detail_handler(
    State(pool): State<Arc<DbPool>>,
    IdPath(post_id): IdPath<i32>,
) -> Result<Json<PostDetail>, ApiError> {
    let (post, author) = repo::get_post_with_author(&pool, post_id)
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let total_likes = repo::count_likes(&pool, post_id).map_err(ApiError::Database)?;
    let comments = repo::list_comments_for_post(&pool, &post)
        .map_err(ApiError::Database)?
        .into_iter()
        .map(|(comment, username)| CommentView::new(&comment, username))
        .collect();

    Ok(Json(PostDetail {
        post: PostDetailView {
            post: PostView::new(&post, author.get_username(), total_likes),
            comments,
        },
    }))
}

/// Handler for toggling the current user's like on a post
///
/// This function handles POST requests to `/api/post/{post_id}/like/`.
#[instrument(skip(pool, current_user), fields(user_id = %current_user.id()))]
pub async fn like_post_handler(
    State(pool): State<Arc<DbPool>>,
    current_user: CurrentUser,
    IdPath(post_id): IdPath<i32>,
) -> Result<Json<LikeResponse>, ApiError> {
    let post = find_post(&pool, post_id)?;

    let toggle = repo::toggle_like(&pool, post.get_id(), current_user.id()).map_err(ApiError::Database)?;

    Ok(Json(LikeResponse {
        message: if toggle.liked { "Post liked" } else { "Post unliked" },
        liked: toggle.liked,
        total_likes: toggle.total_likes,
    }))
}

/// Handler for editing a post's title and content
///
/// This function handles PUT requests to `/api/post/{post_id}/edit/`.
///
/// Only the author may edit. The body is only read once the post is known
/// to exist and belong to the caller.
#[instrument(skip(pool, current_user, payload), fields(user_id = %current_user.id()))]
pub async fn edit_post_handler(
    State(pool): State<Arc<DbPool>>,
    current_user: CurrentUser,
    IdPath(post_id): IdPath<i32>,
    payload: Result<BlogJson<PostDto>, BlogJsonRejection>,
) -> Result<Json<PostResponse>, ApiError> {
    let (post, author) = repo::get_post_with_author(&pool, post_id)
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    if !post.is_authored_by(current_user.id()) {
        warn!("User {} may not edit post {}", current_user.id(), post_id);
        return Err(ApiError::Forbidden);
    }

    let BlogJson(payload) = payload?;
    let (title, content) = payload.validate()?;

    let post = repo::update_post(&pool, post_id, title, content).map_err(ApiError::Database)?;
    let total_likes = repo::count_likes(&pool, post_id).map_err(ApiError::Database)?;

    info!("Post {} updated", post_id);

    Ok(Json(PostResponse {
        message: "Post updated successfully",
        post: PostView::new(&post, author.get_username(), total_likes),
    }))
}

/// Handler for deleting a post with its comments and likes
///
/// This function handles DELETE requests to `/api/post/{post_id}/delete/`.
#[instrument(skip(pool, current_user), fields(user_id = %current_user.id()))]
pub async fn delete_post_handler(
    State(pool): State<Arc<DbPool>>,
    current_user: CurrentUser,
    IdPath(post_id): IdPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let post = find_post(&pool, post_id)?;

    if !post.is_authored_by(current_user.id()) {
        warn!("User {} may not delete post {}", current_user.id(), post_id);
        return Err(ApiError::Forbidden);
    }

    repo::delete_post(&pool, post_id).map_err(ApiError::Database)?;

    info!("Post {} deleted", post_id);

    Ok(Json(MessageResponse { message: "Post deleted successfully" }))
}
