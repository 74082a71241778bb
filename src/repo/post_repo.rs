use crate::db::DbPool;
use crate::models::{NewPost, Post, PostLike, User};
use crate::schema::{comments, post_likes, posts, users};
use diesel::dsl::count_star;
use diesel::prelude::*;
use anyhow::Result;
use std::collections::HashMap;
use tracing::{instrument, debug, info};

/// A post as it appears in listings: with its author's username and
/// its like and comment counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub post: Post,
    pub author: String,
    pub total_likes: i64,
    pub total_comments: i64,
}

/// Outcome of toggling a like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    /// Whether the user likes the post after the toggle
    pub liked: bool,
    pub total_likes: i64,
}

/// Creates a new post
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `author_id` - The user writing the post
/// * `title` - Post title
/// * `content` - Post body
///
/// ### Returns
///
/// A Result containing the newly created Post
#[instrument(skip(pool, content), fields(author_id = %author_id, title = %title))]
pub fn create_post(pool: &DbPool, author_id: i32, title: String, content: String) -> Result<Post> {
    debug!("Creating new post");

    let conn = &mut pool.get()?;

    let post = diesel::insert_into(posts::table)
        .values(NewPost::new(author_id, title, content))
        .returning(Post::as_returning())
        .get_result(conn)?;

    info!("Successfully created post with id: {}", post.get_id());

    Ok(post)
}

/// Retrieves a post by its ID
#[instrument(skip(pool), fields(post_id = %post_id))]
pub fn get_post(pool: &DbPool, post_id: i32) -> Result<Option<Post>> {
    let conn = &mut pool.get()?;

    let result = posts::table
        .find(post_id)
        .select(Post::as_select())
        .first(conn)
        .optional()?;

    if result.is_none() {
        debug!("Post not found");
    }

    Ok(result)
}

/// Retrieves a post together with its author
#[instrument(skip(pool), fields(post_id = %post_id))]
pub fn get_post_with_author(pool: &DbPool, post_id: i32) -> Result<Option<(Post, User)>> {
    let conn = &mut pool.get()?;

    let result = posts::table
        .inner_join(users::table)
        .filter(posts::id.eq(post_id))
        .select((Post::as_select(), User::as_select()))
        .first::<(Post, User)>(conn)
        .optional()?;

    Ok(result)
}

/// Replaces a post's title and content
///
/// ### Errors
///
/// Returns an error if the post does not exist
#[instrument(skip(pool, content), fields(post_id = %post_id))]
pub fn update_post(pool: &DbPool, post_id: i32, title: String, content: String) -> Result<Post> {
    debug!("Updating post");

    let conn = &mut pool.get()?;

    let post = diesel::update(posts::table.find(post_id))
        .set((posts::title.eq(title), posts::content.eq(content)))
        .returning(Post::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| anyhow::anyhow!("Post with id {} not found", post_id))?;

    info!("Updated post {}", post_id);

    Ok(post)
}

/// Deletes a post together with its comments and likes
///
/// Dependents are removed explicitly inside the same transaction, so the
/// cascade does not rely on SQLite's foreign key enforcement being enabled.
///
/// ### Returns
///
/// Whether the post existed
#[instrument(skip(pool), fields(post_id = %post_id))]
pub fn delete_post(pool: &DbPool, post_id: i32) -> Result<bool> {
    let conn = &mut pool.get()?;

    let deleted = conn.transaction::<_, anyhow::Error, _>(|conn| {
        let removed_comments = diesel::delete(comments::table.filter(comments::post_id.eq(post_id)))
            .execute(conn)?;
        let removed_likes = diesel::delete(post_likes::table.filter(post_likes::post_id.eq(post_id)))
            .execute(conn)?;
        let removed_posts = diesel::delete(posts::table.find(post_id)).execute(conn)?;

        debug!(
            "Removed {} comments and {} likes with post {}",
            removed_comments, removed_likes, post_id
        );

        Ok(removed_posts > 0)
    })?;

    if deleted {
        info!("Deleted post {}", post_id);
    }

    Ok(deleted)
}

/// Counts all posts
pub fn count_posts(pool: &DbPool) -> Result<i64> {
    let conn = &mut pool.get()?;

    let total = posts::table.count().get_result(conn)?;

    Ok(total)
}

/// Loads one page of posts, newest first, with authors and counts
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `offset` - Number of posts to skip
/// * `limit` - Maximum number of posts to return
#[instrument(skip(pool))]
pub fn list_post_summaries(pool: &DbPool, offset: i64, limit: i64) -> Result<Vec<PostSummary>> {
    let conn = &mut pool.get()?;

    let rows = posts::table
        .inner_join(users::table)
        .select((Post::as_select(), users::username))
        .order((posts::created_at.desc(), posts::id.desc()))
        .offset(offset)
        .limit(limit)
        .load::<(Post, String)>(conn)?;

    let ids: Vec<i32> = rows.iter().map(|(post, _)| post.get_id()).collect();

    let like_counts: HashMap<i32, i64> = post_likes::table
        .filter(post_likes::post_id.eq_any(ids.clone()))
        .group_by(post_likes::post_id)
        .select((post_likes::post_id, count_star()))
        .load::<(i32, i64)>(conn)?
        .into_iter()
        .collect();

    let comment_counts: HashMap<i32, i64> = comments::table
        .filter(comments::post_id.eq_any(ids))
        .group_by(comments::post_id)
        .select((comments::post_id, count_star()))
        .load::<(i32, i64)>(conn)?
        .into_iter()
        .collect();

    let summaries: Vec<PostSummary> = rows
        .into_iter()
        .map(|(post, author)| {
            let id = post.get_id();
            PostSummary {
                post,
                author,
                total_likes: like_counts.get(&id).copied().unwrap_or(0),
                total_comments: comment_counts.get(&id).copied().unwrap_or(0),
            }
        })
        .collect();

    debug!("Loaded {} post summaries", summaries.len());

    Ok(summaries)
}

/// Counts the likes on a post
pub fn count_likes(pool: &DbPool, post_id: i32) -> Result<i64> {
    let conn = &mut pool.get()?;

    let total = post_likes::table
        .filter(post_likes::post_id.eq(post_id))
        .count()
        .get_result(conn)?;

    Ok(total)
}

/// Flips whether a user likes a post
///
/// Removes the like if it exists, adds it otherwise. Calling this twice
/// returns the post to its original state.
///
/// ### Returns
///
/// The resulting liked state and like count
#[instrument(skip(pool), fields(post_id = %post_id, user_id = %user_id))]
pub fn toggle_like(pool: &DbPool, post_id: i32, user_id: i32) -> Result<LikeToggle> {
    let conn = &mut pool.get()?;

    let toggle = conn.transaction::<_, anyhow::Error, _>(|conn| {
        let removed = diesel::delete(post_likes::table.find((post_id, user_id))).execute(conn)?;

        let liked = if removed == 0 {
            diesel::insert_into(post_likes::table)
                .values(PostLike::new(post_id, user_id))
                .execute(conn)?;
            true
        } else {
            false
        };

        let total_likes = post_likes::table
            .filter(post_likes::post_id.eq(post_id))
            .count()
            .get_result(conn)?;

        Ok(LikeToggle { liked, total_likes })
    })?;

    debug!("Post {} liked: {}, total likes: {}", post_id, toggle.liked, toggle.total_likes);

    Ok(toggle)
}
