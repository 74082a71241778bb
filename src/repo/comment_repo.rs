use crate::db::DbPool;
use crate::models::{Comment, NewComment, Post};
use crate::schema::{comments, users};
use diesel::prelude::*;
use anyhow::Result;
use tracing::{instrument, debug, info};

/// Adds a comment to a post
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `post_id` - The post being commented on
/// * `user_id` - The commenting user
/// * `text` - Comment body
///
/// ### Returns
///
/// A Result containing the newly created Comment
#[instrument(skip(pool, text), fields(post_id = %post_id, user_id = %user_id))]
pub fn create_comment(pool: &DbPool, post_id: i32, user_id: i32, text: String) -> Result<Comment> {
    let conn = &mut pool.get()?;

    let comment = diesel::insert_into(comments::table)
        .values(NewComment::new(post_id, user_id, text))
        .returning(Comment::as_returning())
        .get_result(conn)?;

    info!("Successfully created comment with id: {}", comment.get_id());

    Ok(comment)
}

/// Retrieves a comment by its ID
#[instrument(skip(pool), fields(comment_id = %comment_id))]
pub fn get_comment(pool: &DbPool, comment_id: i32) -> Result<Option<Comment>> {
    let conn = &mut pool.get()?;

    let result = comments::table
        .find(comment_id)
        .select(Comment::as_select())
        .first(conn)
        .optional()?;

    if result.is_none() {
        debug!("Comment not found");
    }

    Ok(result)
}

/// Lists a post's comments with their authors' usernames, newest first
#[instrument(skip(pool, post), fields(post_id = %post.get_id()))]
pub fn list_comments_for_post(pool: &DbPool, post: &Post) -> Result<Vec<(Comment, String)>> {
    let conn = &mut pool.get()?;

    let result = Comment::belonging_to(post)
        .inner_join(users::table)
        .select((Comment::as_select(), users::username))
        .order((comments::created_at.desc(), comments::id.desc()))
        .load::<(Comment, String)>(conn)?;

    debug!("Retrieved {} comments", result.len());

    Ok(result)
}

/// Deletes a comment
///
/// ### Returns
///
/// Whether the comment existed
#[instrument(skip(pool), fields(comment_id = %comment_id))]
pub fn delete_comment(pool: &DbPool, comment_id: i32) -> Result<bool> {
    let conn = &mut pool.get()?;

    let deleted = diesel::delete(comments::table.find(comment_id)).execute(conn)?;

    Ok(deleted > 0)
}
