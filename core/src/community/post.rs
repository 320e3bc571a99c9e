use sqlx::SqlitePool;

use crate::engagement::ledger::{self, TogglePolicy, VoteOutcome};
use crate::engagement::report::{self, ReportOutcome};
use crate::error::{Error, Result};
use crate::models::post::{NewPost, Post, PostStatus, PostUpdate};
use crate::models::user::User;
use crate::subject::{Subject, VoteType};

pub async fn create_post(pool: &SqlitePool, new: NewPost) -> Result<i64> {
    if !User::exists(pool, new.author_id).await? {
        return Err(Error::NotFound("user"));
    }

    let now = chrono::Utc::now().naive_utc();
    let status = if new.draft {
        PostStatus::Draft
    } else {
        PostStatus::Published
    };

    let (id,) = sqlx::query_as::<_, (i64,)>(
        "
        INSERT INTO posts (author_id, category, title, content, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING id
        ",
    )
    .bind(new.author_id)
    .bind(&new.category)
    .bind(&new.title)
    .bind(&new.content)
    .bind(status)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Soft-deleted posts are invisible to detail reads as well as listings.
pub async fn get_post(pool: &SqlitePool, post_id: i64) -> Result<Post> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(pool)
        .await?;

    match post {
        Some(p) if p.status != PostStatus::Deleted => Ok(p),
        _ => Err(Error::NotFound("post")),
    }
}

/// Published posts, newest first. Blank category means no filter.
pub async fn list_posts(
    pool: &SqlitePool,
    category: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>> {
    let limit = if limit <= 0 { 10 } else { limit.min(200) };
    let offset = offset.max(0);
    let category = category.map(str::trim).filter(|c| !c.is_empty());

    let posts = match category {
        Some(category) => {
            sqlx::query_as::<_, Post>(
                "
                SELECT * FROM posts
                WHERE status = $1 AND category = $2
                ORDER BY created_at DESC, id DESC
                LIMIT $3 OFFSET $4
                ",
            )
            .bind(PostStatus::Published)
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Post>(
                "
                SELECT * FROM posts
                WHERE status = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2 OFFSET $3
                ",
            )
            .bind(PostStatus::Published)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(posts)
}

async fn ensure_author(pool: &SqlitePool, post_id: i64, actor_id: i64) -> Result<()> {
    let row = sqlx::query_as::<_, (i64, PostStatus)>(
        "SELECT author_id, status FROM posts WHERE id = $1",
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    match row {
        None => Err(Error::NotFound("post")),
        Some((_, PostStatus::Deleted)) => Err(Error::NotFound("post")),
        Some((author_id, _)) if author_id != actor_id => Err(Error::PermissionDenied),
        Some(_) => Ok(()),
    }
}

pub async fn update_post(
    pool: &SqlitePool,
    post_id: i64,
    actor_id: i64,
    update: PostUpdate,
) -> Result<()> {
    ensure_author(pool, post_id, actor_id).await?;

    sqlx::query(
        "
        UPDATE posts SET
            category = COALESCE($1, category),
            title = COALESCE($2, title),
            content = COALESCE($3, content),
            status = CASE WHEN $4 THEN $5 ELSE status END,
            updated_at = $6
        WHERE id = $7
        ",
    )
    .bind(update.category)
    .bind(update.title)
    .bind(update.content)
    .bind(update.publish)
    .bind(PostStatus::Published)
    .bind(chrono::Utc::now().naive_utc())
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Mark the post deleted and scrub its title and content. The row and the
/// comments/votes referencing it stay, so counters remain consistent.
pub async fn soft_delete_post(pool: &SqlitePool, post_id: i64, actor_id: i64) -> Result<()> {
    ensure_author(pool, post_id, actor_id).await?;

    sqlx::query(
        "
        UPDATE posts SET status = $1, title = '[deleted]', content = '', updated_at = $2
        WHERE id = $3
        ",
    )
    .bind(PostStatus::Deleted)
    .bind(chrono::Utc::now().naive_utc())
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Posts only track likes, so this is the ledger restricted to `LIKE`; a
/// repeat like follows the configured toggle policy.
pub async fn like_post(
    pool: &SqlitePool,
    policy: TogglePolicy,
    post_id: i64,
    user_id: i64,
) -> Result<VoteOutcome> {
    ledger::cast_vote(pool, policy, Subject::post(post_id), user_id, VoteType::Like).await
}

pub async fn report_post(
    pool: &SqlitePool,
    post_id: i64,
    reporter_id: i64,
    reason: &str,
    detail: Option<&str>,
) -> Result<ReportOutcome> {
    report::report_subject(pool, Subject::post(post_id), reporter_id, reason, detail).await
}
