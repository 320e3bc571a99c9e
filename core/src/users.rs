use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::models::user::User;

/// Mirror an account resolved by the auth collaborator. Signup and
/// credentials live outside this core; only the id and display name are
/// kept here so operations can resolve caller identities.
pub async fn create_user(pool: &SqlitePool, nickname: &str) -> Result<i64> {
    let (id,) = sqlx::query_as::<_, (i64,)>(
        "INSERT INTO users (nickname, created_at) VALUES ($1, $2) RETURNING id",
    )
    .bind(nickname)
    .bind(chrono::Utc::now().naive_utc())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(Error::NotFound("user"))
}
