use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{Executor, FromRow, Sqlite};

use crate::error::Result;

/// Mirror of the accounts the auth collaborator manages. This core never
/// authenticates; it only resolves ids against this table.
#[derive(FromRow, Debug, Serialize, Clone)]
pub struct User {
    pub id: i64,
    pub nickname: String,
    pub created_at: NaiveDateTime,
}

impl User {
    pub async fn exists<'a, E>(executor: E, id: i64) -> Result<bool>
    where
        E: Executor<'a, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, (bool,)>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(executor)
        .await?;

        Ok(row.0)
    }
}
