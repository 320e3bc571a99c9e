use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::error::Result;

pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .idle_timeout(Duration::from_secs(120))
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Statements are idempotent so bootstrap can run on every startup. The
/// unique constraints on `votes` and `reports` are load-bearing: they are
/// what collapses concurrent duplicate attempts into one logical effect.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        nickname    TEXT NOT NULL,
        created_at  TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS faqs (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        question       TEXT NOT NULL,
        answer         TEXT NOT NULL,
        waste_type     TEXT NOT NULL,
        category       TEXT NOT NULL,
        like_count     INTEGER NOT NULL DEFAULT 0,
        dislike_count  INTEGER NOT NULL DEFAULT 0,
        created_at     TIMESTAMP NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_faqs_category ON faqs (category)",
    "CREATE TABLE IF NOT EXISTS posts (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        author_id      INTEGER NOT NULL REFERENCES users (id),
        category       TEXT NOT NULL,
        title          TEXT NOT NULL,
        content        TEXT NOT NULL,
        status         TEXT NOT NULL,
        like_count     INTEGER NOT NULL DEFAULT 0,
        comment_count  INTEGER NOT NULL DEFAULT 0,
        created_at     TIMESTAMP NOT NULL,
        updated_at     TIMESTAMP NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_posts_status_created
        ON posts (status, created_at)",
    "CREATE TABLE IF NOT EXISTS comments (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id     INTEGER NOT NULL REFERENCES posts (id),
        author_id   INTEGER NOT NULL REFERENCES users (id),
        parent_id   INTEGER REFERENCES comments (id),
        content     TEXT NOT NULL,
        like_count  INTEGER NOT NULL DEFAULT 0,
        created_at  TIMESTAMP NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_comments_post ON comments (post_id)",
    "CREATE TABLE IF NOT EXISTS votes (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        subject_type  TEXT NOT NULL,
        subject_id    INTEGER NOT NULL,
        user_id       INTEGER NOT NULL REFERENCES users (id),
        vote_type     TEXT NOT NULL,
        created_at    TIMESTAMP NOT NULL,
        UNIQUE (subject_type, subject_id, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS reports (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        subject_type  TEXT NOT NULL,
        subject_id    INTEGER NOT NULL,
        reporter_id   INTEGER NOT NULL REFERENCES users (id),
        reason        TEXT NOT NULL,
        detail        TEXT,
        created_at    TIMESTAMP NOT NULL,
        UNIQUE (subject_type, subject_id, reporter_id)
    )",
    "CREATE TABLE IF NOT EXISTS faq_feedback (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        faq_id      INTEGER NOT NULL REFERENCES faqs (id),
        user_id     INTEGER REFERENCES users (id),
        reason      TEXT NOT NULL,
        detail      TEXT,
        created_at  TIMESTAMP NOT NULL
    )",
];

pub async fn bootstrap(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
