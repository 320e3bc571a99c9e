#![allow(dead_code)]

use community_core::{db, Config, Subject, TogglePolicy};
use sqlx::SqlitePool;
use tempfile::TempDir;

pub struct TestDb {
    pub pool: SqlitePool,
    // Held so the database file outlives the test.
    _dir: TempDir,
}

pub async fn setup() -> TestDb {
    community_core::init_tracing();

    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        database_url: format!("sqlite://{}", dir.path().join("test.db").display()),
        max_connections: 5,
        toggle_policy: TogglePolicy::Keep,
    };

    let pool = db::connect(&config).await.expect("connect");
    db::bootstrap(&pool).await.expect("bootstrap");

    TestDb { pool, _dir: dir }
}

pub async fn user(db: &TestDb, nickname: &str) -> i64 {
    community_core::users::create_user(&db.pool, nickname)
        .await
        .expect("create user")
}

pub async fn faq(db: &TestDb) -> i64 {
    community_core::faq::create_faq(
        &db.pool,
        community_core::models::faq::NewFaq {
            question: "Which bin for glass?".into(),
            answer: "The glass bin.".into(),
            waste_type: "glass".into(),
            category: "recycling".into(),
        },
    )
    .await
    .expect("create faq")
}

pub async fn post(db: &TestDb, author_id: i64) -> i64 {
    community_core::community::post::create_post(
        &db.pool,
        community_core::models::post::NewPost {
            author_id,
            category: "free".into(),
            title: "hello".into(),
            content: "first post".into(),
            draft: false,
        },
    )
    .await
    .expect("create post")
}

pub async fn vote_rows(db: &TestDb, subject: Subject, user_id: i64) -> i64 {
    sqlx::query_as::<_, (i64,)>(
        "
        SELECT COUNT(*) FROM votes
        WHERE subject_type = $1 AND subject_id = $2 AND user_id = $3
        ",
    )
    .bind(subject.kind)
    .bind(subject.id)
    .bind(user_id)
    .fetch_one(&db.pool)
    .await
    .expect("count votes")
    .0
}

pub async fn faq_counts(db: &TestDb, faq_id: i64) -> (i64, i64) {
    sqlx::query_as::<_, (i64, i64)>("SELECT like_count, dislike_count FROM faqs WHERE id = $1")
        .bind(faq_id)
        .fetch_one(&db.pool)
        .await
        .expect("faq counts")
}

pub async fn post_counts(db: &TestDb, post_id: i64) -> (i64, i64) {
    sqlx::query_as::<_, (i64, i64)>("SELECT like_count, comment_count FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_one(&db.pool)
        .await
        .expect("post counts")
}
