use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(FromRow, Debug, Serialize, Clone)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub category: String,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// `Deleted` is a dedicated soft-delete marker. A deleted post disappears
/// from published listings and detail reads but its row stays so comments
/// and votes referencing it remain consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PostStatus {
    Draft,
    Published,
    Deleted,
}

#[derive(Debug)]
pub struct NewPost {
    pub author_id: i64,
    pub category: String,
    pub title: String,
    pub content: String,
    /// Drafts are kept out of published listings until published.
    pub draft: bool,
}

/// Fields a post author may change. `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct PostUpdate {
    pub category: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    /// Promote a draft to `Published`.
    pub publish: bool,
}
