use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(FromRow, Debug, Serialize, Clone)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub like_count: i64,
    pub created_at: NaiveDateTime,
}

/// One node of the comment forest returned to the API layer: a comment plus
/// its replies, each level ordered by creation time ascending.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CommentNode {
    pub id: i64,
    pub author_id: i64,
    pub writer: String,
    pub content: String,
    pub like_count: i64,
    pub created_at: NaiveDateTime,
    pub children: Vec<CommentNode>,
}
