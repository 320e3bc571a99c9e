use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(FromRow, Debug, Serialize, Clone)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub waste_type: String,
    pub category: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    pub waste_type: String,
    pub category: String,
}
