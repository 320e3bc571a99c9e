use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::subject::{SubjectType, VoteType};

#[derive(FromRow, Debug, Serialize, Clone)]
pub struct Vote {
    pub id: i64,
    pub subject_type: SubjectType,
    pub subject_id: i64,
    pub user_id: i64,
    pub vote_type: VoteType,
    pub created_at: NaiveDateTime,
}
