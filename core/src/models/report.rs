use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::subject::SubjectType;

#[derive(FromRow, Debug, Serialize, Clone)]
pub struct Report {
    pub id: i64,
    pub subject_type: SubjectType,
    pub subject_id: i64,
    pub reporter_id: i64,
    /// Free text, stored as submitted. Unlike vote types there is no
    /// normalization step for report reasons.
    pub reason: String,
    pub detail: Option<String>,
    pub created_at: NaiveDateTime,
}
