use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::models::user::User;
use crate::subject::Subject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportOutcome {
    Created(i64),
    /// This reporter already reported this subject. Not an error: repeat
    /// reports are documented idempotent no-ops.
    AlreadyReported,
}

/// File a report against a subject. At most one report is stored per
/// (subject, reporter); a duplicate attempt leaves the stored report
/// untouched and returns `AlreadyReported`. The reason is free text and is
/// stored as submitted.
pub async fn report_subject(
    pool: &SqlitePool,
    subject: Subject,
    reporter_id: i64,
    reason: &str,
    detail: Option<&str>,
) -> Result<ReportOutcome> {
    if !User::exists(pool, reporter_id).await? {
        return Err(Error::NotFound("user"));
    }
    if !subject.exists(pool).await? {
        return Err(Error::NotFound(subject.kind.name()));
    }

    // The unique constraint does the deduplication; on conflict the insert
    // is a no-op and RETURNING yields no row.
    let inserted = sqlx::query_as::<_, (i64,)>(
        "
        INSERT INTO reports (subject_type, subject_id, reporter_id, reason, detail, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (subject_type, subject_id, reporter_id) DO NOTHING
        RETURNING id
        ",
    )
    .bind(subject.kind)
    .bind(subject.id)
    .bind(reporter_id)
    .bind(reason)
    .bind(detail)
    .bind(chrono::Utc::now().naive_utc())
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some((id,)) => Ok(ReportOutcome::Created(id)),
        None => {
            tracing::debug!(
                subject_type = subject.kind.name(),
                subject_id = subject.id,
                reporter_id,
                "duplicate report ignored"
            );
            Ok(ReportOutcome::AlreadyReported)
        }
    }
}
