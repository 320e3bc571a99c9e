use serde::Serialize;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::engagement::counter::{self, CounterField};
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::subject::{Subject, VoteType};

/// What a repeat of the user's current vote does. Fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TogglePolicy {
    /// Repeating the current vote is a no-op. This matches the original
    /// FAQ voting behavior.
    #[default]
    Keep,
    /// Repeating the current vote removes it (toggle off) and decrements
    /// its bucket.
    Retract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VoteOutcome {
    /// First vote by this user on this subject.
    Applied(VoteType),
    /// The existing vote changed type. Total votes for the subject are
    /// conserved: old bucket decremented, new bucket incremented.
    Switched { from: VoteType, to: VoteType },
    /// Repeat of the current vote under `TogglePolicy::Keep`.
    Unchanged(VoteType),
    /// Repeat of the current vote under `TogglePolicy::Retract`.
    Retracted(VoteType),
}

fn bucket(vote: VoteType) -> CounterField {
    match vote {
        VoteType::Like => CounterField::Likes,
        VoteType::Dislike => CounterField::Dislikes,
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err.as_database_error().map(|e| e.kind()),
        Some(sqlx::error::ErrorKind::UniqueViolation)
    )
}

/// Cast a vote on a subject, keeping the subject's counters in sync with
/// the vote rows inside one transaction. At most one vote row ever exists
/// per (subject, user); the unique constraint on `votes` is the
/// serialization point under races, and losing the insert race downgrades
/// to the update path instead of surfacing an error.
pub async fn cast_vote(
    pool: &SqlitePool,
    policy: TogglePolicy,
    subject: Subject,
    user_id: i64,
    requested: VoteType,
) -> Result<VoteOutcome> {
    let requested = subject.kind.normalize_vote(requested);

    let mut tx = pool.begin().await?;

    if !User::exists(&mut *tx, user_id).await? {
        return Err(Error::NotFound("user"));
    }
    if !subject.exists(&mut *tx).await? {
        return Err(Error::NotFound(subject.kind.name()));
    }

    let existing = current_vote(&mut tx, subject, user_id).await?;

    let outcome = match existing {
        None => match insert_vote(&mut tx, subject, user_id, requested).await {
            Ok(()) => {
                counter::apply_delta(&mut tx, subject, bucket(requested), 1).await?;
                VoteOutcome::Applied(requested)
            }
            Err(Error::Unavailable(e)) if is_unique_violation(&e) => {
                // Lost the race to a concurrent first vote. The row exists
                // now, so resolve against it as an update.
                tracing::debug!(
                    subject_type = subject.kind.name(),
                    subject_id = subject.id,
                    user_id,
                    "vote insert hit unique constraint, retrying as update"
                );
                let current = current_vote(&mut tx, subject, user_id)
                    .await?
                    .ok_or(Error::Unavailable(e))?;
                resolve_existing(&mut tx, policy, subject, user_id, current, requested).await?
            }
            Err(e) => return Err(e),
        },
        Some(current) => {
            resolve_existing(&mut tx, policy, subject, user_id, current, requested).await?
        }
    };

    tx.commit().await?;
    Ok(outcome)
}

async fn current_vote(
    tx: &mut Transaction<'_, Sqlite>,
    subject: Subject,
    user_id: i64,
) -> Result<Option<VoteType>> {
    let row = sqlx::query_as::<_, (VoteType,)>(
        "
        SELECT vote_type FROM votes
        WHERE subject_type = $1 AND subject_id = $2 AND user_id = $3
        ",
    )
    .bind(subject.kind)
    .bind(subject.id)
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.map(|r| r.0))
}

async fn insert_vote(
    tx: &mut Transaction<'_, Sqlite>,
    subject: Subject,
    user_id: i64,
    vote: VoteType,
) -> Result<()> {
    sqlx::query(
        "
        INSERT INTO votes (subject_type, subject_id, user_id, vote_type, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind(subject.kind)
    .bind(subject.id)
    .bind(user_id)
    .bind(vote)
    .bind(chrono::Utc::now().naive_utc())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn resolve_existing(
    tx: &mut Transaction<'_, Sqlite>,
    policy: TogglePolicy,
    subject: Subject,
    user_id: i64,
    current: VoteType,
    requested: VoteType,
) -> Result<VoteOutcome> {
    if current == requested {
        return match policy {
            TogglePolicy::Keep => Ok(VoteOutcome::Unchanged(current)),
            TogglePolicy::Retract => {
                sqlx::query(
                    "
                    DELETE FROM votes
                    WHERE subject_type = $1 AND subject_id = $2 AND user_id = $3
                    ",
                )
                .bind(subject.kind)
                .bind(subject.id)
                .bind(user_id)
                .execute(&mut **tx)
                .await?;
                counter::apply_delta(tx, subject, bucket(current), -1).await?;
                Ok(VoteOutcome::Retracted(current))
            }
        };
    }

    // Switch: flip the row's type and move one unit between buckets. The
    // subject's total vote count is unchanged.
    sqlx::query(
        "
        UPDATE votes SET vote_type = $1
        WHERE subject_type = $2 AND subject_id = $3 AND user_id = $4
        ",
    )
    .bind(requested)
    .bind(subject.kind)
    .bind(subject.id)
    .bind(user_id)
    .execute(&mut **tx)
    .await?;

    counter::apply_delta(tx, subject, bucket(current), -1).await?;
    counter::apply_delta(tx, subject, bucket(requested), 1).await?;

    Ok(VoteOutcome::Switched {
        from: current,
        to: requested,
    })
}
