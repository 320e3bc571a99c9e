use sqlx::SqlitePool;

use crate::engagement::ledger::{self, TogglePolicy, VoteOutcome};
use crate::error::{Error, Result};
use crate::models::faq::{Faq, NewFaq};
use crate::models::feedback::FeedbackReason;
use crate::models::user::User;
use crate::subject::{Subject, VoteType};

pub async fn create_faq(pool: &SqlitePool, new: NewFaq) -> Result<i64> {
    let (id,) = sqlx::query_as::<_, (i64,)>(
        "
        INSERT INTO faqs (question, answer, waste_type, category, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        ",
    )
    .bind(&new.question)
    .bind(&new.answer)
    .bind(&new.waste_type)
    .bind(&new.category)
    .bind(chrono::Utc::now().naive_utc())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub async fn get_faq(pool: &SqlitePool, faq_id: i64) -> Result<Faq> {
    sqlx::query_as::<_, Faq>("SELECT * FROM faqs WHERE id = $1")
        .bind(faq_id)
        .fetch_optional(pool)
        .await?
        .ok_or(Error::NotFound("faq"))
}

/// Plain listing, most-liked first. Keyword search is the query layer's
/// job, not this core's.
pub async fn list_faqs(
    pool: &SqlitePool,
    category: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Faq>> {
    let limit = if limit <= 0 { 10 } else { limit.min(200) };
    let offset = offset.max(0);
    let category = category.map(str::trim).filter(|c| !c.is_empty());

    let faqs = match category {
        Some(category) => {
            sqlx::query_as::<_, Faq>(
                "
                SELECT * FROM faqs
                WHERE category = $1
                ORDER BY like_count DESC, created_at DESC
                LIMIT $2 OFFSET $3
                ",
            )
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Faq>(
                "
                SELECT * FROM faqs
                ORDER BY like_count DESC, created_at DESC
                LIMIT $1 OFFSET $2
                ",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(faqs)
}

/// FAQ voting supports both LIKE and DISLIKE, one vote per account with
/// switching between the two.
pub async fn vote_faq(
    pool: &SqlitePool,
    policy: TogglePolicy,
    faq_id: i64,
    user_id: i64,
    vote: VoteType,
) -> Result<VoteOutcome> {
    ledger::cast_vote(pool, policy, Subject::faq(faq_id), user_id, vote).await
}

/// Store structured feedback on an FAQ entry. The reason goes through the
/// tolerant enum parse; the identity is optional but must resolve when
/// supplied.
pub async fn submit_feedback(
    pool: &SqlitePool,
    faq_id: i64,
    user_id: Option<i64>,
    reason: &str,
    detail: Option<&str>,
) -> Result<i64> {
    if !Subject::faq(faq_id).exists(pool).await? {
        return Err(Error::NotFound("faq"));
    }
    if let Some(user_id) = user_id {
        if !User::exists(pool, user_id).await? {
            return Err(Error::NotFound("user"));
        }
    }

    let reason = FeedbackReason::parse(reason);

    let (id,) = sqlx::query_as::<_, (i64,)>(
        "
        INSERT INTO faq_feedback (faq_id, user_id, reason, detail, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        ",
    )
    .bind(faq_id)
    .bind(user_id)
    .bind(reason)
    .bind(detail)
    .bind(chrono::Utc::now().naive_utc())
    .fetch_one(pool)
    .await?;

    Ok(id)
}
