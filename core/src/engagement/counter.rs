use sqlx::{Sqlite, Transaction};

use crate::error::Result;
use crate::subject::Subject;

/// The denormalized counter columns. Which field lives on which subject
/// table follows the data model: FAQs carry likes and dislikes, posts carry
/// likes and comment counts, comments carry likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    Likes,
    Dislikes,
    Comments,
}

impl CounterField {
    fn column(&self) -> &'static str {
        match self {
            CounterField::Likes => "like_count",
            CounterField::Dislikes => "dislike_count",
            CounterField::Comments => "comment_count",
        }
    }
}

/// Apply a delta to a counter, floored at zero, inside the caller's
/// transaction. Every counter is a materialized view over its vote/report/
/// comment rows and must only ever change in the same transaction as the
/// row mutation that justifies it — this function is the single writer of
/// counter columns.
pub(crate) async fn apply_delta(
    tx: &mut Transaction<'_, Sqlite>,
    subject: Subject,
    field: CounterField,
    delta: i64,
) -> Result<()> {
    let column = field.column();
    sqlx::query(&format!(
        "UPDATE {table} SET {column} = MAX(0, {column} + $1) WHERE id = $2",
        table = subject.kind.table(),
    ))
    .bind(delta)
    .bind(subject.id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
