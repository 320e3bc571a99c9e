use std::collections::HashMap;

use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};

use crate::engagement::counter::{self, CounterField};
use crate::engagement::ledger::{self, TogglePolicy, VoteOutcome};
use crate::error::{Error, Result};
use crate::models::comment::CommentNode;
use crate::models::user::User;
use crate::subject::{Subject, VoteType};

/// Create a comment, optionally as a reply. Parent links are captured here
/// and never reassigned, which is what keeps the comment graph acyclic: a
/// parent must already exist on the same post before a reply to it can be
/// created. The insert and the post's `comment_count` increment commit
/// together.
pub async fn create_comment(
    pool: &SqlitePool,
    post_id: i64,
    parent_id: Option<i64>,
    author_id: i64,
    content: &str,
) -> Result<i64> {
    let mut tx = pool.begin().await?;

    if !Subject::post(post_id).exists(&mut *tx).await? {
        return Err(Error::NotFound("post"));
    }
    if !User::exists(&mut *tx, author_id).await? {
        return Err(Error::NotFound("user"));
    }

    if let Some(parent_id) = parent_id {
        let parent = sqlx::query_as::<_, (i64,)>("SELECT post_id FROM comments WHERE id = $1")
            .bind(parent_id)
            .fetch_optional(&mut *tx)
            .await?;

        match parent {
            None => return Err(Error::NotFound("parent comment")),
            Some((parent_post,)) if parent_post != post_id => {
                return Err(Error::InvalidParent);
            }
            Some(_) => {}
        }
    }

    let (id,) = sqlx::query_as::<_, (i64,)>(
        "
        INSERT INTO comments (post_id, author_id, parent_id, content, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        ",
    )
    .bind(post_id)
    .bind(author_id)
    .bind(parent_id)
    .bind(content)
    .bind(chrono::Utc::now().naive_utc())
    .fetch_one(&mut *tx)
    .await?;

    counter::apply_delta(&mut tx, Subject::post(post_id), CounterField::Comments, 1).await?;

    tx.commit().await?;
    Ok(id)
}

#[derive(FromRow, Debug, Clone)]
struct FlatComment {
    id: i64,
    parent_id: Option<i64>,
    author_id: i64,
    writer: String,
    content: String,
    like_count: i64,
    created_at: NaiveDateTime,
}

/// The full comment forest of a post: root comments in creation order,
/// each carrying its replies recursively, ordered the same way. A post
/// without comments (or an unknown post id) yields an empty forest.
pub async fn get_thread(pool: &SqlitePool, post_id: i64) -> Result<Vec<CommentNode>> {
    let rows = sqlx::query_as::<_, FlatComment>(
        "
        SELECT
            c.id,
            c.parent_id,
            c.author_id,
            u.nickname AS writer,
            c.content,
            c.like_count,
            c.created_at
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC, c.id ASC
        ",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(assemble_forest(rows))
}

/// Group the flat rows by parent and attach children recursively. Rows
/// arrive ordered by creation time, and grouping preserves that order, so
/// every level of the forest comes out ascending. Each row is moved into
/// the forest exactly once; termination follows from parent links being
/// acyclic by construction.
fn assemble_forest(rows: Vec<FlatComment>) -> Vec<CommentNode> {
    let mut by_parent: HashMap<Option<i64>, Vec<FlatComment>> = HashMap::new();
    for row in rows {
        by_parent.entry(row.parent_id).or_default().push(row);
    }

    attach(None, &mut by_parent)
}

fn attach(
    parent: Option<i64>,
    by_parent: &mut HashMap<Option<i64>, Vec<FlatComment>>,
) -> Vec<CommentNode> {
    by_parent
        .remove(&parent)
        .unwrap_or_default()
        .into_iter()
        .map(|c| {
            let children = attach(Some(c.id), by_parent);
            CommentNode {
                id: c.id,
                author_id: c.author_id,
                writer: c.writer,
                content: c.content,
                like_count: c.like_count,
                created_at: c.created_at,
                children,
            }
        })
        .collect()
}

/// Comments only track likes; same ledger as posts.
pub async fn like_comment(
    pool: &SqlitePool,
    policy: TogglePolicy,
    comment_id: i64,
    user_id: i64,
) -> Result<VoteOutcome> {
    ledger::cast_vote(
        pool,
        policy,
        Subject::comment(comment_id),
        user_id,
        VoteType::Like,
    )
    .await
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn mock_comment(id: i64, parent_id: Option<i64>, minute: u32) -> FlatComment {
        FlatComment {
            id,
            parent_id,
            author_id: 1,
            writer: format!("author {}", id),
            content: format!("content {}", id),
            like_count: 0,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(12, minute, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_assemble_forest_empty() {
        assert!(assemble_forest(vec![]).is_empty());
    }

    #[test]
    fn test_assemble_forest_nests_children() {
        let rows = vec![
            mock_comment(1, None, 0),
            mock_comment(2, Some(1), 1),
            mock_comment(3, Some(2), 2),
            mock_comment(4, None, 3),
        ];

        let forest = assemble_forest(rows);

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].id, 1);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].id, 2);
        assert_eq!(forest[0].children[0].children[0].id, 3);
        assert_eq!(forest[1].id, 4);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn test_assemble_forest_orders_each_level_by_creation() {
        // Rows come pre-sorted by (created_at, id), as the query returns
        // them.
        let rows = vec![
            mock_comment(1, None, 0),
            mock_comment(2, None, 1),
            mock_comment(3, Some(1), 2),
            mock_comment(4, Some(1), 3),
        ];

        let forest = assemble_forest(rows);

        assert_eq!(
            forest.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(
            forest[0].children.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![3, 4]
        );
    }

    #[test]
    fn test_assemble_forest_includes_each_comment_once() {
        let rows = vec![
            mock_comment(1, None, 0),
            mock_comment(2, Some(1), 1),
            mock_comment(3, Some(1), 2),
            mock_comment(4, Some(2), 3),
            mock_comment(5, None, 4),
        ];

        fn count(nodes: &[CommentNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }

        let forest = assemble_forest(rows);
        assert_eq!(count(&forest), 5);
    }
}
