use serde::{Deserialize, Serialize};
use sqlx::{Executor, Sqlite};

use crate::error::Result;

/// A votable/reportable/commentable entity, identified by type and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub kind: SubjectType,
    pub id: i64,
}

impl Subject {
    pub fn faq(id: i64) -> Self {
        Subject { kind: SubjectType::Faq, id }
    }

    pub fn post(id: i64) -> Self {
        Subject { kind: SubjectType::Post, id }
    }

    pub fn comment(id: i64) -> Self {
        Subject { kind: SubjectType::Comment, id }
    }

    pub async fn exists<'a, E>(&self, executor: E) -> Result<bool>
    where
        E: Executor<'a, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, (bool,)>(&format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)",
            self.kind.table()
        ))
        .bind(self.id)
        .fetch_one(executor)
        .await?;

        Ok(row.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SubjectType {
    Faq,
    Post,
    Comment,
}

impl SubjectType {
    pub fn table(&self) -> &'static str {
        match self {
            SubjectType::Faq => "faqs",
            SubjectType::Post => "posts",
            SubjectType::Comment => "comments",
        }
    }

    /// Human-readable name used in `NotFound` errors.
    pub fn name(&self) -> &'static str {
        match self {
            SubjectType::Faq => "faq",
            SubjectType::Post => "post",
            SubjectType::Comment => "comment",
        }
    }

    /// FAQs carry both counters; posts and comments only track likes.
    pub fn supports(&self, vote: VoteType) -> bool {
        match self {
            SubjectType::Faq => true,
            SubjectType::Post | SubjectType::Comment => vote == VoteType::Like,
        }
    }

    /// Clamp a requested vote to this subject's vote domain. Out-of-domain
    /// requests normalize to the default rather than failing, the same
    /// tolerant policy applied to unparseable enum inputs.
    pub fn normalize_vote(&self, requested: VoteType) -> VoteType {
        if self.supports(requested) {
            requested
        } else {
            tracing::debug!(
                subject_type = self.name(),
                requested = requested.as_str(),
                "vote type unsupported for subject, normalizing to LIKE"
            );
            VoteType::Like
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum VoteType {
    Like,
    Dislike,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Like => "LIKE",
            VoteType::Dislike => "DISLIKE",
        }
    }

    /// Tolerant parse: trims and case-folds. Anything unrecognized falls
    /// back to `LIKE` instead of being rejected.
    pub fn parse(input: &str) -> VoteType {
        let normalized = input.trim().to_uppercase();
        match normalized.as_str() {
            "LIKE" => VoteType::Like,
            "DISLIKE" => VoteType::Dislike,
            _ => {
                tracing::warn!(input, "unrecognized vote type, defaulting to LIKE");
                VoteType::Like
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_vote_type_parse_is_tolerant() {
        assert_eq!(VoteType::parse("LIKE"), VoteType::Like);
        assert_eq!(VoteType::parse(" dislike "), VoteType::Dislike);
        assert_eq!(VoteType::parse("upvote"), VoteType::Like);
        assert_eq!(VoteType::parse(""), VoteType::Like);
    }

    #[test]
    fn test_vote_domain_per_subject_type() {
        assert!(SubjectType::Faq.supports(VoteType::Dislike));
        assert!(!SubjectType::Post.supports(VoteType::Dislike));
        assert!(!SubjectType::Comment.supports(VoteType::Dislike));
        assert_eq!(
            SubjectType::Post.normalize_vote(VoteType::Dislike),
            VoteType::Like
        );
        assert_eq!(
            SubjectType::Faq.normalize_vote(VoteType::Dislike),
            VoteType::Dislike
        );
    }
}
