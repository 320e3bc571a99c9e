use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(FromRow, Debug, Serialize, Clone)]
pub struct FaqFeedback {
    pub id: i64,
    pub faq_id: i64,
    /// Anonymous feedback is allowed, so this is optional. A *supplied* id
    /// that resolves to no account is still rejected with `NotFound`.
    pub user_id: Option<i64>,
    pub reason: FeedbackReason,
    pub detail: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackReason {
    WrongInfo,
    Outdated,
    NotClear,
    Irrelevant,
    Other,
}

impl FeedbackReason {
    /// Tolerant parse: trims, case-folds, accepts `-` and spaces for `_`,
    /// and maps anything unrecognized to `Other` instead of rejecting it.
    pub fn parse(input: &str) -> FeedbackReason {
        let normalized = input.trim().replace(['-', ' '], "_").to_uppercase();
        match normalized.as_str() {
            "WRONG_INFO" => FeedbackReason::WrongInfo,
            "OUTDATED" => FeedbackReason::Outdated,
            "NOT_CLEAR" => FeedbackReason::NotClear,
            "IRRELEVANT" => FeedbackReason::Irrelevant,
            "OTHER" => FeedbackReason::Other,
            _ => {
                if !normalized.is_empty() {
                    tracing::debug!(input, "unrecognized feedback reason, using OTHER");
                }
                FeedbackReason::Other
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_feedback_reason_parse_is_tolerant() {
        assert_eq!(FeedbackReason::parse("WRONG_INFO"), FeedbackReason::WrongInfo);
        assert_eq!(FeedbackReason::parse("wrong-info"), FeedbackReason::WrongInfo);
        assert_eq!(FeedbackReason::parse(" not clear "), FeedbackReason::NotClear);
        assert_eq!(FeedbackReason::parse("outdated"), FeedbackReason::Outdated);
        assert_eq!(FeedbackReason::parse(""), FeedbackReason::Other);
        assert_eq!(FeedbackReason::parse("???"), FeedbackReason::Other);
    }
}
