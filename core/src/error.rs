use thiserror::Error;

/// Errors surfaced to the API layer. Duplicate votes and duplicate reports
/// are business-level no-ops and never show up here; unique-constraint races
/// are absorbed internally by retrying the insert as an update.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced entity (subject, user, parent comment, …) does not
    /// exist. Also returned for an unresolvable caller identity: we never
    /// substitute a different account.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Mutating a post requires being its author.
    #[error("only the author may modify this post")]
    PermissionDenied,

    /// The requested parent comment belongs to a different post.
    #[error("parent comment belongs to a different post")]
    InvalidParent,

    /// The store rejected or aborted the operation. Everything in the
    /// enclosing transaction has been rolled back; callers may retry.
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
