pub mod community;
pub mod config;
pub mod db;
pub mod engagement;
pub mod error;
pub mod faq;
pub mod models;
pub mod subject;
pub mod users;

pub use config::Config;
pub use engagement::ledger::{TogglePolicy, VoteOutcome};
pub use engagement::report::ReportOutcome;
pub use error::{Error, Result};
pub use subject::{Subject, SubjectType, VoteType};

/// Install the global tracing subscriber. Intended for embedding binaries
/// and test setups; honors `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
