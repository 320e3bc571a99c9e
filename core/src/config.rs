use crate::engagement::ledger::TogglePolicy;

pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub toggle_policy: TogglePolicy,
}

fn var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(val) => Some(val),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::warn!("Environment variable `{key}` is not valid unicode, ignoring");
            None
        }
    }
}

fn required_var(key: &str) -> String {
    match var(key) {
        Some(val) => val,
        None => {
            tracing::error!("Environment variable `{key}` is required");
            std::process::exit(1)
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Config {
            database_url: required_var("DATABASE_URL"),
            max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            // Fixed per deployment; see TogglePolicy for the two behaviors.
            toggle_policy: match var("VOTE_TOGGLE_POLICY").as_deref() {
                Some("retract") => TogglePolicy::Retract,
                Some("keep") | None => TogglePolicy::Keep,
                Some(other) => {
                    tracing::warn!("Unknown VOTE_TOGGLE_POLICY `{other}`, using `keep`");
                    TogglePolicy::Keep
                }
            },
        }
    }
}
