use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Server settings derived from env.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub seed_file: Option<PathBuf>,
    pub frontend_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        fn opt_env(name: &str) -> Option<String> { std::env::var(name).ok().filter(|v| !v.trim().is_empty()) }
        Self {
            bind_addr: opt_env("COMMENTS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            seed_file: opt_env("COMMENTS_SEED_FILE").map(PathBuf::from),
            frontend_url: opt_env("FRONTEND_URL"),
        }
    }
}
