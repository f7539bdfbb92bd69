use anyhow::{Context, Result};

/// Application configuration loaded from environment variables once at
/// startup. Clients are constructed from it in `main` and injected through
/// `AppState` — nothing reads ambient process state inside the hot path.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub github_access_token: String,
    /// GitHub Enterprise hostname; `None` targets public GitHub.
    pub github_hostname: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            github_access_token: require_env("GITHUB_ACCESS_TOKEN")?,
            github_hostname: std::env::var("GITHUB_HOSTNAME")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
