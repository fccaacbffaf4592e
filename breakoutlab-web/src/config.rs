//! Server configuration derived from environment variables.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Timeout for the upstream market-data fetch, in seconds.
    pub fetch_timeout_secs: u64,
    /// Directory where per-request download artifacts are spooled.
    pub spool_dir: PathBuf,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let spool_dir = env::var("BREAKOUTLAB_SPOOL_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);

        Self {
            bind: env_str("BREAKOUTLAB_BIND", "127.0.0.1"),
            port: env_u16("BREAKOUTLAB_PORT", 8080),
            fetch_timeout_secs: env_u64("BREAKOUTLAB_FETCH_TIMEOUT_SECS", 30),
            spool_dir,
        }
    }
}
