//! Centralized configuration (environment variables + defaults).
//!
//! Call `dotenv::dotenv().ok()` before reading so a local `.env` file is honoured.

use anyhow::Context;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3010;
pub const DEFAULT_STATIC_DIR: &str = "dist";
pub const DEFAULT_SESSION_TOKEN_FILE: &str = ".dashboard_session.json";
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Interface the server binds to (`DASHBOARD_BIND_ADDR`, default `0.0.0.0`).
pub fn bind_addr() -> String {
    non_empty_var("DASHBOARD_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

/// Listening port (`PORT`, default 3010).
pub fn port() -> anyhow::Result<u16> {
    match non_empty_var("PORT") {
        Some(v) => v
            .parse::<u16>()
            .with_context(|| format!("PORT must be a valid port number, got '{}'", v)),
        None => Ok(DEFAULT_PORT),
    }
}

pub fn socket_addr() -> anyhow::Result<SocketAddr> {
    let raw = format!("{}:{}", bind_addr(), port()?);
    raw.parse::<SocketAddr>()
        .with_context(|| format!("DASHBOARD_BIND_ADDR/PORT do not form a socket address: {}", raw))
}

/// Directory holding the front-end bundle (`STATIC_DIR`, default `dist`).
pub fn static_dir() -> PathBuf {
    PathBuf::from(non_empty_var("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()))
}

/// File the client-side token store persists into (`SESSION_TOKEN_FILE`).
pub fn session_token_file() -> PathBuf {
    PathBuf::from(
        non_empty_var("SESSION_TOKEN_FILE")
            .unwrap_or_else(|| DEFAULT_SESSION_TOKEN_FILE.to_string()),
    )
}

/// Dashboard server used for delegated login (`AUTH_REMOTE_URL`). Unset means the local allowlist.
pub fn auth_remote_url() -> Option<String> {
    non_empty_var("AUTH_REMOTE_URL")
}

/// Whether the server starts with the twelve sample records (`SEED_SAMPLE_DATA`, default true).
pub fn seed_sample_data() -> anyhow::Result<bool> {
    match non_empty_var("SEED_SAMPLE_DATA") {
        None => Ok(true),
        Some(v) => match v.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(anyhow::anyhow!(
                "SEED_SAMPLE_DATA must be true or false, got '{}'",
                v
            )),
        },
    }
}

/// Live bearer tokens the server keeps before revoking the oldest (`MAX_SESSIONS`, default 10000).
pub fn max_sessions() -> anyhow::Result<usize> {
    match non_empty_var("MAX_SESSIONS") {
        Some(v) => match v.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(anyhow::anyhow!(
                "MAX_SESSIONS must be a positive integer, got '{}'",
                v
            )),
        },
        None => Ok(DEFAULT_MAX_SESSIONS),
    }
}
