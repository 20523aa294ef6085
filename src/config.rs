use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_STORE_PATH: &str = "data/people.json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub request_timeout: Duration,
    pub store_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Overrides the request-derived base for dashboard links (e.g. a tunnel URL).
    pub public_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = get("OPENAI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .context("OPENAI_API_KEY is not set; add it to the environment or a .env file")?;

        let request_timeout = match get("OPENAI_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("invalid OPENAI_TIMEOUT_SECS '{}'", raw))?,
            ),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr: SocketAddr = bind
            .parse()
            .with_context(|| format!("invalid BIND_ADDR '{}'", bind))?;

        Ok(Self {
            api_key,
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            api_base: get("OPENAI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.into())
                .trim_end_matches('/')
                .to_string(),
            request_timeout,
            store_path: PathBuf::from(
                get("MEMORY_STORE_PATH").unwrap_or_else(|| DEFAULT_STORE_PATH.into()),
            ),
            bind_addr,
            public_base_url: get("PUBLIC_BASE_URL")
                .filter(|u| !u.trim().is_empty())
                .map(|u| u.trim_end_matches('/').to_string()),
        })
    }
}
