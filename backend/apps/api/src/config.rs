//! Process Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use anyhow::{Context, bail};
use auth::AuthConfig;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://blog.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

const DEFAULT_LOG_FILTER: &str = "api=info,auth=info,blog=info,tower_http=info";
const DEBUG_LOG_FILTER: &str = "debug";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `APP_DEBUG`: insecure cookies, verbose logs, random secret allowed
    pub debug: bool,
    /// `SECRET_KEY`: signs session tokens
    pub secret_key: Option<String>,
    pub database_url: String,
    /// `SECURITY_PASSWORD_SALT`: password pepper
    pub password_salt: Option<String>,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let debug = match get("APP_DEBUG") {
            Some(v) => parse_bool(&v).with_context(|| format!("APP_DEBUG={v}"))?,
            None => false,
        };

        let secret_key = get("SECRET_KEY");
        if secret_key.is_none() && !debug {
            bail!("SECRET_KEY must be set unless APP_DEBUG is enabled");
        }

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 127.0.0.1:5000")?;

        Ok(Self {
            debug,
            secret_key,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            password_salt: get("SECURITY_PASSWORD_SALT"),
            bind_addr,
        })
    }

    /// Tracing filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            DEBUG_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }

    pub fn auth_config(&self) -> AuthConfig {
        let base = match &self.secret_key {
            Some(secret) => AuthConfig::with_secret(secret),
            None => {
                tracing::warn!("SECRET_KEY not set; sessions will not survive a restart");
                AuthConfig::with_random_secret()
            }
        };

        AuthConfig {
            cookie_secure: !self.debug,
            ..base
        }
        .with_pepper(self.password_salt.clone())
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}
