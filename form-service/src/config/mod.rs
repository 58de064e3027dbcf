use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const SERVICE_NAME: &str = "form-service";

/// JSON bodies above this size are rejected with 413.
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub url: Secret<String>,
    /// Overrides the database named in the connection string.
    pub database: Option<String>,
    /// Hold the listener back until the first connection attempt resolves.
    pub wait_for_connection: bool,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Secret::new(url.into()),
            database: None,
            wait_for_connection: false,
        }
    }

    /// The connection string with any `user:password@` replaced, safe to log.
    pub fn redacted_url(&self) -> String {
        redact_credentials(self.url.expose_secret())
    }
}

impl FormConfig {
    pub fn from_env() -> Result<Self, AppError> {
        // Load common config (handles .env, an optional configuration file and PORT)
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Builds the service settings from `lookup`, which maps a variable
    /// name to its value.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("MONGO_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::ConfigError(anyhow::anyhow!("MONGO_URL is not defined")))?;

        Ok(FormConfig {
            common,
            mongodb: MongoConfig {
                url: Secret::new(url),
                database: lookup("MONGO_DATABASE").filter(|v| !v.is_empty()),
                wait_for_connection: parse_var(&lookup, "MONGO_WAIT_FOR_CONNECTION", false)?,
            },
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value: {}", key, e))
        }),
        None => Ok(default),
    }
}

/// Masks the `user:password` section of a connection string.
///
/// `mongodb://admin:hunter2@db:27017/forms` becomes
/// `mongodb://****:****@db:27017/forms`. The password may hold unescaped
/// `/`, `?` or `@`: the credentials end at the last `@` ahead of the first
/// `/` or `?` that follows an `@`. Strings without both a user and a
/// password are returned unchanged.
pub fn redact_credentials(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let authority_start = scheme_end + 3;
    let rest = &url[authority_start..];

    let Some(first_at) = rest.find('@') else {
        return url.to_string();
    };
    let hosts_end = rest[first_at..]
        .find(|c: char| c == '/' || c == '?')
        .map_or(rest.len(), |offset| first_at + offset);
    let Some(at) = rest[..hosts_end].rfind('@') else {
        return url.to_string();
    };

    match rest[..at].split_once(':') {
        Some((user, password)) if !user.is_empty() && !password.is_empty() => format!(
            "{}****:****{}",
            &url[..authority_start],
            &rest[at..]
        ),
        _ => url.to_string(),
    }
}
