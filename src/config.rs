// src/config.rs
//
// Runtime configuration
//
// Every value has a default; environment variables override them.

use std::path::PathBuf;

use crate::domain::DEFAULT_UPCOMING_DAYS;
use crate::error::{AppError, AppResult};

pub const ENV_DB_PATH: &str = "GASSERVICE_DB_PATH";
pub const ENV_POOL_SIZE: &str = "GASSERVICE_POOL_SIZE";
pub const ENV_UPCOMING_DAYS: &str = "GASSERVICE_UPCOMING_DAYS";
pub const ENV_COUNTRY_CODE: &str = "GASSERVICE_COUNTRY_CODE";
pub const ENV_UNKNOWN_CLIENT_LABEL: &str = "GASSERVICE_UNKNOWN_CLIENT_LABEL";

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_COUNTRY_CODE: &str = "55";
const DEFAULT_UNKNOWN_CLIENT_LABEL: &str = "Unknown client";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite file. `None` means the per-user data directory.
    pub database_path: Option<PathBuf>,

    pub pool_size: u32,

    /// Look-ahead window used by the upcoming view and reminders
    pub upcoming_days: i64,

    /// Prefixed to local phone numbers when building WhatsApp links
    pub default_country_code: String,

    /// Shown when a maintenance references a client missing from the directory
    pub unknown_client_label: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            pool_size: DEFAULT_POOL_SIZE,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
            unknown_client_label: DEFAULT_UNKNOWN_CLIENT_LABEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = non_blank(lookup(ENV_DB_PATH)) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = non_blank(lookup(ENV_POOL_SIZE)) {
            let size: u32 = parse_value(ENV_POOL_SIZE, &raw)?;
            if size == 0 {
                return Err(AppError::Config(format!("{} must be at least 1", ENV_POOL_SIZE)));
            }
            config.pool_size = size;
        }

        if let Some(raw) = non_blank(lookup(ENV_UPCOMING_DAYS)) {
            config.upcoming_days = parse_value(ENV_UPCOMING_DAYS, &raw)?;
        }

        if let Some(code) = non_blank(lookup(ENV_COUNTRY_CODE)) {
            if !code.chars().all(|c| c.is_ascii_digit()) {
                return Err(AppError::Config(format!(
                    "{} must contain digits only, got '{}'",
                    ENV_COUNTRY_CODE, code
                )));
            }
            config.default_country_code = code;
        }

        if let Some(label) = non_blank(lookup(ENV_UNKNOWN_CLIENT_LABEL)) {
            config.unknown_client_label = label;
        }

        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.parse()
        .map_err(|_| AppError::Config(format!("Invalid value '{}' for {}", raw, key)))
}
