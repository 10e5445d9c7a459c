use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct FinanceConfig {
    pub common: core_config::Config,
    pub database: DatabaseConfig,
}

/// Both values are optional: without them the API still starts and the
/// diagnostics endpoint reports the database as not available.
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<Secret<String>>,
    pub name: Option<String>,
}

impl DatabaseConfig {
    /// Connection string and database name, present only when both are set.
    pub fn connection(&self) -> Option<(&Secret<String>, &str)> {
        match (&self.url, &self.name) {
            (Some(url), Some(name)) => Some((url, name.as_str())),
            _ => None,
        }
    }
}

impl FinanceConfig {
    pub fn load() -> Result<Self, AppError> {
        // Handles .env, the optional configuration file and PORT/LOG_LEVEL
        let common = core_config::Config::load()?;

        Ok(FinanceConfig {
            common,
            database: DatabaseConfig {
                url: get_env("DATABASE_URL").map(Secret::new),
                name: get_env("DATABASE_NAME"),
            },
        })
    }
}

fn get_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
