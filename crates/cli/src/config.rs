//! Environment configuration
//!
//! Everything comes from environment variables with development
//! defaults, so the binary runs against a local database with no setup.
//! `DATABASE_URL` wins over the individual `DB_*` parts.

use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub database_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            let host = get_env("DB_HOST", "localhost");
            let port = get_env("DB_PORT", "5432");
            let user = get_env("DB_USER", "postgres");
            let password = get_env("DB_PASSWORD", "secret");
            let name = get_env("DB_NAME", "kredit");
            format!("postgres://{user}:{password}@{host}:{port}/{name}")
        });

        Self {
            app_name: get_env("APP_NAME", "kredit"),
            database_url,
        }
    }
}

fn get_env(key: &str, fallback: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_compose_a_url() {
        // Only checks composition; env vars may shadow parts in CI.
        let config = AppConfig::from_env();
        assert!(!config.database_url.is_empty());
        assert!(!config.app_name.is_empty());
    }
}
