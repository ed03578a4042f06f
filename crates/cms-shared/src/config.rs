//! Configuration management

use std::time::Duration;

use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;

use crate::constants::{DEFAULT_READ_TIMEOUT_MS, DEFAULT_RENDER_TIMEOUT_MS, LOCALE_COOKIE};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub site: SiteSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// Empty means the server runs on the in-memory store.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteSettings {
    pub template_dir: String,
    pub render_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub locale_cookie: String,
}

impl SiteSettings {
    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl DatabaseSettings {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CMS").separator("__").try_parsing(true))
            .build()?;
        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "cms-server")?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("site.template_dir", "templates")?
            .set_default("site.render_timeout_ms", DEFAULT_RENDER_TIMEOUT_MS)?
            .set_default("site.read_timeout_ms", DEFAULT_READ_TIMEOUT_MS)?
            .set_default("site.locale_cookie", LOCALE_COOKIE)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.site.read_timeout_ms == 0 || self.site.render_timeout_ms == 0 {
            return Err(AppError::InvalidConfig("site timeouts must be non-zero".into()));
        }
        if self.site.read_timeout_ms > self.site.render_timeout_ms {
            return Err(AppError::InvalidConfig(
                "site.read_timeout_ms must not exceed site.render_timeout_ms".into(),
            ));
        }
        if self.site.locale_cookie.trim().is_empty() {
            return Err(AppError::InvalidConfig("site.locale_cookie must be set".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(overrides: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let mut builder = AppConfig::defaults()?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_defaults_deserialize() {
        let config = build(&[]).unwrap();
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.site.locale_cookie, "sonic_lang");
        assert!(!config.database.is_configured());
        assert_eq!(config.site.read_timeout(), Duration::from_millis(1_000));
    }

    #[test]
    fn test_read_timeout_above_render_timeout_is_rejected() {
        let result = build(&[("site.read_timeout_ms", "9000"), ("site.render_timeout_ms", "100")]);
        assert!(matches!(result, Err(AppError::InvalidConfig(_))));
    }
}
