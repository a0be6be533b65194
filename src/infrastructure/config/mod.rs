use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::csv::{PreviewConfig, DEFAULT_PREVIEW_ROWS};
use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "Showcase.toml";
pub const ENV_PREFIX: &str = "SHOWCASE_";

/// Service configuration, layered as defaults < `Showcase.toml` < `SHOWCASE_*` env.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(range(min = 1))]
    pub preview_rows: usize,
    #[validate(range(min = 1))]
    pub max_upload_bytes: usize,
    pub strict_csv: bool,
    pub auto_detect_delimiter: bool,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            max_upload_bytes: 10 * 1024 * 1024, // 10MB
            strict_csv: false,
            auto_detect_delimiter: false,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env`, then merge every configuration layer
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_figment(Self::figment())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(Env::var_or("SHOWCASE_CONFIG", CONFIG_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment.extract()?;
        config
            .validate()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    pub fn preview_config(&self) -> PreviewConfig {
        PreviewConfig {
            max_rows: self.preview_rows,
            delimiter: if self.auto_detect_delimiter {
                None
            } else {
                Some(b',')
            },
            strict: self.strict_csv,
            ..PreviewConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_figment(Figment::from(Serialized::defaults(
            AppConfig::default(),
        )))
        .unwrap();

        assert_eq!(config.port, 8501);
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.preview_config().max_rows, 5);
        assert_eq!(config.preview_config().delimiter, Some(b','));
    }

    #[test]
    fn test_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                port = 9000
                preview_rows = 3
                "#,
            )?;
            jail.set_env("SHOWCASE_PREVIEW_ROWS", "8");
            jail.set_env("SHOWCASE_STRICT_CSV", "true");

            let config = AppConfig::from_figment(AppConfig::figment()).map_err(|e| e.to_string())?;

            assert_eq!(config.port, 9000);
            assert_eq!(config.preview_rows, 8);
            assert!(config.strict_csv);
            assert!(config.preview_config().strict);
            Ok(())
        });
    }

    #[test]
    fn test_zero_preview_rows_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("SHOWCASE_PREVIEW_ROWS", "0");

            let err = AppConfig::from_figment(AppConfig::figment()).unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));
            Ok(())
        });
    }

    #[test]
    fn test_bad_type_is_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("SHOWCASE_PORT", "not-a-port");

            let err = AppConfig::from_figment(AppConfig::figment()).unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));
            Ok(())
        });
    }
}
