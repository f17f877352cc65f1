//! Process-level configuration

use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name, used as the log target prefix
    pub app_name: String,
    /// Environment (development, production, ...)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "stock-judge".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Read `APP_ENV` from the environment, keeping defaults otherwise
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(environment) = std::env::var("APP_ENV") {
            let environment = environment.trim().to_lowercase();
            if !environment.is_empty() {
                config.environment = environment;
            }
        }
        config
    }

    /// Whether this process runs in production
    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }

    /// Log format matching the environment
    pub fn log_format(&self) -> LogFormat {
        if self.is_production() {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app_name, "stock-judge");
        assert!(!config.is_production());
        assert_eq!(config.log_format(), LogFormat::Pretty);
    }

    #[test]
    fn test_production_uses_json_logs() {
        let config = Config {
            environment: "prod".to_string(),
            ..Default::default()
        };
        assert!(config.is_production());
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn test_serde() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.environment, config.environment);
    }
}
