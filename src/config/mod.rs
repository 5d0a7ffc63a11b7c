use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub logging: LoggingConfig,
    pub cli: CliConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter, used when RUST_LOG is not set
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub json_output: bool,
    pub verbose_errors: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("COLUMN_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Ok(v) = env::var("COLUMN_JSON_OUTPUT") {
            self.cli.json_output = v.parse().unwrap_or(self.cli.json_output);
        }
        if let Ok(v) = env::var("COLUMN_VERBOSE_ERRORS") {
            self.cli.verbose_errors = v.parse().unwrap_or(self.cli.verbose_errors);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            logging: LoggingConfig { level: "column_property=debug".to_string() },
            cli: CliConfig { json_output: false, verbose_errors: true },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            logging: LoggingConfig { level: "warn".to_string() },
            cli: CliConfig { json_output: true, verbose_errors: false },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
