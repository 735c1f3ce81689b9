use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    /// Absent in development selects the null storage mode
    pub database_url: Option<String>,
    pub audio_dir: String,
    // Provider credentials; a provider without a key is not registered
    pub hume_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub leaderboard_refresh_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set in production")]
    MissingDatabaseUrl,
}

/// Unset and blank variables are treated the same
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "7860".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            database_url: optional_var("DATABASE_URL"),
            audio_dir: env::var("AUDIO_DIR").unwrap_or_else(|_| "static/audio".to_string()),
            hume_api_key: optional_var("HUME_API_KEY"),
            openai_api_key: optional_var("OPENAI_API_KEY"),
            elevenlabs_api_key: optional_var("ELEVENLABS_API_KEY"),
            anthropic_api_key: optional_var("ANTHROPIC_API_KEY"),
            leaderboard_refresh_secs: env::var("LEADERBOARD_REFRESH_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_development() && self.database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
