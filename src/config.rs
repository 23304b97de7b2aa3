use std::env;

use crate::models::media::MediaSource;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const MONGODB_DB_NAME: &str = "weekend_traveller";
const ANALYTICS_DATABASE_URL: &str = "sqlite://analytics.db?mode=rwc";
const OPENAI_MODEL: &str = "gpt-4o-2024-08-06";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const TRAVEL_REGION: &str = "india";

/// Credentials for the stock-media providers. A provider without a key
/// takes part in the cascade but never leaves the process.
#[derive(Debug, Clone, Default)]
pub struct MediaConfig {
    pub pexels_api_key: Option<String>,
    pub unsplash_access_key: Option<String>,
    pub pixabay_api_key: Option<String>,
}

impl MediaConfig {
    pub fn from_env() -> Self {
        Self {
            pexels_api_key: optional_var("PEXELS_API_KEY"),
            unsplash_access_key: optional_var("UNSPLASH_ACCESS_KEY"),
            pixabay_api_key: optional_var("PIXABAY_API_KEY"),
        }
    }

    pub fn configured_providers(&self) -> Vec<MediaSource> {
        let mut sources = Vec::new();
        if self.pexels_api_key.is_some() {
            sources.push(MediaSource::Pexels);
        }
        if self.unsplash_access_key.is_some() {
            sources.push(MediaSource::Unsplash);
        }
        if self.pixabay_api_key.is_some() {
            sources.push(MediaSource::Pixabay);
        }
        sources
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: OPENAI_MODEL.to_string(),
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: Option<String>,
    pub mongodb_db_name: String,
    pub analytics_database_url: String,
    pub travel_region: String,
    pub llm: LlmConfig,
    pub media: MediaConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            mongodb_uri: None,
            mongodb_db_name: MONGODB_DB_NAME.to_string(),
            analytics_database_url: ANALYTICS_DATABASE_URL.to_string(),
            travel_region: TRAVEL_REGION.to_string(),
            llm: LlmConfig::default(),
            media: MediaConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        if cfg!(debug_assertions) {
            dotenv::dotenv().ok();
        }

        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(PORT);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| HOST.to_string()),
            port,
            mongodb_uri: optional_var("MONGODB_URI"),
            mongodb_db_name: env::var("MONGODB_DB_NAME")
                .unwrap_or_else(|_| MONGODB_DB_NAME.to_string()),
            analytics_database_url: env::var("ANALYTICS_DATABASE_URL")
                .unwrap_or_else(|_| ANALYTICS_DATABASE_URL.to_string()),
            travel_region: env::var("TRAVEL_REGION").unwrap_or_else(|_| TRAVEL_REGION.to_string()),
            llm: LlmConfig {
                api_key: optional_var("OPENAI_API_KEY"),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| OPENAI_MODEL.to_string()),
                base_url: env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| OPENAI_BASE_URL.to_string()),
            },
            media: MediaConfig::from_env(),
        }
    }
}

// Blank values are treated the same as unset ones.
fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_providers_follow_priority_order() {
        let config = MediaConfig {
            pexels_api_key: None,
            unsplash_access_key: Some("unsplash".to_string()),
            pixabay_api_key: Some("pixabay".to_string()),
        };

        assert_eq!(
            config.configured_providers(),
            vec![MediaSource::Unsplash, MediaSource::Pixabay]
        );
    }

    #[test]
    fn test_default_config_has_no_credentials() {
        let config = AppConfig::default();
        assert!(config.llm.api_key.is_none());
        assert!(config.media.configured_providers().is_empty());
        assert_eq!(config.port, 8080);
        assert_eq!(config.llm.model, "gpt-4o-2024-08-06");
    }
}
