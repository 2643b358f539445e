use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tracing::warn;

use crate::client::CachePolicy;
use crate::proxy::types::{ApiHost, ApiKey};
use crate::proxy::UpstreamConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

/// Upstream API connection settings
///
/// Both values are optional on purpose: a gateway booted without them still
/// serves, answering proxied routes with the configuration-missing error.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UpstreamSettings {
    pub api_host: Option<String>,
    pub api_key: Option<String>,
}

impl UpstreamSettings {
    /// Resolve to the typed config handed to the proxy, or `None` when
    /// either value is absent or fails validation.
    pub fn to_config(&self) -> Option<UpstreamConfig> {
        let (host, key) = match (&self.api_host, &self.api_key) {
            (Some(host), Some(key)) => (host, key),
            _ => return None,
        };

        let api_host = match ApiHost::try_new(host.clone()) {
            Ok(api_host) => api_host,
            Err(e) => {
                warn!(error = %e, "invalid upstream api_host, treating as unconfigured");
                return None;
            }
        };
        let api_key = match ApiKey::try_new(key.clone()) {
            Ok(api_key) => api_key,
            Err(e) => {
                warn!(error = %e, "invalid upstream api_key, treating as unconfigured");
                return None;
            }
        };

        Some(UpstreamConfig { api_host, api_key })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    pub error_retry_count: u32,
    pub error_retry_interval_ms: u64,
    pub revalidate_on_focus: bool,
    pub revalidate_on_reconnect: bool,
}

impl CacheSettings {
    pub fn to_policy(&self) -> CachePolicy {
        CachePolicy {
            error_retry_count: self.error_retry_count,
            error_retry_interval: Duration::from_millis(self.error_retry_interval_ms),
            revalidate_on_focus: self.revalidate_on_focus,
            revalidate_on_reconnect: self.revalidate_on_reconnect,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("application.environment", environment.clone())?
            .set_default("cache.error_retry_count", 3)?
            .set_default("cache.error_retry_interval_ms", 5000)?
            .set_default("cache.revalidate_on_focus", false)?
            .set_default("cache.revalidate_on_reconnect", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            // Add configuration file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix
            .add_source(Environment::with_prefix("BUBU_HSK").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new().expect("Failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_can_be_loaded() {
        let settings = Settings::new();
        assert!(settings.is_ok());
    }

    #[test]
    fn test_cache_defaults_follow_client_policy() {
        let settings = Settings::new().unwrap();
        let policy = settings.cache.to_policy();
        assert_eq!(policy.error_retry_count, 3);
        assert_eq!(policy.error_retry_interval, Duration::from_secs(5));
        assert!(!policy.revalidate_on_focus);
        assert!(policy.revalidate_on_reconnect);
    }

    #[test]
    fn test_absent_upstream_resolves_to_none() {
        let upstream = UpstreamSettings {
            api_host: None,
            api_key: Some("secret".to_string()),
        };
        assert!(upstream.to_config().is_none());
    }

    #[test]
    fn test_complete_upstream_resolves_to_typed_config() {
        let upstream = UpstreamSettings {
            api_host: Some("https://api.example.com/".to_string()),
            api_key: Some("secret".to_string()),
        };
        let config = upstream.to_config().unwrap();
        assert_eq!(config.api_host.as_ref(), "https://api.example.com");
        assert_eq!(config.api_key.as_ref(), "secret");
    }

    #[test]
    fn test_invalid_host_resolves_to_none() {
        let upstream = UpstreamSettings {
            api_host: Some("not-a-url".to_string()),
            api_key: Some("secret".to_string()),
        };
        assert!(upstream.to_config().is_none());
    }
}
