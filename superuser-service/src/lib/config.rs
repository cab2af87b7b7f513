use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Raw token settings as they appear in configuration files.
///
/// `access_token_lifetime` is a duration string (`"90s"`, `"15m"`,
/// `"24h"`, `"7d"`); an invalid value is a fatal startup error.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenSettings {
    pub backend: auth::TokenBackend,
    pub symmetric_key: String,
    pub access_token_lifetime: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKEN__BACKEND, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__SYMMETRIC_KEY=... overrides token.symmetric_key
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Resolve the token settings into the form the auth crate consumes.
    ///
    /// # Errors
    /// Fails when the lifetime string does not parse; callers treat
    /// this as fatal at startup.
    pub fn token_config(&self) -> Result<auth::TokenConfig, ConfigError> {
        let access_token_lifetime = parse_duration(&self.token.access_token_lifetime)
            .map_err(ConfigError::Message)?;

        Ok(auth::TokenConfig {
            backend: self.token.backend,
            symmetric_key: self.token.symmetric_key.clone(),
            access_token_lifetime,
        })
    }
}

/// Parse a duration expression of the form `<integer><unit>` where the
/// unit is one of `s`, `m`, `h`, `d`.
fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("missing unit in duration '{}'", value))?;

    let (digits, unit) = value.split_at(split);
    let amount: i64 = digits
        .parse()
        .map_err(|_| format!("invalid amount in duration '{}'", value))?;

    match unit {
        "s" => Ok(Duration::seconds(amount)),
        "m" => Ok(Duration::minutes(amount)),
        "h" => Ok(Duration::hours(amount)),
        "d" => Ok(Duration::days(amount)),
        _ => Err(format!("unknown unit '{}' in duration '{}'", unit, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("90s").unwrap(), Duration::seconds(90));
        assert_eq!(parse_duration("15m").unwrap(), Duration::minutes(15));
        assert_eq!(parse_duration("24h").unwrap(), Duration::hours(24));
        assert_eq!(parse_duration("7d").unwrap(), Duration::days(7));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("24").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("24w").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-5h").is_err());
    }

    #[test]
    fn test_token_config_resolution() {
        let config = Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/superusers".to_string(),
            },
            server: ServerConfig { http_port: 8080 },
            token: TokenSettings {
                backend: auth::TokenBackend::Jwt,
                symmetric_key: "secret_key_that_is_32_bytes_long".to_string(),
                access_token_lifetime: "24h".to_string(),
            },
        };

        let token_config = config.token_config().expect("Failed to resolve");
        assert_eq!(token_config.access_token_lifetime, Duration::hours(24));
        assert_eq!(token_config.backend, auth::TokenBackend::Jwt);
    }

    #[test]
    fn test_token_config_invalid_lifetime_is_fatal() {
        let config = Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/superusers".to_string(),
            },
            server: ServerConfig { http_port: 8080 },
            token: TokenSettings {
                backend: auth::TokenBackend::Paseto,
                symmetric_key: "secret_key_that_is_32_bytes_long".to_string(),
                access_token_lifetime: "soon".to_string(),
            },
        };

        assert!(config.token_config().is_err());
    }
}
