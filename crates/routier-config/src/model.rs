// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! keys at startup with an actionable error instead of silently ignoring
//! a typo.

use serde::{Deserialize, Serialize};

/// Top-level Routier configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with `ROUTIER_`
/// environment variable overrides. Every key has a default; an empty file
/// is a valid configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP/WebSocket listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Query-routing settings.
    #[serde(default)]
    pub router: RoutingConfig,

    /// Weather collaborator settings.
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Text-generation collaborator settings.
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            router: RoutingConfig::default(),
            weather: WeatherConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Query-routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// City used when a weather query names no location.
    #[serde(default = "default_city")]
    pub default_city: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
        }
    }
}

fn default_city() -> String {
    "San Francisco".to_string()
}

/// Which strategy serves a collaborator.
///
/// `auto` picks the live strategy when an API key resolves and the mocked
/// strategy otherwise; naming a live provider without a key is a startup
/// error rather than a silent mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherProviderMode {
    #[default]
    Auto,
    Openweather,
    Mock,
}

/// See [`WeatherProviderMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProviderMode {
    #[default]
    Auto,
    Openai,
    Mock,
}

/// Weather collaborator configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    /// Strategy selection.
    #[serde(default)]
    pub provider: WeatherProviderMode,

    /// OpenWeatherMap API key. Falls back to `OPENWEATHER_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Render "degC" instead of the degree sign, for terminals that
    /// mangle non-ASCII output.
    #[serde(default)]
    pub ascii_degrees: bool,
}

/// Text-generation collaborator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Strategy selection.
    #[serde(default)]
    pub provider: GenerationProviderMode,

    /// OpenAI API key. Falls back to `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier sent to the completions API.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Completion length cap.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProviderMode::default(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_max_tokens() -> u32 {
    512
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: RouterConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.router.default_city, "San Francisco");
        assert_eq!(config.weather.provider, WeatherProviderMode::Auto);
        assert_eq!(config.generation.model, "gpt-4o-mini");
        assert_eq!(config.generation.temperature, 0.2);
        assert_eq!(config.generation.max_tokens, 512);
    }

    #[test]
    fn sections_deserialize() {
        let config: RouterConfig = toml::from_str(
            r#"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 9100

[router]
default_city = "Oslo"

[weather]
provider = "mock"
ascii_degrees = true

[generation]
provider = "openai"
api_key = "sk-test"
model = "gpt-4o"
"#,
        )
        .expect("should parse");

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.router.default_city, "Oslo");
        assert_eq!(config.weather.provider, WeatherProviderMode::Mock);
        assert!(config.weather.ascii_degrees);
        assert_eq!(config.generation.provider, GenerationProviderMode::Openai);
        assert_eq!(config.generation.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.generation.model, "gpt-4o");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = toml::from_str::<RouterConfig>(
            r#"
[server]
hots = "127.0.0.1"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_provider_mode_is_rejected() {
        let result = toml::from_str::<RouterConfig>(
            r#"
[weather]
provider = "noaa"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn default_round_trips_through_toml() {
        let rendered = toml::to_string(&RouterConfig::default()).expect("serialize");
        let parsed: RouterConfig = toml::from_str(&rendered).expect("reparse");
        assert_eq!(parsed.server.port, RouterConfig::default().server.port);
        assert_eq!(
            parsed.router.default_city,
            RouterConfig::default().router.default_city
        );
    }
}
