// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `routier serve` command implementation.
//!
//! Resolves the weather and generation strategies from configuration,
//! builds the dispatcher, and serves the gateway until SIGINT or SIGTERM.

use std::sync::Arc;

use routier_config::model::{
    GenerationConfig, GenerationProviderMode, RouterConfig, RoutingConfig, WeatherProviderMode,
};
use routier_core::{GenerationProvider, RouterError, WeatherProvider};
use routier_dispatch::Dispatcher;
use routier_gateway::ServeOptions;
use routier_openai::{MockGeneration, OpenAiGeneration};
use routier_weather::{MockWeather, OpenWeather};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Runs the `routier serve` command.
///
/// Strategy selection happens once here; every query served afterwards
/// goes through the same pair of providers.
pub async fn run_serve(config: RouterConfig) -> Result<(), RouterError> {
    init_tracing(&config.log_level);

    info!("starting routier serve");

    let weather_key = resolve_key(config.weather.api_key.as_deref(), "OPENWEATHER_API_KEY");
    let weather = select_weather_provider(config.weather.provider, weather_key)?;

    let generation_key = resolve_key(config.generation.api_key.as_deref(), "OPENAI_API_KEY");
    let generation = select_generation_provider(&config.generation, generation_key)?;

    let default_city = resolve_default_city(&config.router);

    info!(
        weather = weather.name(),
        generation = generation.name(),
        default_city = default_city.as_str(),
        "strategies resolved"
    );

    let dispatcher = Arc::new(Dispatcher::new(
        weather,
        generation,
        default_city,
        config.weather.ascii_degrees,
    ));

    let cancel = install_signal_handler();

    let options = ServeOptions {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    routier_gateway::start_server(&options, dispatcher, cancel).await?;

    info!("routier serve shutdown complete");
    Ok(())
}

/// Picks the weather strategy.
///
/// `auto` goes live when a key resolved and falls back to the mock
/// otherwise. Forcing `openweather` without a key is a startup error.
fn select_weather_provider(
    mode: WeatherProviderMode,
    key: Option<String>,
) -> Result<Arc<dyn WeatherProvider>, RouterError> {
    match mode {
        WeatherProviderMode::Mock => {
            info!("weather strategy forced to mock");
            Ok(Arc::new(MockWeather))
        }
        WeatherProviderMode::Openweather => {
            let key = key.ok_or_else(|| {
                RouterError::Config(
                    "weather.provider is 'openweather' but no API key is set; \
                     configure weather.api_key or OPENWEATHER_API_KEY"
                        .to_string(),
                )
            })?;
            Ok(Arc::new(OpenWeather::new(key)?))
        }
        WeatherProviderMode::Auto => match key {
            Some(key) => Ok(Arc::new(OpenWeather::new(key)?)),
            None => {
                info!("no weather API key found, using mock weather strategy");
                Ok(Arc::new(MockWeather))
            }
        },
    }
}

/// Picks the generation strategy, same selection rules as weather.
fn select_generation_provider(
    config: &GenerationConfig,
    key: Option<String>,
) -> Result<Arc<dyn GenerationProvider>, RouterError> {
    match config.provider {
        GenerationProviderMode::Mock => {
            info!("generation strategy forced to mock");
            Ok(Arc::new(MockGeneration))
        }
        GenerationProviderMode::Openai => {
            let key = key.ok_or_else(|| {
                RouterError::Config(
                    "generation.provider is 'openai' but no API key is set; \
                     configure generation.api_key or OPENAI_API_KEY"
                        .to_string(),
                )
            })?;
            Ok(Arc::new(OpenAiGeneration::new(
                key,
                config.model.clone(),
                config.temperature,
                config.max_tokens,
            )?))
        }
        GenerationProviderMode::Auto => match key {
            Some(key) => Ok(Arc::new(OpenAiGeneration::new(
                key,
                config.model.clone(),
                config.temperature,
                config.max_tokens,
            )?)),
            None => {
                info!("no generation API key found, using mock generation strategy");
                Ok(Arc::new(MockGeneration))
            }
        },
    }
}

/// Resolves an API key from config, falling back to the flat environment
/// variable older deployments set.
fn resolve_key(configured: Option<&str>, env_var: &str) -> Option<String> {
    if let Some(key) = configured {
        if !key.trim().is_empty() {
            return Some(key.to_string());
        }
    }
    std::env::var(env_var)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// The default city honors the `DEFAULT_CITY` environment variable, but
/// only when the configuration still carries the built-in default. An
/// explicitly configured city always wins.
fn resolve_default_city(config: &RoutingConfig) -> String {
    if config.default_city != RoutingConfig::default().default_city {
        return config.default_city.clone();
    }
    match std::env::var("DEFAULT_CITY") {
        Ok(city) if !city.trim().is_empty() => city.trim().to_string(),
        _ => config.default_city.clone(),
    }
}

/// Installs signal handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] that is cancelled when either signal
/// is received.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

            tokio::select! {
                _ = ctrl_c => {
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
                _ = sigterm.recv() => {
                    info!("received SIGTERM, initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
    });

    token
}

/// Initializes the tracing subscriber with the given log level.
///
/// The configured level applies workspace-wide; hyper and h2 are held at
/// warn so debug runs stay readable. `RUST_LOG` overrides everything.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},hyper=warn,h2=warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_key_wins() {
        let key = resolve_key(Some("from-config"), "ROUTIER_TEST_UNSET_VAR");
        assert_eq!(key.as_deref(), Some("from-config"));
    }

    #[test]
    fn blank_configured_key_is_ignored() {
        assert_eq!(resolve_key(Some("   "), "ROUTIER_TEST_UNSET_VAR"), None);
        assert_eq!(resolve_key(None, "ROUTIER_TEST_UNSET_VAR"), None);
    }

    #[test]
    fn explicit_default_city_wins() {
        let config = RoutingConfig {
            default_city: "Lisbon".to_string(),
        };
        assert_eq!(resolve_default_city(&config), "Lisbon");
    }

    #[test]
    fn forced_mock_needs_no_key() {
        let provider = select_weather_provider(WeatherProviderMode::Mock, None).unwrap();
        assert_eq!(provider.name(), "mock");
    }

    #[test]
    fn forced_openweather_without_key_fails() {
        let err = select_weather_provider(WeatherProviderMode::Openweather, None).unwrap_err();
        assert!(matches!(err, RouterError::Config(_)));
    }

    #[test]
    fn auto_without_key_falls_back_to_mock() {
        let provider = select_weather_provider(WeatherProviderMode::Auto, None).unwrap();
        assert_eq!(provider.name(), "mock");

        let config = GenerationConfig::default();
        let provider = select_generation_provider(&config, None).unwrap();
        assert_eq!(provider.name(), "mock");
    }

    #[test]
    fn auto_with_key_goes_live() {
        let provider =
            select_weather_provider(WeatherProviderMode::Auto, Some("key".to_string())).unwrap();
        assert_eq!(provider.name(), "openweather");

        let config = GenerationConfig::default();
        let provider = select_generation_provider(&config, Some("key".to_string())).unwrap();
        assert_eq!(provider.name(), "openai");
    }
}
