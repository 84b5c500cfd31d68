// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenWeatherMap provider adapter for the Routier query router.
//!
//! This crate implements [`WeatherProvider`] twice: [`OpenWeather`] talks
//! to the live current-weather API, [`MockWeather`] produces a fixed,
//! clearly-labeled report for deployments without credentials. Which one
//! serves a running router is decided once at startup.

pub mod client;

use async_trait::async_trait;
use routier_core::{RouterError, WeatherProvider, WeatherReport};
use tracing::info;

use crate::client::OpenWeatherClient;

/// Live weather strategy backed by the OpenWeatherMap API.
pub struct OpenWeather {
    client: OpenWeatherClient,
}

impl OpenWeather {
    /// Creates the live strategy with the given API key.
    pub fn new(api_key: String) -> Result<Self, RouterError> {
        let client = OpenWeatherClient::new(api_key)?;
        info!("openweather provider initialized");
        Ok(Self { client })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeather {
    fn name(&self) -> &'static str {
        "openweather"
    }

    async fn current(&self, city: &str) -> Result<WeatherReport, RouterError> {
        self.client.current_weather(city).await
    }
}

/// Fallback strategy producing a fixed report.
///
/// Used when no API key is configured. The report is marked `mocked` so
/// the rendered answer can say so.
pub struct MockWeather;

#[async_trait]
impl WeatherProvider for MockWeather {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn current(&self, city: &str) -> Result<WeatherReport, RouterError> {
        Ok(WeatherReport {
            city: city.to_string(),
            temperature_c: 24.0,
            description: "sunny".to_string(),
            mocked: true,
        })
    }
}
