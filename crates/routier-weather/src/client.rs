// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenWeatherMap current-weather API.
//!
//! Provides [`OpenWeatherClient`] which handles request construction,
//! authentication, and mapping of API failures onto [`RouterError`].

use std::time::Duration;

use routier_core::{RouterError, WeatherReport};
use serde::Deserialize;
use tracing::debug;

/// Base URL for the OpenWeatherMap API.
const API_BASE_URL: &str = "https://api.openweathermap.org";

/// Request timeout. Weather lookups are small GETs; anything slower than
/// this is treated as unavailable.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Current-weather payload, reduced to the fields the router consumes.
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainSection,
    weather: Vec<ConditionSection>,
    /// Resolved city name. The API omits it for some coordinate lookups,
    /// in which case the queried city is reported back instead.
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionSection {
    description: String,
}

/// HTTP client for OpenWeatherMap communication.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    /// Creates a new OpenWeatherMap client.
    pub fn new(api_key: String) -> Result<Self, RouterError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RouterError::RemoteUnavailable {
                provider: "openweather",
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Fetches the current weather for a city, in metric units.
    ///
    /// A 404 means the city is unknown to the API and maps to
    /// [`RouterError::CityNotFound`]; any other non-success status or
    /// transport failure maps to [`RouterError::RemoteUnavailable`].
    pub async fn current_weather(&self, city: &str) -> Result<WeatherReport, RouterError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RouterError::Timeout {
                        duration: REQUEST_TIMEOUT,
                    }
                } else {
                    RouterError::RemoteUnavailable {
                        provider: "openweather",
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

        let status = response.status();
        debug!(status = %status, city, "weather response received");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RouterError::CityNotFound {
                city: city.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RouterError::RemoteUnavailable {
                provider: "openweather",
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RouterError::RemoteUnavailable {
                provider: "openweather",
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;

        let parsed: CurrentWeatherResponse =
            serde_json::from_str(&body).map_err(|e| RouterError::RemoteMalformedResponse {
                provider: "openweather",
                detail: format!("failed to parse API response: {e}"),
            })?;

        let description = parsed
            .weather
            .first()
            .map(|c| c.description.clone())
            .ok_or_else(|| RouterError::RemoteMalformedResponse {
                provider: "openweather",
                detail: "weather conditions array is empty".to_string(),
            })?;

        let resolved_city = parsed
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| city.to_string());

        Ok(WeatherReport {
            city: resolved_city,
            temperature_c: parsed.main.temp,
            description,
            mocked: false,
        })
    }
}
