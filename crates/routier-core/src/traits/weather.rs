// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weather collaborator strategy trait.

use async_trait::async_trait;

use crate::error::RouterError;
use crate::types::WeatherReport;

/// Strategy for fetching current weather conditions.
///
/// Implemented by the live OpenWeatherMap-backed client and by the mocked
/// fallback used when no API key is configured.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Strategy name for logs.
    fn name(&self) -> &'static str;

    /// Fetch current conditions for a city.
    async fn current(&self, city: &str) -> Result<WeatherReport, RouterError>;
}
