// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer-text rendering for the weather tool.
//!
//! Reports and failures become human-readable sentences here; typed errors
//! stop at this boundary and never cross the transport.

use routier_core::{RouterError, WeatherReport};

/// Renders a report as an answer sentence.
///
/// Live descriptions arrive lowercase from the API and get their first
/// letter capitalized; mocked reports keep their fixed wording and are
/// labeled as such.
pub(crate) fn render_weather(report: &WeatherReport, ascii_degrees: bool) -> String {
    let unit = if ascii_degrees { "degC" } else { "°C" };
    let temp = format_temperature(report.temperature_c);
    if report.mocked {
        format!(
            "It's {temp}{unit} and {} in {}. (mocked)",
            report.description, report.city
        )
    } else {
        format!(
            "It's {temp}{unit} and {} in {}.",
            capitalize(&report.description),
            report.city
        )
    }
}

/// Renders a weather failure as an answer sentence.
pub(crate) fn render_weather_failure(err: &RouterError, city: &str) -> String {
    match err {
        RouterError::CityNotFound { city } => {
            format!("Weather lookup failed: city '{city}' not found.")
        }
        RouterError::RemoteMalformedResponse { .. } => {
            format!("Could not parse weather data for {city}.")
        }
        other => format!("Weather lookup failed: {other}"),
    }
}

/// Formats a Celsius value, dropping the trailing `.0` on integral values.
fn format_temperature(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }
    value.to_string()
}

/// First letter uppercase, rest lowercase.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
