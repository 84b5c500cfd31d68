// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, known log levels, and sane sampling ranges.

use crate::diagnostic::ConfigError;
use crate::model::RouterConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log_level `{}` is not one of {}",
                config.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    // Validate server.host is not empty
    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    // Validate server.host looks like a valid IP or hostname
    if !config.server.host.trim().is_empty() {
        let addr = config.server.host.trim();
        // Accept valid IPv4, IPv6, or hostname patterns
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{addr}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must not be 0".to_string(),
        });
    }

    if config.router.default_city.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "router.default_city must not be empty".to_string(),
        });
    }

    if config.generation.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "generation.model must not be empty".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.generation.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "generation.temperature must be between 0.0 and 2.0, got {}",
                config.generation.temperature
            ),
        });
    }

    if config.generation.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "generation.max_tokens must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
