// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Routier query router.
//!
//! TOML documents merge over compiled defaults across the XDG hierarchy,
//! `ROUTIER_` env vars override files, unknown keys are rejected
//! (`deny_unknown_fields`), and failures render as miette diagnostics
//! with spelling suggestions.
//!
//! ```no_run
//! let config = match routier_config::load_and_validate() {
//!     Ok(config) => config,
//!     Err(errors) => {
//!         routier_config::render_errors(&errors);
//!         std::process::exit(1);
//!     }
//! };
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_str};
pub use model::{
    GenerationConfig, GenerationProviderMode, RouterConfig, RoutingConfig, ServerConfig,
    WeatherConfig, WeatherProviderMode,
};

/// Loads from the XDG hierarchy and env vars, then validates.
///
/// The error side carries every problem found, not just the first, so
/// startup can report them all at once.
pub fn load_and_validate() -> Result<RouterConfig, Vec<ConfigError>> {
    validated(loader::load_config())
}

/// Like [`load_and_validate`], but over an inline TOML document.
pub fn load_and_validate_str(toml_content: &str) -> Result<RouterConfig, Vec<ConfigError>> {
    validated(loader::load_config_from_str(toml_content))
}

fn validated(
    loaded: Result<RouterConfig, figment::Error>,
) -> Result<RouterConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_loads_defaults() {
        let config = load_and_validate_str("").expect("defaults should validate");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.router.default_city, "San Francisco");
    }

    #[test]
    fn typo_in_section_key_is_diagnosed() {
        let errors = load_and_validate_str(
            r#"
[router]
defalt_city = "Lima"
"#,
        )
        .unwrap_err();

        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { did_you_mean, .. }
                if did_you_mean.as_deref() == Some("default_city")
        )));
    }

    #[test]
    fn semantic_failures_surface_as_validation_errors() {
        let errors = load_and_validate_str(
            r#"
log_level = "silent"

[generation]
temperature = 9.0
"#,
        )
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ConfigError::Validation { .. })));
    }
}
