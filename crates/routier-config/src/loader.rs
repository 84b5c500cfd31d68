// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading.
//!
//! Values merge from four layers, later layers winning: compiled defaults,
//! `/etc/routier/routier.toml`, the XDG user config, `./routier.toml`, and
//! finally `ROUTIER_`-prefixed environment variables.

#![allow(clippy::result_large_err)] // figment::Error is large; callers convert it promptly

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::RouterConfig;

/// Loads configuration from the XDG hierarchy with env var overrides.
pub fn load_config() -> Result<RouterConfig, figment::Error> {
    file_layers(Figment::from(Serialized::defaults(RouterConfig::default())))
        .merge(env_provider())
        .extract()
}

/// Loads configuration from inline TOML over the compiled defaults.
///
/// No file lookup and no env vars; serves tests and callers that already
/// hold the document.
pub fn load_config_from_str(toml_content: &str) -> Result<RouterConfig, figment::Error> {
    Figment::from(Serialized::defaults(RouterConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Stacks the three config file locations onto `figment`, system-wide
/// first so more local files win.
fn file_layers(figment: Figment) -> Figment {
    let user_config = dirs::config_dir()
        .map(|dir| dir.join("routier/routier.toml"))
        .unwrap_or_default();

    figment
        .merge(Toml::file("/etc/routier/routier.toml"))
        .merge(Toml::file(user_config))
        .merge(Toml::file("routier.toml"))
}

/// Environment variable provider with explicit section mapping.
///
/// Keys arrive lowercased with the prefix stripped; only the underscore
/// after a known section name becomes a dot, so `ROUTIER_WEATHER_API_KEY`
/// maps to `weather.api_key` and not `weather.api.key`. `Env::split("_")`
/// cannot express this.
fn env_provider() -> Env {
    Env::prefixed("ROUTIER_").map(|key| {
        key.as_str()
            .replacen("server_", "server.", 1)
            .replacen("router_", "router.", 1)
            .replacen("weather_", "weather.", 1)
            .replacen("generation_", "generation.", 1)
            .into()
    })
}
