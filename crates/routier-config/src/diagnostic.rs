// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic rendering for configuration failures.
//!
//! Figment reports deserialization problems as a chain of low-level
//! errors; this module lifts each one into a [`ConfigError`] that miette
//! can render, attaching "did you mean?" suggestions for misspelled keys
//! via Jaro-Winkler similarity.

use miette::Diagnostic;
use thiserror::Error;

/// Similarity floor for spelling suggestions. Catches one-edit typos like
/// `provder` or `defalt_city` without suggesting unrelated keys.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration problem, shaped for miette reporting.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key the model does not define.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(routier::config::unknown_key),
        help("{}", spell_help(did_you_mean.as_deref(), known_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest valid key, when one is similar enough.
        did_you_mean: Option<String>,
        /// Comma-joined keys the section accepts.
        known_keys: String,
    },

    /// A value of the wrong TOML type.
    #[error("invalid type for key `{key}`: found {found}, expected {expected}")]
    #[diagnostic(code(routier::config::invalid_type), help("expected {expected}"))]
    TypeMismatch {
        key: String,
        found: String,
        expected: String,
    },

    /// A key the model requires but the merged layers never set.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(routier::config::missing_key),
        help("add `{key} = <value>` to routier.toml")
    )]
    MissingKey { key: String },

    /// A well-typed value rejected by post-deserialization checks.
    #[error("validation error: {message}")]
    #[diagnostic(code(routier::config::validation))]
    Validation { message: String },

    /// Anything figment reports that has no richer mapping.
    #[error("configuration error: {0}")]
    #[diagnostic(code(routier::config::other))]
    Other(String),
}

/// Lifts every error in a figment chain into a [`ConfigError`].
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter().map(convert_error).collect()
}

fn convert_error(error: figment::Error) -> ConfigError {
    use figment::error::Kind;

    match &error.kind {
        Kind::UnknownField(field, accepted) => {
            let known: Vec<&str> = accepted.to_vec();
            ConfigError::UnknownKey {
                key: field.clone(),
                did_you_mean: suggest_key(field, &known),
                known_keys: known.join(", "),
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: field.clone().into_owned(),
        },
        Kind::InvalidType(actual, expected) => ConfigError::TypeMismatch {
            key: dotted_path(&error),
            found: actual.to_string(),
            expected: expected.clone(),
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

/// The error's location as a `section.key` path.
fn dotted_path(error: &figment::Error) -> String {
    error.path.join(".")
}

/// Best-scoring valid key above the similarity floor, if any.
fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

fn spell_help(did_you_mean: Option<&str>, known_keys: &str) -> String {
    match did_you_mean {
        Some(candidate) => format!("did you mean `{candidate}`? Valid keys: {known_keys}"),
        None => format!("valid keys: {known_keys}"),
    }
}

/// Writes every error to stderr through miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    let mut out = String::new();
    for error in errors {
        if handler
            .render_report(&mut out, error as &dyn Diagnostic)
            .is_err()
        {
            out.push_str(&format!("error: {error}\n"));
        }
    }
    eprint!("{out}");
}
