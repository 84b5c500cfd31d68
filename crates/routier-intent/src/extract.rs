// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parameter extractors: pull a city name or an arithmetic expression out
//! of unstructured query text. Pure functions; all policy is here, none in
//! the callers.

use std::sync::LazyLock;

use regex::Regex;

use crate::classifier::WEATHER_KEYWORDS;

/// Preposition markers introducing a location. Space-delimited so word
/// prefixes ("winter") never match.
const CITY_MARKERS: &[&str] = &[" in ", " at ", " on "];

/// Trailing filler words stripped from a city candidate. Longer phrases
/// first, so "right now" is removed whole instead of leaving "right".
const TEMPORAL_FILLERS: &[&str] = &[" right now", " currently", " today", " now"];

/// Characters stripped from the ends of a candidate phrase.
const EDGE_PUNCT: &[char] = &[' ', '?', '.', '!', ',', '\t', '\n', '\r'];

/// Connective words that end a city phrase in the comma fallback.
const CITY_STOPWORDS: &[&str] = &["for", "of", "the", "like", "about", "is", "it"];

/// Markers whose trailing text is the arithmetic expression.
const EXPRESSION_MARKERS: &[&str] = &["what is", "calculate"];

static THOUSANDS_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]),([0-9])").unwrap());

/// Extract a city name from a query.
///
/// The rightmost preposition marker wins, favoring trailing location
/// mentions ("i was at home in Paris" -> "Paris"). Without a marker, a
/// "City, Region" comma pattern is tried. `None` means the caller should
/// use its configured default city.
pub fn extract_city(query: &str) -> Option<String> {
    let lowered = query.trim().to_lowercase();

    let marker_end = CITY_MARKERS
        .iter()
        .filter_map(|marker| lowered.rfind(marker).map(|idx| idx + marker.len()))
        .max();

    if let Some(start) = marker_end {
        let candidate = strip_fillers(&lowered[start..]);
        if candidate.is_empty() {
            return None;
        }
        return Some(title_case(candidate));
    }

    comma_fallback(&lowered)
}

/// Extract the arithmetic expression from a query: text after a request
/// marker if present, trailing punctuation removed, thousands-separator
/// commas collapsed.
pub fn extract_expression(query: &str) -> String {
    let lowered = query.trim().to_lowercase();

    let mut expr = lowered.as_str();
    for marker in EXPRESSION_MARKERS {
        if let Some(idx) = expr.find(marker) {
            expr = &expr[idx + marker.len()..];
            break;
        }
    }

    let expr = expr.trim().trim_end_matches(['?', '.', '!']).trim_end();
    strip_thousands_commas(expr)
}

/// Trim edge punctuation and trailing temporal fillers until stable.
fn strip_fillers(candidate: &str) -> &str {
    let mut city = candidate;
    loop {
        city = city.trim_matches(|c: char| EDGE_PUNCT.contains(&c));
        let mut stripped = false;
        for filler in TEMPORAL_FILLERS {
            if let Some(rest) = city.strip_suffix(filler) {
                city = rest;
                stripped = true;
                break;
            }
        }
        if !stripped {
            return city;
        }
    }
}

/// "City, Region" fallback: up to two non-keyword words before the first
/// comma plus the first word after it.
fn comma_fallback(lowered: &str) -> Option<String> {
    let comma = lowered.find(',')?;
    let after = lowered[comma + 1..].trim_start();

    let region = after
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| EDGE_PUNCT.contains(&c));
    if region.is_empty() || !region.chars().all(char::is_alphabetic) {
        return None;
    }

    let mut rev_words = Vec::new();
    for word in lowered[..comma].split_whitespace().rev() {
        if !word.chars().all(char::is_alphabetic)
            || WEATHER_KEYWORDS.contains(&word)
            || CITY_STOPWORDS.contains(&word)
        {
            break;
        }
        rev_words.push(word);
        if rev_words.len() == 2 {
            break;
        }
    }
    if rev_words.is_empty() {
        return None;
    }
    rev_words.reverse();

    let city = rev_words.join(" ");
    Some(title_case(&format!("{city}, {region}")))
}

/// Title-case word-by-word: first letter uppercased, the rest lowercase.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_thousands_commas(expr: &str) -> String {
    let mut text = expr.to_string();
    loop {
        let replaced = THOUSANDS_COMMA.replace_all(&text, "$1$2").into_owned();
        if replaced == text {
            return text;
        }
        text = replaced;
    }
}
