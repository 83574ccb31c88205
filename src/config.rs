//! Runtime i18n configuration.
//!
//! A small YAML document tells the embedding application which locale to
//! use when none is requested and how unresolvable locales map to close
//! relatives:
//!
//! ```yaml
//! default_locale: en_US
//! fallbacks:
//!   pt: pt_BR
//!   de_CH: de_DE
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::detection::detect_system_locale;

/// Parsed i18n configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale used when nothing else resolves.
    pub default_locale: String,
    /// Map of locale codes to the locale to try instead.
    pub fallbacks: HashMap<String, String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en_US".to_string(),
            fallbacks: HashMap::new(),
        }
    }
}

impl I18nConfig {
    /// What: Load configuration from a YAML file, leniently.
    ///
    /// Inputs:
    /// - `path`: Path to the configuration document
    ///
    /// Output:
    /// - Parsed configuration, or the defaults when the file is missing or
    ///   malformed (a warning is surfaced, startup is never blocked)
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_norway::from_str::<Self>(&contents) {
                Ok(config) => {
                    tracing::debug!(
                        path = %path.display(),
                        default_locale = config.default_locale,
                        fallbacks = config.fallbacks.len(),
                        "loaded i18n configuration"
                    );
                    config
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "malformed i18n configuration, using defaults"
                    );
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "i18n configuration not readable, using defaults"
                );
                Self::default()
            }
        }
    }
}

/// What: Choose the locale to activate out of the registered set.
///
/// Inputs:
/// - `requested`: Explicit locale request (settings, CLI flag); empty or
///   `None` means auto-detect from the environment
/// - `config`: Fallback map and default locale
/// - `registered`: Locales with a loaded catalog
///
/// Output:
/// - A locale to activate; the configured default when nothing matches
///
/// Details:
/// - Priority: requested locale -> configured fallback chain (cycle- and
///   length-guarded) -> language-part match against registered locales ->
///   default locale.
#[must_use]
pub fn choose_locale(requested: Option<&str>, config: &I18nConfig, registered: &[String]) -> String {
    let initial = requested
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToString::to_string)
        .or_else(detect_system_locale)
        .unwrap_or_else(|| config.default_locale.clone());

    let mut current = initial.clone();
    let mut visited = std::collections::HashSet::new();
    while visited.insert(current.clone()) {
        if registered.contains(&current) || current == config.default_locale {
            return current;
        }
        match config.fallbacks.get(&current) {
            Some(next) => current.clone_from(next),
            None => break,
        }
        if visited.len() > 10 {
            tracing::warn!(
                locale = initial,
                "fallback chain too long, using default locale"
            );
            return config.default_locale.clone();
        }
    }

    // No chain hit: try any registered locale sharing the language part.
    let language = language_of(&initial);
    if let Some(cousin) = registered.iter().find(|r| language_of(r) == language) {
        tracing::debug!(
            requested = initial,
            chosen = cousin.as_str(),
            "matched registered locale by language"
        );
        return cousin.clone();
    }

    config.default_locale.clone()
}

/// Lowercased language part of a locale ("pt_BR" -> "pt").
fn language_of(locale: &str) -> String {
    locale
        .split(['_', '-'])
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}
