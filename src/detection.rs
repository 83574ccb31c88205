//! System locale detection.

use std::env;

/// What: Detect the host locale from environment variables.
///
/// Inputs:
/// - None (reads from environment)
///
/// Output:
/// - `Option<String>` with a normalized locale (e.g., "pt_BR"), or `None`
///   when nothing usable is set
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES` and `LANG` in that order.
/// - "C" and "POSIX" are not locales in the catalog sense and yield `None`.
#[must_use]
pub fn detect_system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find_map(|value| parse_locale_string(&value))
}

/// What: Normalize an environment locale string.
///
/// Inputs:
/// - `locale_str`: Raw value like "pt_BR.UTF-8", "de-DE", "en_US.utf8@euro"
///
/// Output:
/// - `Option<String>` in `language_REGION` form, or `None` when invalid
///
/// Details:
/// - Strips the encoding (`.UTF-8`) and modifier (`@euro`) suffixes.
/// - Language part is lowercased, the region part uppercased; catalogs key
///   their locales with an underscore separator ("pt_BR").
fn parse_locale_string(locale_str: &str) -> Option<String> {
    let trimmed = locale_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    let base = trimmed
        .split('.')
        .next()
        .and_then(|s| s.split('@').next())?;
    if base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return None;
    }

    let normalized = base.replace('-', "_");
    let mut parts = normalized.split('_');
    let language = parts.next()?;
    if language.is_empty() || language.len() > 3 || !language.chars().all(|c| c.is_ascii_alphabetic())
    {
        return None;
    }

    let mut result = language.to_lowercase();
    if let Some(region) = parts.next() {
        if region.is_empty() || region.len() > 4 || !region.chars().all(char::is_alphanumeric) {
            return None;
        }
        result.push('_');
        result.push_str(&region.to_uppercase());
    }
    Some(result)
}
