//! Per-locale plural rules.
//!
//! Plural-aware messages carry one translated variant per cardinality
//! class; the rule for a locale maps a count to the index of the variant
//! to use. Rules live in a capability table keyed by locale so adding a
//! locale means adding a table entry, never touching the resolver.

use std::collections::HashMap;

/// Pure plural rule: maps a count to a variant index.
pub type PluralRuleFn = fn(i64) -> usize;

/// What: Source-language (English) rule: singular only for exactly one.
///
/// Inputs:
/// - `count`: Item count (sign is ignored)
///
/// Output:
/// - `0` for a count of 1, `1` otherwise
#[must_use]
pub fn rule_one_other(count: i64) -> usize {
    usize::from(count.unsigned_abs() != 1)
}

/// Romance-style rule: zero and one share the singular form (fr, pt, ...).
#[must_use]
pub fn rule_zero_one_other(count: i64) -> usize {
    usize::from(count.unsigned_abs() > 1)
}

/// East-Slavic rule with three forms: one / few / many (ru, uk, ...).
#[must_use]
pub fn rule_east_slavic(count: i64) -> usize {
    let n = count.unsigned_abs();
    let (tens, ones) = (n % 100, n % 10);
    if ones == 1 && tens != 11 {
        0
    } else if (2..=4).contains(&ones) && !(12..=14).contains(&tens) {
        1
    } else {
        2
    }
}

/// Polish rule: like East-Slavic but singular only for exactly one.
#[must_use]
pub fn rule_polish(count: i64) -> usize {
    let n = count.unsigned_abs();
    if n == 1 {
        return 0;
    }
    let (tens, ones) = (n % 100, n % 10);
    if (2..=4).contains(&ones) && !(12..=14).contains(&tens) {
        1
    } else {
        2
    }
}

/// Czech/Slovak rule with three forms: one / few (2-4) / other.
#[must_use]
pub fn rule_czech_slovak(count: i64) -> usize {
    match count.unsigned_abs() {
        1 => 0,
        2..=4 => 1,
        _ => 2,
    }
}

/// Arabic rule with the full six CLDR categories.
#[must_use]
pub fn rule_arabic(count: i64) -> usize {
    let n = count.unsigned_abs();
    match n {
        0 => 0,
        1 => 1,
        2 => 2,
        _ => match n % 100 {
            3..=10 => 3,
            11..=99 => 4,
            _ => 5,
        },
    }
}

/// Single-form rule for languages without grammatical number (ja, zh, ...).
#[must_use]
pub const fn rule_single(_count: i64) -> usize {
    0
}

/// What: Built-in rule for a bare language code, if one is known.
///
/// Details:
/// - Unlisted languages get no builtin and fall back to the source rule.
fn builtin_rule(language: &str) -> Option<PluralRuleFn> {
    match language {
        "en" | "de" | "nl" | "sv" | "da" | "no" | "nb" | "fi" | "et" | "el" | "hu" | "it"
        | "es" | "ca" | "bg" => Some(rule_one_other),
        "fr" | "pt" | "tr" | "hi" => Some(rule_zero_one_other),
        "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Some(rule_east_slavic),
        "pl" => Some(rule_polish),
        "cs" | "sk" => Some(rule_czech_slovak),
        "ar" => Some(rule_arabic),
        "ja" | "zh" | "ko" | "th" | "vi" | "id" => Some(rule_single),
        _ => None,
    }
}

/// Capability table mapping locales to plural rules.
///
/// Lookup precedence: exact-locale override, language-part override,
/// built-in rule for the language, source-language rule.
#[derive(Debug, Clone, Default)]
pub struct PluralRules {
    /// Runtime-registered rules keyed by locale or bare language code.
    overrides: HashMap<String, PluralRuleFn>,
}

impl PluralRules {
    /// Empty table with only the built-in rules active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Register or replace the rule for a locale.
    ///
    /// Inputs:
    /// - `locale`: Full locale ("pt_BR") or bare language code ("pt")
    /// - `rule`: Pure count-to-index function
    pub fn set(&mut self, locale: impl Into<String>, rule: PluralRuleFn) {
        self.overrides.insert(locale.into(), rule);
    }

    /// What: Resolve the rule to apply for a locale.
    ///
    /// Inputs:
    /// - `locale`: Locale identifier (e.g., "pt_BR")
    ///
    /// Output:
    /// - The matching rule, defaulting to the source-language rule
    #[must_use]
    pub fn rule_for(&self, locale: &str) -> PluralRuleFn {
        if let Some(rule) = self.overrides.get(locale) {
            return *rule;
        }
        let language = language_part(locale);
        if let Some(rule) = self.overrides.get(&language) {
            return *rule;
        }
        builtin_rule(&language).unwrap_or(rule_one_other)
    }
}

/// Lowercased language part of a locale ("pt_BR" -> "pt").
fn language_part(locale: &str) -> String {
    locale
        .split(['_', '-'])
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_one_other() {
        assert_eq!(rule_one_other(1), 0);
        assert_eq!(rule_one_other(-1), 0);
        assert_eq!(rule_one_other(0), 1);
        assert_eq!(rule_one_other(2), 1);
        assert_eq!(rule_one_other(100), 1);
    }

    #[test]
    fn test_rule_zero_one_other() {
        assert_eq!(rule_zero_one_other(0), 0);
        assert_eq!(rule_zero_one_other(1), 0);
        assert_eq!(rule_zero_one_other(2), 1);
    }

    #[test]
    fn test_rule_east_slavic() {
        assert_eq!(rule_east_slavic(1), 0);
        assert_eq!(rule_east_slavic(21), 0);
        assert_eq!(rule_east_slavic(3), 1);
        assert_eq!(rule_east_slavic(24), 1);
        assert_eq!(rule_east_slavic(5), 2);
        assert_eq!(rule_east_slavic(11), 2);
        assert_eq!(rule_east_slavic(14), 2);
        assert_eq!(rule_east_slavic(100), 2);
    }

    #[test]
    fn test_rule_polish() {
        assert_eq!(rule_polish(1), 0);
        assert_eq!(rule_polish(21), 2); // unlike Russian
        assert_eq!(rule_polish(3), 1);
        assert_eq!(rule_polish(13), 2);
    }

    #[test]
    fn test_rule_czech_slovak() {
        assert_eq!(rule_czech_slovak(1), 0);
        assert_eq!(rule_czech_slovak(3), 1);
        assert_eq!(rule_czech_slovak(5), 2);
        assert_eq!(rule_czech_slovak(0), 2);
    }

    #[test]
    fn test_rule_arabic() {
        assert_eq!(rule_arabic(0), 0);
        assert_eq!(rule_arabic(1), 1);
        assert_eq!(rule_arabic(2), 2);
        assert_eq!(rule_arabic(5), 3);
        assert_eq!(rule_arabic(103), 3);
        assert_eq!(rule_arabic(15), 4);
        assert_eq!(rule_arabic(100), 5);
    }

    #[test]
    fn test_rule_for_precedence() {
        let mut rules = PluralRules::new();
        // Builtin via language part.
        assert_eq!(rules.rule_for("ru_RU")(3), 1);
        // Unknown language defaults to the source rule.
        assert_eq!(rules.rule_for("xx_XX")(1), 0);
        assert_eq!(rules.rule_for("xx_XX")(2), 1);

        // Language-wide override.
        rules.set("xx", rule_single);
        assert_eq!(rules.rule_for("xx_XX")(2), 0);

        // Exact-locale override beats the language one.
        rules.set("xx_XX", rule_arabic);
        assert_eq!(rules.rule_for("xx_XX")(0), 0);
        assert_eq!(rules.rule_for("xx_YY")(7), 0); // still the language rule
    }
}
