//! Translation resolution and placeholder substitution.
//!
//! [`resolve`] is the single entry point UI code calls for every visible
//! string. It never fails: when the active catalog has no usable
//! translation the source text itself is the template, so the application
//! always shows something readable in the worst case.
//!
//! Resolution order:
//! 1. Look the `(context, source)` key up in the active catalog.
//! 2. Use the translation when it is Finished and, for plural messages,
//!    a non-empty variant exists for the count's plural class.
//! 3. Otherwise fall back to the source text; plural-aware source strings
//!    carry `singular|plural` forms picked with the source-language rule.
//! 4. Substitute `%1`..`%9` positionally (and `%n` with the count).
//!
//! A placeholder with no corresponding argument stays literal so malformed
//! call sites remain visible instead of silently dropping text.

use std::fmt;

use crate::catalog::{TranslationEntry, TranslationText};
use crate::plural::rule_one_other;
use crate::registry::Registry;

/// Delimiter separating the singular and plural forms embedded in a
/// plural-aware source string.
const SOURCE_PLURAL_DELIMITER: char = '|';

/// What: Resolve a context-scoped message to a display string.
///
/// Inputs:
/// - `registry`: Catalog registry to consult
/// - `context`: Context grouping name (e.g., "AboutDialog")
/// - `source`: Source-language string, the lookup key
/// - `args`: Positional arguments for `%1`..`%9` placeholders
/// - `count`: Plural count; selects the variant of plural messages and
///   substitutes `%n`
///
/// Output:
/// - Ready-to-display string; never an error marker
///
/// Details:
/// - Missing translations are not errors: the source text is the fallback
///   template, logged at debug level for translators.
/// - Extra unused arguments are ignored.
pub fn resolve(
    registry: &Registry,
    context: &str,
    source: &str,
    args: &[&dyn fmt::Display],
    count: Option<i64>,
) -> String {
    let (locale, catalog) = registry.active_snapshot();

    let template = catalog
        .as_deref()
        .and_then(|c| c.get(context, source))
        .and_then(|entry| select_template(entry, registry, &locale, count));

    let template = template.unwrap_or_else(|| {
        tracing::debug!(
            locale,
            context,
            source,
            "no usable translation, falling back to source text"
        );
        source_fallback(source, count)
    });

    substitute(&template, args, count)
}

/// What: Resolve a message without arguments or plural handling.
///
/// Inputs:
/// - `registry`: Catalog registry to consult
/// - `context`: Context grouping name
/// - `source`: Source-language string
///
/// Output:
/// - Ready-to-display string
#[must_use]
pub fn tr(registry: &Registry, context: &str, source: &str) -> String {
    resolve(registry, context, source, &[], None)
}

/// What: Resolve a plural-aware message for a count.
///
/// Inputs:
/// - `registry`: Catalog registry to consult
/// - `context`: Context grouping name
/// - `source`: Source-language string (may carry `singular|plural` forms)
/// - `count`: Item count, also substituted for `%n`
///
/// Output:
/// - Ready-to-display string
#[must_use]
pub fn tr_n(registry: &Registry, context: &str, source: &str, count: i64) -> String {
    resolve(registry, context, source, &[], Some(count))
}

/// What: Pick the translated template out of a catalog entry.
///
/// Output:
/// - `Some(template)` when the entry is usable for this request,
///   `None` to trigger source-text fallback
///
/// Details:
/// - Plural entries require a count; a plural lookup without one, a rule
///   index beyond the provided variants, or an empty variant body all fall
///   back rather than showing a blank.
fn select_template(
    entry: &TranslationEntry,
    registry: &Registry,
    locale: &str,
    count: Option<i64>,
) -> Option<String> {
    if !entry.is_usable() {
        return None;
    }
    match &entry.text {
        TranslationText::Single(text) => Some(text.clone()),
        TranslationText::Plural(variants) => {
            let count = count?;
            let index = registry.plural_rule(locale)(count);
            variants
                .get(index)
                .filter(|variant| !variant.is_empty())
                .cloned()
        }
    }
}

/// What: Build the fallback template from the source text itself.
///
/// Details:
/// - With a plural request, a source carrying both forms around the
///   delimiter is split and the source-language binary rule (singular
///   only for exactly one) picks the form.
fn source_fallback(source: &str, count: Option<i64>) -> String {
    if let Some(n) = count
        && let Some((singular, plural)) = source.split_once(SOURCE_PLURAL_DELIMITER)
    {
        return if rule_one_other(n) == 0 {
            singular.to_string()
        } else {
            plural.to_string()
        };
    }
    source.to_string()
}

/// What: Substitute positional placeholders into a template.
///
/// Inputs:
/// - `template`: Chosen template (translated or source text)
/// - `args`: Positional arguments; `%1` maps to `args[0]`
/// - `count`: Replaces `%n` when present
///
/// Output:
/// - Final display string
///
/// Details:
/// - Single pass; a `%N` with no matching argument (and `%n` without a
///   count) stays literal, and a trailing or non-placeholder `%` passes
///   through unchanged.
fn substitute(template: &str, args: &[&dyn fmt::Display], count: Option<i64>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('n') => {
                if let Some(n) = count {
                    chars.next();
                    out.push_str(&n.to_string());
                } else {
                    out.push('%');
                }
            }
            Some(digit @ '1'..='9') => {
                let index = (digit as usize) - ('1' as usize);
                if let Some(arg) = args.get(index) {
                    chars.next();
                    out.push_str(&arg.to_string());
                } else {
                    out.push('%');
                }
            }
            _ => out.push('%'),
        }
    }

    out
}
