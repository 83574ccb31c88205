//! Translation catalog data model.
//!
//! A [`Catalog`] is the in-memory form of one loaded locale resource: an
//! immutable mapping from `(context, source)` pairs to translation entries.
//! Catalogs are built once by the loader and replaced wholesale on reload;
//! nothing in this module mutates a catalog after construction apart from
//! the loader's own insert path.

use std::collections::HashMap;

/// Composite lookup key scoping a source string to a UI context.
///
/// Two entries with identical source text but different contexts are
/// distinct and may carry different translations (e.g. "Remote control"
/// as a menu action vs. a toolbar button).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    /// Grouping label naming the UI component the message belongs to.
    pub context: String,
    /// Original-language string, possibly containing `%1`..`%9` placeholders.
    pub source: String,
}

impl MessageKey {
    /// What: Build a lookup key from a context and source string.
    ///
    /// Inputs:
    /// - `context`: Context grouping name (e.g., "AboutDialog")
    /// - `source`: Source-language string
    ///
    /// Output:
    /// - `MessageKey` usable for catalog lookups
    pub fn new(context: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// Translation status decided once at load time.
///
/// The serialized resource marks entries with a loosely-typed `type`
/// attribute; the loader maps it to this closed enumeration so no other
/// component ever re-inspects the raw marker string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStatus {
    /// Usable translation.
    Finished,
    /// Translation pending; carries no usable text and triggers fallback.
    Unfinished,
    /// No longer referenced by current UI code; never returned to callers.
    Obsolete,
}

/// Translated text of a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationText {
    /// Plain message with exactly one form.
    Single(String),
    /// Plural-aware message: ordered per-cardinality variants, selected at
    /// resolve time by the locale's plural rule.
    Plural(Vec<String>),
}

impl TranslationText {
    /// What: Check whether the text carries any usable content.
    ///
    /// Output:
    /// - `true` when at least one non-empty form exists
    #[must_use]
    pub fn has_content(&self) -> bool {
        match self {
            Self::Single(s) => !s.is_empty(),
            Self::Plural(forms) => forms.iter().any(|f| !f.is_empty()),
        }
    }
}

/// One parsed message entry of a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Composite lookup key.
    pub key: MessageKey,
    /// Translated text (single form or plural variants).
    pub text: TranslationText,
    /// Load-time status.
    pub status: TranslationStatus,
}

impl TranslationEntry {
    /// What: Check whether this entry may be returned to a caller.
    ///
    /// Output:
    /// - `true` only for Finished entries with non-empty text
    ///
    /// Details:
    /// - An empty-bodied translation, even when marked Finished, behaves
    ///   like a missing one so the resolver falls back to source text.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.status == TranslationStatus::Finished && self.text.has_content()
    }
}

/// Per-status entry totals of one catalog, used for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Entries with a usable translation.
    pub finished: usize,
    /// Entries awaiting translation.
    pub unfinished: usize,
    /// Entries kept only for translator continuity.
    pub obsolete: usize,
}

/// Full set of translation entries for one locale.
///
/// Immutable after the loader finishes building it; the registry shares it
/// behind an `Arc` so locale switches are pointer swaps, never in-place
/// patches.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Locale identifier from the resource (e.g., "pt_BR").
    locale: String,
    /// Lookup table keyed by `(context, source)`.
    entries: HashMap<MessageKey, TranslationEntry>,
}

impl Catalog {
    /// What: Create an empty catalog for a locale.
    ///
    /// Inputs:
    /// - `locale`: Locale identifier (e.g., "pt_BR")
    pub(crate) fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: HashMap::new(),
        }
    }

    /// What: Insert an entry, returning any previous entry under the same key.
    ///
    /// Details:
    /// - Last-wins semantics; the loader surfaces a warning when the
    ///   returned previous entry is `Some`.
    pub(crate) fn insert(&mut self, entry: TranslationEntry) -> Option<TranslationEntry> {
        self.entries.insert(entry.key.clone(), entry)
    }

    /// Locale identifier this catalog was loaded for.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// What: Look up an entry by context and source string.
    ///
    /// Inputs:
    /// - `context`: Context grouping name
    /// - `source`: Source-language string
    ///
    /// Output:
    /// - `Some(&TranslationEntry)` for any stored entry (including
    ///   Unfinished and Obsolete ones), `None` when the key is absent
    ///
    /// Details:
    /// - Status filtering is the registry's job; the catalog itself returns
    ///   whatever the resource contained.
    #[must_use]
    pub fn get(&self, context: &str, source: &str) -> Option<&TranslationEntry> {
        self.entries.get(&MessageKey::new(context, source))
    }

    /// Number of entries in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.values()
    }

    /// What: Tally entries by status for diagnostics.
    ///
    /// Output:
    /// - `StatusCounts` with finished/unfinished/obsolete totals
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for entry in self.entries.values() {
            match entry.status {
                TranslationStatus::Finished => counts.finished += 1,
                TranslationStatus::Unfinished => counts.unfinished += 1,
                TranslationStatus::Obsolete => counts.obsolete += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(context: &str, source: &str, text: &str, status: TranslationStatus) -> TranslationEntry {
        TranslationEntry {
            key: MessageKey::new(context, source),
            text: TranslationText::Single(text.to_string()),
            status,
        }
    }

    #[test]
    fn test_context_scoping() {
        let mut catalog = Catalog::new("pt_BR");
        catalog.insert(entry(
            "MainWindow",
            "Remote control",
            "Controle remoto",
            TranslationStatus::Finished,
        ));
        catalog.insert(entry(
            "MasterCore",
            "Remote control",
            "Acesso remoto",
            TranslationStatus::Finished,
        ));

        assert_eq!(catalog.len(), 2);
        let a = catalog
            .get("MainWindow", "Remote control")
            .expect("MainWindow entry should exist");
        let b = catalog
            .get("MasterCore", "Remote control")
            .expect("MasterCore entry should exist");
        assert_eq!(a.text, TranslationText::Single("Controle remoto".to_string()));
        assert_eq!(b.text, TranslationText::Single("Acesso remoto".to_string()));
    }

    #[test]
    fn test_insert_last_wins() {
        let mut catalog = Catalog::new("pt_BR");
        let first = entry("Ctx", "Test", "Primeiro", TranslationStatus::Finished);
        let second = entry("Ctx", "Test", "Segundo", TranslationStatus::Finished);

        assert!(catalog.insert(first).is_none());
        let previous = catalog.insert(second);
        assert!(previous.is_some());
        assert_eq!(
            catalog.get("Ctx", "Test").map(|e| &e.text),
            Some(&TranslationText::Single("Segundo".to_string()))
        );
    }

    #[test]
    fn test_is_usable() {
        let finished = entry("C", "a", "b", TranslationStatus::Finished);
        let unfinished = entry("C", "a", "", TranslationStatus::Unfinished);
        let empty_finished = entry("C", "a", "", TranslationStatus::Finished);
        let obsolete = entry("C", "a", "b", TranslationStatus::Obsolete);

        assert!(finished.is_usable());
        assert!(!unfinished.is_usable());
        assert!(!empty_finished.is_usable());
        assert!(!obsolete.is_usable());
    }

    #[test]
    fn test_plural_has_content() {
        let empty = TranslationText::Plural(vec![String::new(), String::new()]);
        let partial = TranslationText::Plural(vec!["%n arquivo".to_string(), String::new()]);
        assert!(!empty.has_content());
        assert!(partial.has_content());
    }

    #[test]
    fn test_status_counts() {
        let mut catalog = Catalog::new("pt_BR");
        catalog.insert(entry("A", "one", "um", TranslationStatus::Finished));
        catalog.insert(entry("A", "two", "", TranslationStatus::Unfinished));
        catalog.insert(entry("A", "three", "", TranslationStatus::Unfinished));
        catalog.insert(entry("A", "four", "quatro", TranslationStatus::Obsolete));

        let counts = catalog.status_counts();
        assert_eq!(counts.finished, 1);
        assert_eq!(counts.unfinished, 2);
        assert_eq!(counts.obsolete, 1);
    }
}
