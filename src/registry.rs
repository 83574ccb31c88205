//! Process-wide catalog registry with atomic locale switching.
//!
//! The registry owns every loaded [`Catalog`] behind an `Arc` and tracks
//! the active locale. It is an explicit, injectable service object rather
//! than a hidden singleton: construct one at startup, hand out references,
//! and tests can spin up as many independent registries as they need.
//!
//! Catalogs and the active-locale pointer live inside one `RwLock`d state
//! struct, so a resolve call takes a single consistent snapshot (one lock
//! acquisition, one `Arc` clone) and can never observe a torn mix of old
//! and new catalog data, even while another thread swaps locales.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::catalog::{Catalog, TranslationEntry, TranslationStatus};
use crate::loader::{ParseError, load_catalog_file};
use crate::plural::{PluralRuleFn, PluralRules};

/// Errors produced by registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Activation was requested for a locale with no registered catalog.
    LocaleNotRegistered(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocaleNotRegistered(locale) => {
                write!(f, "no catalog registered for locale {locale:?}")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Shared mutable registry state guarded by one lock.
#[derive(Debug)]
struct RegistryState {
    /// Loaded catalogs keyed by locale identifier.
    catalogs: HashMap<String, Arc<Catalog>>,
    /// Currently active locale.
    active: String,
}

/// Catalog registry plus plural-rule table.
///
/// Many concurrent readers proceed without blocking each other;
/// `register` and `set_active_locale` take the write lock briefly.
#[derive(Debug)]
pub struct Registry {
    /// Catalogs and active-locale pointer.
    state: RwLock<RegistryState>,
    /// Per-locale plural rules, extensible at runtime.
    rules: RwLock<PluralRules>,
    /// Source-language locale; always activatable, resolves to source text.
    fallback_locale: String,
}

impl Registry {
    /// What: Create a registry with the given fallback (source) locale.
    ///
    /// Inputs:
    /// - `fallback_locale`: Source-language locale identifier (e.g., "en_US")
    ///
    /// Output:
    /// - Registry with no catalogs and the fallback locale active
    pub fn new(fallback_locale: impl Into<String>) -> Self {
        let fallback_locale = fallback_locale.into();
        Self {
            state: RwLock::new(RegistryState {
                catalogs: HashMap::new(),
                active: fallback_locale.clone(),
            }),
            rules: RwLock::new(PluralRules::new()),
            fallback_locale,
        }
    }

    /// What: Insert or replace the catalog for its own locale.
    ///
    /// Inputs:
    /// - `catalog`: Fully built catalog; its locale keys the registration
    ///
    /// Details:
    /// - When the replaced locale is active, the swap is visible atomically
    ///   to subsequent resolutions; in-flight resolutions keep the snapshot
    ///   they already took.
    pub fn register(&self, catalog: Catalog) {
        let locale = catalog.locale().to_string();
        let entries = catalog.len();
        let mut state = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        state.catalogs.insert(locale.clone(), Arc::new(catalog));
        drop(state);
        tracing::debug!(locale, entries, "registered catalog");
    }

    /// What: Switch the active locale.
    ///
    /// Inputs:
    /// - `locale`: Locale to activate
    ///
    /// Output:
    /// - `Ok(())` on success
    ///
    /// # Errors
    /// - Returns `Err(RegistryError::LocaleNotRegistered)` when no catalog
    ///   was ever registered for `locale`; the active locale is unchanged
    ///
    /// Details:
    /// - The fallback (source) locale is always activatable, even with no
    ///   catalog registered for it: activating it simply means every
    ///   resolution takes the source-text path.
    pub fn set_active_locale(&self, locale: &str) -> Result<(), RegistryError> {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if locale != self.fallback_locale && !state.catalogs.contains_key(locale) {
            return Err(RegistryError::LocaleNotRegistered(locale.to_string()));
        }
        state.active = locale.to_string();
        drop(state);
        tracing::debug!(locale, "active locale switched");
        Ok(())
    }

    /// Currently active locale identifier.
    #[must_use]
    pub fn active_locale(&self) -> String {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .active
            .clone()
    }

    /// Fallback (source-language) locale identifier.
    #[must_use]
    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    /// Registered locale identifiers, sorted for deterministic output.
    #[must_use]
    pub fn locales(&self) -> Vec<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut locales: Vec<String> = state.catalogs.keys().cloned().collect();
        drop(state);
        locales.sort_unstable();
        locales
    }

    /// What: Take a consistent snapshot of the active locale and catalog.
    ///
    /// Output:
    /// - `(active locale, Some(catalog))`, or `None` when the active locale
    ///   has no catalog (fallback locale without one)
    ///
    /// Details:
    /// - One lock acquisition; the returned `Arc` stays valid for the whole
    ///   resolve call regardless of concurrent `register`/locale switches.
    #[must_use]
    pub fn active_snapshot(&self) -> (String, Option<Arc<Catalog>>) {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let catalog = state.catalogs.get(&state.active).cloned();
        (state.active.clone(), catalog)
    }

    /// What: Look up an entry in the active catalog only.
    ///
    /// Inputs:
    /// - `context`: Context grouping name
    /// - `source`: Source-language string
    ///
    /// Output:
    /// - `Some(TranslationEntry)` for present, non-Obsolete entries;
    ///   `None` otherwise
    ///
    /// Details:
    /// - Obsolete entries exist only for translator continuity and are
    ///   never returned to callers.
    #[must_use]
    pub fn lookup(&self, context: &str, source: &str) -> Option<TranslationEntry> {
        let (_, catalog) = self.active_snapshot();
        catalog
            .as_deref()
            .and_then(|c| c.get(context, source))
            .filter(|entry| entry.status != TranslationStatus::Obsolete)
            .cloned()
    }

    /// What: Reload a locale resource from disk, fail-open.
    ///
    /// Inputs:
    /// - `path`: Path to the `.ts` resource
    ///
    /// Output:
    /// - `Ok(locale)` of the freshly registered catalog
    ///
    /// # Errors
    /// - Returns `Err(ParseError)` when the file cannot be read or parsed;
    ///   the previously registered catalog (if any) stays active and intact
    pub fn reload_file(&self, path: &Path) -> Result<String, ParseError> {
        let catalog = match load_catalog_file(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "reload failed, keeping previous catalog"
                );
                return Err(err);
            }
        };
        let locale = catalog.locale().to_string();
        self.register(catalog);
        Ok(locale)
    }

    /// What: Register or replace the plural rule for a locale.
    ///
    /// Inputs:
    /// - `locale`: Full locale or bare language code
    /// - `rule`: Pure count-to-index function
    pub fn set_plural_rule(&self, locale: impl Into<String>, rule: PluralRuleFn) {
        self.rules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(locale, rule);
    }

    /// Plural rule in effect for a locale.
    #[must_use]
    pub fn plural_rule(&self, locale: &str) -> PluralRuleFn {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rule_for(locale)
    }
}
