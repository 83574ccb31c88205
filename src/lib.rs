//! Context-scoped translation catalog and lookup engine for Qt Linguist TS
//! resources.
//!
//! # Overview
//!
//! Applications ship one serialized resource per locale, each mapping
//! `(context, source string)` pairs to translated strings. This crate
//! provides the three pieces such an application needs at runtime:
//!
//! - **Loading**: [`loader::load_catalog`] parses one resource into an
//!   immutable [`catalog::Catalog`], all-or-nothing.
//! - **Registry**: [`registry::Registry`] holds the loaded catalogs, tracks
//!   the active locale, and swaps it atomically so concurrent readers never
//!   observe a torn mix of old and new data.
//! - **Resolution**: [`resolver::resolve`] turns a `(context, source, args,
//!   plural count)` tuple into a ready-to-display string, substituting
//!   `%1`..`%9` placeholders and selecting plural variants by per-locale
//!   rules ([`plural`]).
//!
//! Missing or unfinished translations are not errors: resolution falls back
//! to the source-language text so every UI element always shows something
//! readable. Placeholders with no corresponding argument stay literal so
//! malformed call sites remain visible.
//!
//! # Usage
//!
//! ```rust
//! use tscat::{Registry, load_catalog, resolve};
//!
//! let resource = r#"<TS language="pt_BR" version="2.1">
//! <context>
//!     <name>AboutDialog</name>
//!     <message>
//!         <source>About %1 %2</source>
//!         <translation>Sobre %1 %2</translation>
//!     </message>
//! </context>
//! </TS>"#;
//!
//! let registry = Registry::new("en_US");
//! registry.register(load_catalog(resource).expect("valid resource"));
//! registry.set_active_locale("pt_BR").expect("registered locale");
//!
//! let text = resolve(&registry, "AboutDialog", "About %1 %2", &[&"Control Center", &"4.0"], None);
//! assert_eq!(text, "Sobre Control Center 4.0");
//! ```
//!
//! # Error Handling
//!
//! - Loading fails with a descriptive [`loader::ParseError`] on malformed
//!   structure and never yields a partial catalog.
//! - Activating an unknown locale fails with
//!   [`registry::RegistryError::LocaleNotRegistered`] and leaves the active
//!   locale unchanged.
//! - Resolution never fails; fallbacks are logged at debug level only.

pub mod args;
pub mod catalog;
pub mod config;
pub mod detection;
pub mod loader;
pub mod plural;
pub mod registry;
pub mod resolver;

pub use catalog::{
    Catalog, MessageKey, StatusCounts, TranslationEntry, TranslationStatus, TranslationText,
};
pub use config::{I18nConfig, choose_locale};
pub use detection::detect_system_locale;
pub use loader::{ParseError, load_catalog, load_catalog_file};
pub use plural::{PluralRuleFn, PluralRules};
pub use registry::{Registry, RegistryError};
pub use resolver::{resolve, tr, tr_n};
