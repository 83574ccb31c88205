//! Locale resource loading and parsing.
//!
//! Parses Qt Linguist TS documents into [`Catalog`] values. The parser is a
//! small hand-written pull parser covering exactly the subset the resources
//! use: the `TS` root with its `language` attribute, `context`/`name`
//! groupings, `message` entries with `source` and `translation` elements,
//! `numerus` plural variants, XML comments, processing instructions and the
//! `DOCTYPE` declaration. Unknown elements (`location`, `comment`, ...) are
//! skipped. Loading is all-or-nothing: a structural error fails the whole
//! load and never yields a partially populated catalog.

use std::fs;
use std::path::Path;

use crate::catalog::{Catalog, MessageKey, TranslationEntry, TranslationStatus, TranslationText};

/// Errors produced while loading a locale resource.
///
/// Inputs: Generated internally by the parser.
///
/// Output: Implements `Display`/`Error` for ergonomic propagation.
///
/// Details:
/// - Structural problems carry the line number where they were detected.
/// - I/O failures are only produced by [`load_catalog_file`].
#[derive(Debug)]
pub enum ParseError {
    /// I/O error while reading the resource file.
    Io(std::io::Error),
    /// Malformed XML markup.
    Syntax {
        /// Line where the problem was detected (1-based).
        line: usize,
        /// Human-readable description.
        message: String,
    },
    /// The root element is not `TS`.
    UnexpectedRoot {
        /// Name of the element actually found.
        found: String,
    },
    /// The `TS` root carries no `language` attribute.
    MissingLanguage,
    /// A message was reached inside a context that has no `name`.
    MissingContextName {
        /// Line of the offending message.
        line: usize,
    },
    /// A message entry carries no `source` element.
    MissingSource {
        /// Context the message belongs to.
        context: String,
        /// Line where the message ends.
        line: usize,
    },
    /// A `message` element appeared outside any `context` grouping.
    MessageOutsideContext {
        /// Line of the offending message.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Syntax { line, message } => write!(f, "syntax error at line {line}: {message}"),
            Self::UnexpectedRoot { found } => {
                write!(f, "expected TS root element, found <{found}>")
            }
            Self::MissingLanguage => write!(f, "TS root element has no language attribute"),
            Self::MissingContextName { line } => {
                write!(f, "message at line {line} belongs to a context without a name")
            }
            Self::MissingSource { context, line } => {
                write!(
                    f,
                    "message ending at line {line} in context {context:?} has no source element"
                )
            }
            Self::MessageOutsideContext { line } => {
                write!(f, "message at line {line} appears outside any context")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// What: Load and parse a locale resource file.
///
/// Inputs:
/// - `path`: Path to a `.ts` document
///
/// Output:
/// - `Result<Catalog, ParseError>` with the fully built catalog
///
/// # Errors
/// - Returns `Err` when the file cannot be read (I/O error)
/// - Returns `Err` when the document is structurally malformed (see
///   [`load_catalog`] for the individual conditions)
pub fn load_catalog_file(path: &Path) -> Result<Catalog, ParseError> {
    let contents = fs::read_to_string(path)?;
    let catalog = load_catalog(&contents)?;
    tracing::debug!(
        path = %path.display(),
        locale = catalog.locale(),
        entries = catalog.len(),
        "loaded locale resource"
    );
    Ok(catalog)
}

/// What: Parse a locale resource document into a catalog.
///
/// Inputs:
/// - `input`: Full document text
///
/// Output:
/// - `Result<Catalog, ParseError>` with the fully built catalog
///
/// # Errors
/// - Returns `Err(ParseError::Syntax)` on malformed markup
/// - Returns `Err(ParseError::UnexpectedRoot)` when the root is not `TS`
/// - Returns `Err(ParseError::MissingLanguage)` when the root carries no
///   `language` attribute
/// - Returns `Err(ParseError::MissingContextName)`,
///   `Err(ParseError::MissingSource)` or
///   `Err(ParseError::MessageOutsideContext)` on structural nesting errors
///
/// Details:
/// - Duplicate `(context, source)` pairs are tolerated with last-wins
///   semantics and a surfaced warning.
/// - XML entity references (`&lt;`, `&#xNN;`, ...) are decoded here, at
///   load time, so downstream components never see escaped text.
pub fn load_catalog(input: &str) -> Result<Catalog, ParseError> {
    let mut parser = TsParser::new(input);
    let root = parser.next_open_tag()?.ok_or_else(|| ParseError::Syntax {
        line: parser.line,
        message: "document contains no root element".to_string(),
    })?;

    if root.name != "TS" {
        return Err(ParseError::UnexpectedRoot { found: root.name });
    }
    let locale = root
        .attr("language")
        .ok_or(ParseError::MissingLanguage)?
        .to_string();

    let mut catalog = Catalog::new(locale);
    if root.self_closing {
        return Ok(catalog);
    }

    loop {
        match parser.next_event()? {
            Event::Open(tag) if tag.name == "context" => {
                if !tag.self_closing {
                    parse_context(&mut parser, &mut catalog)?;
                }
            }
            Event::Open(tag) if tag.name == "message" => {
                return Err(ParseError::MessageOutsideContext { line: tag.line });
            }
            Event::Open(tag) => parser.skip_element(&tag)?,
            Event::Close(name, line) => {
                if name == "TS" {
                    break;
                }
                return Err(ParseError::Syntax {
                    line,
                    message: format!("unexpected closing tag </{name}>"),
                });
            }
            Event::Text(_) => {}
            Event::Eof => {
                return Err(ParseError::Syntax {
                    line: parser.line,
                    message: "unexpected end of document inside <TS>".to_string(),
                });
            }
        }
    }

    Ok(catalog)
}

/// What: Parse one `<context>` grouping into catalog entries.
///
/// Details:
/// - The `<name>` element must precede any `<message>`; a message reached
///   before the name is a structural error.
fn parse_context(parser: &mut TsParser<'_>, catalog: &mut Catalog) -> Result<(), ParseError> {
    let mut name: Option<String> = None;

    loop {
        match parser.next_event()? {
            Event::Open(tag) if tag.name == "name" => {
                name = Some(if tag.self_closing {
                    String::new()
                } else {
                    parser.read_text(&tag.name)?
                });
            }
            Event::Open(tag) if tag.name == "message" => {
                let context = name
                    .clone()
                    .ok_or(ParseError::MissingContextName { line: tag.line })?;
                if tag.self_closing {
                    return Err(ParseError::MissingSource {
                        context,
                        line: tag.line,
                    });
                }
                let numerus = tag.attr("numerus") == Some("yes");
                parse_message(parser, catalog, &context, numerus)?;
            }
            Event::Open(tag) => parser.skip_element(&tag)?,
            Event::Close(tag_name, line) => {
                if tag_name == "context" {
                    return Ok(());
                }
                return Err(ParseError::Syntax {
                    line,
                    message: format!("unexpected closing tag </{tag_name}> inside <context>"),
                });
            }
            Event::Text(_) => {}
            Event::Eof => {
                return Err(ParseError::Syntax {
                    line: parser.line,
                    message: "unexpected end of document inside <context>".to_string(),
                });
            }
        }
    }
}

/// What: Parse one `<message>` entry and insert it into the catalog.
///
/// Details:
/// - A missing `<translation>` element is treated as Unfinished.
/// - Duplicate keys warn and keep the later entry.
fn parse_message(
    parser: &mut TsParser<'_>,
    catalog: &mut Catalog,
    context: &str,
    numerus: bool,
) -> Result<(), ParseError> {
    let mut source: Option<String> = None;
    let mut translation: Option<(TranslationStatus, TranslationText)> = None;

    loop {
        match parser.next_event()? {
            Event::Open(tag) if tag.name == "source" => {
                source = Some(if tag.self_closing {
                    String::new()
                } else {
                    parser.read_text(&tag.name)?
                });
            }
            Event::Open(tag) if tag.name == "translation" => {
                translation = Some(parse_translation(parser, &tag, numerus)?);
            }
            Event::Open(tag) => parser.skip_element(&tag)?,
            Event::Close(name, line) => {
                if name == "message" {
                    let Some(source) = source else {
                        return Err(ParseError::MissingSource {
                            context: context.to_string(),
                            line,
                        });
                    };
                    let (status, text) = translation.unwrap_or_else(|| {
                        (TranslationStatus::Unfinished, empty_text(numerus))
                    });
                    let key = MessageKey::new(context, source);
                    let entry = TranslationEntry { key, text, status };
                    if let Some(previous) = catalog.insert(entry) {
                        tracing::warn!(
                            context = previous.key.context,
                            source = previous.key.source,
                            "duplicate message in resource, keeping the later entry"
                        );
                    }
                    return Ok(());
                }
                return Err(ParseError::Syntax {
                    line,
                    message: format!("unexpected closing tag </{name}> inside <message>"),
                });
            }
            Event::Text(_) => {}
            Event::Eof => {
                return Err(ParseError::Syntax {
                    line: parser.line,
                    message: "unexpected end of document inside <message>".to_string(),
                });
            }
        }
    }
}

/// What: Parse a `<translation>` element body and its status marker.
///
/// Details:
/// - `type="unfinished"` maps to Unfinished, `type="obsolete"` and
///   `type="vanished"` to Obsolete, anything else (including no attribute)
///   to Finished.
/// - For numerus messages the ordered `<numerusform>` bodies become the
///   plural variant list; they are never collapsed into one flat string.
fn parse_translation(
    parser: &mut TsParser<'_>,
    tag: &Tag,
    numerus: bool,
) -> Result<(TranslationStatus, TranslationText), ParseError> {
    let status = match tag.attr("type") {
        Some("unfinished") => TranslationStatus::Unfinished,
        Some("obsolete" | "vanished") => TranslationStatus::Obsolete,
        _ => TranslationStatus::Finished,
    };

    if tag.self_closing {
        return Ok((status, empty_text(numerus)));
    }

    if numerus {
        let mut forms = Vec::new();
        loop {
            match parser.next_event()? {
                Event::Open(form) if form.name == "numerusform" => {
                    forms.push(if form.self_closing {
                        String::new()
                    } else {
                        parser.read_text(&form.name)?
                    });
                }
                Event::Open(other) => parser.skip_element(&other)?,
                Event::Close(name, line) => {
                    if name == "translation" {
                        return Ok((status, TranslationText::Plural(forms)));
                    }
                    return Err(ParseError::Syntax {
                        line,
                        message: format!("unexpected closing tag </{name}> inside <translation>"),
                    });
                }
                Event::Text(_) => {}
                Event::Eof => {
                    return Err(ParseError::Syntax {
                        line: parser.line,
                        message: "unexpected end of document inside <translation>".to_string(),
                    });
                }
            }
        }
    }

    let body = parser.read_text("translation")?;
    Ok((status, TranslationText::Single(body)))
}

/// Empty translation text of the right shape for the message kind.
fn empty_text(numerus: bool) -> TranslationText {
    if numerus {
        TranslationText::Plural(Vec::new())
    } else {
        TranslationText::Single(String::new())
    }
}

/// One parsed opening tag.
#[derive(Debug)]
struct Tag {
    /// Element name.
    name: String,
    /// Attributes in document order, entity-decoded.
    attrs: Vec<(String, String)>,
    /// Whether the tag closed itself (`<translation .../>`)
    self_closing: bool,
    /// Line where the tag started (1-based).
    line: usize,
}

impl Tag {
    /// Attribute value by name, if present.
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Low-level parse event.
#[derive(Debug)]
enum Event {
    /// Opening (or self-closing) tag.
    Open(Tag),
    /// Closing tag with its line.
    Close(String, usize),
    /// Character data between tags, entity-decoded.
    Text(String),
    /// End of input.
    Eof,
}

/// Minimal pull parser over the document text.
struct TsParser<'a> {
    /// Full document.
    input: &'a str,
    /// Current byte offset.
    pos: usize,
    /// Current line (1-based), maintained on every advance.
    line: usize,
}

impl<'a> TsParser<'a> {
    /// New parser positioned at the start of the document.
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    /// Unconsumed remainder of the input.
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// What: Advance by `n` bytes, keeping the line counter in sync.
    fn bump(&mut self, n: usize) {
        let consumed = &self.input[self.pos..self.pos + n];
        self.line += consumed.bytes().filter(|b| *b == b'\n').count();
        self.pos += n;
    }

    /// What: Consume input through the end of `pattern`.
    ///
    /// # Errors
    /// - Returns `Err` when the pattern never occurs (unterminated construct)
    fn skip_past(&mut self, pattern: &str, what: &str) -> Result<(), ParseError> {
        match self.rest().find(pattern) {
            Some(idx) => {
                self.bump(idx + pattern.len());
                Ok(())
            }
            None => Err(ParseError::Syntax {
                line: self.line,
                message: format!("unterminated {what}"),
            }),
        }
    }

    /// What: Skip past prolog material to the first opening tag.
    ///
    /// Output:
    /// - `Some(Tag)` for the root element, `None` on an element-free document
    ///
    /// # Errors
    /// - Returns `Err` when a closing tag precedes any opening one
    fn next_open_tag(&mut self) -> Result<Option<Tag>, ParseError> {
        loop {
            match self.next_event()? {
                Event::Open(tag) => return Ok(Some(tag)),
                Event::Text(_) => {}
                Event::Close(name, line) => {
                    return Err(ParseError::Syntax {
                        line,
                        message: format!("closing tag </{name}> before any element"),
                    });
                }
                Event::Eof => return Ok(None),
            }
        }
    }

    /// What: Produce the next parse event.
    ///
    /// Details:
    /// - Processing instructions, comments and `<!...>` declarations are
    ///   consumed silently.
    fn next_event(&mut self) -> Result<Event, ParseError> {
        loop {
            if self.rest().is_empty() {
                return Ok(Event::Eof);
            }
            if let Some(rest) = self.rest().strip_prefix('<') {
                if rest.starts_with("?") {
                    self.skip_past("?>", "processing instruction")?;
                } else if rest.starts_with("!--") {
                    self.skip_past("-->", "comment")?;
                } else if rest.starts_with('!') {
                    self.skip_past(">", "declaration")?;
                } else if let Some(close_rest) = rest.strip_prefix('/') {
                    let line = self.line;
                    let end = close_rest.find('>').ok_or_else(|| ParseError::Syntax {
                        line,
                        message: "unterminated closing tag".to_string(),
                    })?;
                    let name = close_rest[..end].trim().to_string();
                    self.bump(2 + end + 1);
                    return Ok(Event::Close(name, line));
                } else {
                    return self.parse_open_tag().map(Event::Open);
                }
            } else {
                let end = self.rest().find('<').unwrap_or(self.rest().len());
                let raw = &self.rest()[..end];
                let text = decode_entities(raw);
                self.bump(end);
                return Ok(Event::Text(text));
            }
        }
    }

    /// What: Parse an opening tag starting at the current `<`.
    fn parse_open_tag(&mut self) -> Result<Tag, ParseError> {
        let line = self.line;
        self.bump(1); // '<'

        let name_len = self
            .rest()
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .ok_or_else(|| ParseError::Syntax {
                line,
                message: "unterminated tag".to_string(),
            })?;
        if name_len == 0 {
            return Err(ParseError::Syntax {
                line,
                message: "tag with empty name".to_string(),
            });
        }
        let name = self.rest()[..name_len].to_string();
        self.bump(name_len);

        let mut attrs = Vec::new();
        loop {
            let ws = self
                .rest()
                .len()
                .saturating_sub(self.rest().trim_start().len());
            self.bump(ws);

            if self.rest().starts_with("/>") {
                self.bump(2);
                return Ok(Tag {
                    name,
                    attrs,
                    self_closing: true,
                    line,
                });
            }
            if self.rest().starts_with('>') {
                self.bump(1);
                return Ok(Tag {
                    name,
                    attrs,
                    self_closing: false,
                    line,
                });
            }
            if self.rest().is_empty() {
                return Err(ParseError::Syntax {
                    line,
                    message: format!("unterminated tag <{name}>"),
                });
            }
            attrs.push(self.parse_attribute(&name)?);
        }
    }

    /// What: Parse one `name="value"` attribute.
    fn parse_attribute(&mut self, tag: &str) -> Result<(String, String), ParseError> {
        // A valueless attribute must fail here, not leak past the tag: stop
        // the scan at the closing bracket.
        let tag_end = self.rest().find('>').unwrap_or_else(|| self.rest().len());
        let eq = self.rest()[..tag_end]
            .find('=')
            .ok_or_else(|| ParseError::Syntax {
                line: self.line,
                message: format!("malformed attribute in <{tag}>"),
            })?;
        let attr_name = self.rest()[..eq].trim().to_string();
        self.bump(eq + 1);

        let ws = self
            .rest()
            .len()
            .saturating_sub(self.rest().trim_start().len());
        self.bump(ws);

        let quote = self.rest().chars().next().filter(|c| *c == '"' || *c == '\'');
        let Some(quote) = quote else {
            return Err(ParseError::Syntax {
                line: self.line,
                message: format!("attribute {attr_name} in <{tag}> has an unquoted value"),
            });
        };
        self.bump(1);
        let end = self.rest().find(quote).ok_or_else(|| ParseError::Syntax {
            line: self.line,
            message: format!("unterminated attribute value in <{tag}>"),
        })?;
        let value = decode_entities(&self.rest()[..end]);
        self.bump(end + 1);
        Ok((attr_name, value))
    }

    /// What: Accumulate character data until the matching closing tag.
    ///
    /// Details:
    /// - Nested elements occurring inside the body are skipped whole; only
    ///   their surrounding text survives. The resources do not nest markup
    ///   inside `source`/`translation` bodies in practice.
    fn read_text(&mut self, name: &str) -> Result<String, ParseError> {
        let mut out = String::new();
        loop {
            match self.next_event()? {
                Event::Text(text) => out.push_str(&text),
                Event::Open(tag) => self.skip_element(&tag)?,
                Event::Close(close_name, line) => {
                    if close_name == name {
                        return Ok(out);
                    }
                    return Err(ParseError::Syntax {
                        line,
                        message: format!("expected </{name}>, found </{close_name}>"),
                    });
                }
                Event::Eof => {
                    return Err(ParseError::Syntax {
                        line: self.line,
                        message: format!("unexpected end of document inside <{name}>"),
                    });
                }
            }
        }
    }

    /// What: Consume an element and all of its descendants.
    fn skip_element(&mut self, tag: &Tag) -> Result<(), ParseError> {
        if tag.self_closing {
            return Ok(());
        }
        let mut depth = 1usize;
        loop {
            match self.next_event()? {
                Event::Open(inner) => {
                    if !inner.self_closing {
                        depth += 1;
                    }
                }
                Event::Close(_, _) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Event::Text(_) => {}
                Event::Eof => {
                    return Err(ParseError::Syntax {
                        line: self.line,
                        message: format!("unexpected end of document inside <{}>", tag.name),
                    });
                }
            }
        }
    }
}

/// What: Decode XML entity references in character data.
///
/// Inputs:
/// - `raw`: Text slice as it appears in the document
///
/// Output:
/// - Decoded string with `&lt; &gt; &amp; &quot; &apos;` and numeric
///   character references (`&#NN;`, `&#xNN;`) replaced
///
/// Details:
/// - Unknown or malformed references are left literal rather than dropped,
///   so damaged resources stay visible instead of silently losing text.
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        // Entity names are short; cap the scan so stray ampersands in long
        // text do not search the whole remainder. Scan by char so the cap
        // never lands inside a multi-byte character.
        let semi = rest
            .char_indices()
            .take(12)
            .find(|(_, c)| *c == ';')
            .map(|(idx, _)| idx);
        let Some(semi) = semi else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_char_ref(entity),
        };
        if let Some(ch) = decoded {
            out.push(ch);
            rest = &rest[semi + 1..];
        } else {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Decode a numeric character reference body (`#NN` or `#xNN`).
fn decode_char_ref(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"<?xml version="1.0" ?><!DOCTYPE TS><TS language="pt_BR" version="2.1">
<context>
    <name>AboutDialog</name>
    <message>
        <source>About</source>
        <translation>Sobre</translation>
    </message>
    <message>
        <source>About %1 %2</source>
        <translation>Sobre %1 %2</translation>
    </message>
</context>
</TS>"#;

    #[test]
    fn test_load_minimal_catalog() {
        let catalog = load_catalog(MINIMAL).expect("minimal resource should parse");
        assert_eq!(catalog.locale(), "pt_BR");
        assert_eq!(catalog.len(), 2);

        let entry = catalog
            .get("AboutDialog", "About")
            .expect("About entry should exist");
        assert_eq!(entry.status, TranslationStatus::Finished);
        assert_eq!(entry.text, TranslationText::Single("Sobre".to_string()));
    }

    #[test]
    fn test_unfinished_empty_translation() {
        let input = r#"<TS language="pt_BR" version="2.1">
<context>
    <name>ComputerManager</name>
    <message>
        <source>Missing network object directory plugin</source>
        <translation type="unfinished"/>
    </message>
    <message>
        <source>Logged in since</source>
        <translation type="unfinished"></translation>
    </message>
</context>
</TS>"#;
        let catalog = load_catalog(input).expect("resource should parse");
        for source in ["Missing network object directory plugin", "Logged in since"] {
            let entry = catalog
                .get("ComputerManager", source)
                .expect("entry should exist");
            assert_eq!(entry.status, TranslationStatus::Unfinished);
            assert!(!entry.is_usable());
        }
    }

    #[test]
    fn test_obsolete_and_vanished() {
        let input = r#"<TS language="pt_BR" version="2.1">
<context>
    <name>MainWindow</name>
    <message>
        <source>Old action</source>
        <translation type="obsolete">Ação antiga</translation>
    </message>
    <message>
        <source>Gone action</source>
        <translation type="vanished">Ação removida</translation>
    </message>
</context>
</TS>"#;
        let catalog = load_catalog(input).expect("resource should parse");
        for source in ["Old action", "Gone action"] {
            let entry = catalog
                .get("MainWindow", source)
                .expect("entry should exist");
            assert_eq!(entry.status, TranslationStatus::Obsolete);
        }
    }

    #[test]
    fn test_numerus_forms_stay_ordered() {
        let input = r#"<TS language="ru" version="2.1">
<context>
    <name>ComputerManager</name>
    <message numerus="yes">
        <source>%n computer(s)</source>
        <translation>
            <numerusform>%n компьютер</numerusform>
            <numerusform>%n компьютера</numerusform>
            <numerusform>%n компьютеров</numerusform>
        </translation>
    </message>
</context>
</TS>"#;
        let catalog = load_catalog(input).expect("resource should parse");
        let entry = catalog
            .get("ComputerManager", "%n computer(s)")
            .expect("numerus entry should exist");
        assert_eq!(
            entry.text,
            TranslationText::Plural(vec![
                "%n компьютер".to_string(),
                "%n компьютера".to_string(),
                "%n компьютеров".to_string(),
            ])
        );
    }

    #[test]
    fn test_numerus_unfinished_empty_forms() {
        let input = r#"<TS language="pt_BR" version="2.1">
<context>
    <name>UserManager</name>
    <message numerus="yes">
        <source>%n user(s)</source>
        <translation type="unfinished"><numerusform/><numerusform/></translation>
    </message>
</context>
</TS>"#;
        let catalog = load_catalog(input).expect("resource should parse");
        let entry = catalog
            .get("UserManager", "%n user(s)")
            .expect("entry should exist");
        assert_eq!(entry.status, TranslationStatus::Unfinished);
        assert_eq!(
            entry.text,
            TranslationText::Plural(vec![String::new(), String::new()])
        );
    }

    #[test]
    fn test_entities_decoded_at_load() {
        let input = r#"<TS language="pt_BR" version="2.1">
<context>
    <name>AboutDialog</name>
    <message>
        <source>If you&apos;re interested in translating &lt;b&gt;this&lt;/b&gt;</source>
        <translation>Caso voc&#234; se interesse &amp; queira ajudar</translation>
    </message>
</context>
</TS>"#;
        let catalog = load_catalog(input).expect("resource should parse");
        let entry = catalog
            .get("AboutDialog", "If you're interested in translating <b>this</b>")
            .expect("entity-decoded key should match");
        assert_eq!(
            entry.text,
            TranslationText::Single("Caso você se interesse & queira ajudar".to_string())
        );
    }

    #[test]
    fn test_unknown_elements_skipped() {
        let input = r#"<TS language="pt_BR" version="2.1">
<context>
    <name>Dialog</name>
    <message>
        <location filename="../Dialog.cpp" line="42"/>
        <source>OK</source>
        <comment>button label</comment>
        <translation>OK</translation>
    </message>
</context>
</TS>"#;
        let catalog = load_catalog(input).expect("resource should parse");
        assert!(catalog.get("Dialog", "OK").is_some());
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let input = r#"<TS language="pt_BR" version="2.1">
<context>
    <name>Dialog</name>
    <message>
        <source>Test</source>
        <translation>Primeiro</translation>
    </message>
    <message>
        <source>Test</source>
        <translation>Segundo</translation>
    </message>
</context>
</TS>"#;
        let catalog = load_catalog(input).expect("duplicates are not fatal");
        assert_eq!(catalog.len(), 1);
        let entry = catalog.get("Dialog", "Test").expect("entry should exist");
        assert_eq!(entry.text, TranslationText::Single("Segundo".to_string()));
    }

    #[test]
    fn test_message_outside_context_fails() {
        let input = r#"<TS language="pt_BR" version="2.1">
<message>
    <source>Orphan</source>
    <translation>Órfã</translation>
</message>
</TS>"#;
        let err = load_catalog(input).expect_err("orphan message must fail the load");
        assert!(matches!(err, ParseError::MessageOutsideContext { .. }));
    }

    #[test]
    fn test_missing_source_fails() {
        let input = r#"<TS language="pt_BR" version="2.1">
<context>
    <name>Dialog</name>
    <message>
        <translation>Sem origem</translation>
    </message>
</context>
</TS>"#;
        let err = load_catalog(input).expect_err("missing source must fail the load");
        assert!(matches!(err, ParseError::MissingSource { .. }));
    }

    #[test]
    fn test_message_before_context_name_fails() {
        let input = r#"<TS language="pt_BR" version="2.1">
<context>
    <message>
        <source>Too early</source>
        <translation>Cedo demais</translation>
    </message>
    <name>Dialog</name>
</context>
</TS>"#;
        let err = load_catalog(input).expect_err("nameless context must fail the load");
        assert!(matches!(err, ParseError::MissingContextName { .. }));
    }

    #[test]
    fn test_missing_language_fails() {
        let input = r#"<TS version="2.1"></TS>"#;
        let err = load_catalog(input).expect_err("language attribute is required");
        assert!(matches!(err, ParseError::MissingLanguage));
    }

    #[test]
    fn test_unexpected_root_fails() {
        let input = r#"<resources language="pt_BR"></resources>"#;
        let err = load_catalog(input).expect_err("non-TS root must fail");
        assert!(matches!(err, ParseError::UnexpectedRoot { .. }));
    }

    #[test]
    fn test_truncated_document_fails() {
        let input = r#"<TS language="pt_BR" version="2.1">
<context>
    <name>Dialog</name>
    <message>
        <source>Cut off"#;
        assert!(load_catalog(input).is_err());
    }

    #[test]
    fn test_load_catalog_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let path = temp_dir.path().join("pt_BR.ts");
        fs::write(&path, MINIMAL).expect("Failed to write test resource");

        let catalog = load_catalog_file(&path).expect("file should load");
        assert_eq!(catalog.locale(), "pt_BR");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_catalog_file_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let result = load_catalog_file(&temp_dir.path().join("missing.ts"));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }

    #[test]
    fn test_decode_entities_edge_cases() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&#x41;&#66;"), "AB");
        // Unknown and malformed references stay literal.
        assert_eq!(decode_entities("&unknown; &"), "&unknown; &");
        assert_eq!(decode_entities("100% &"), "100% &");
    }

    #[test]
    fn test_stray_ampersand_before_multibyte_text() {
        // The scan cap must land on char boundaries even when the bytes
        // after the ampersand are all multi-byte.
        assert_eq!(decode_entities("&кккккк"), "&кккккк");
        assert_eq!(decode_entities("скидка 50% &\u{00A0}больше"), "скидка 50% &\u{00A0}больше");

        let input = "<TS language=\"ru\" version=\"2.1\">
<context>
    <name>Dialog</name>
    <message>
        <source>Discount</source>
        <translation>&кккккк</translation>
    </message>
</context>
</TS>";
        let catalog = load_catalog(input).expect("stray ampersand is not fatal");
        let entry = catalog.get("Dialog", "Discount").expect("entry should exist");
        assert_eq!(entry.text, TranslationText::Single("&кккккк".to_string()));
    }

    #[test]
    fn test_valueless_attribute_fails_at_tag() {
        let input = r#"<TS language="pt_BR" version="2.1">
<context foo>
    <name>Dialog</name>
</context>
</TS>"#;
        let err = load_catalog(input).expect_err("valueless attribute must fail the load");
        match err {
            ParseError::Syntax { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("malformed attribute in <context>"), "{message}");
            }
            other => panic!("expected syntax error, got {other}"),
        }
    }
}
