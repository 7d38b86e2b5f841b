//! Attribute block tokenization.
//!
//! The contents of one `{...}` block are split into an ordered list of typed
//! modifier tokens. Splitting is quote-aware so `label="new in 2.0"` stays a
//! single token. Malformed fragments are preserved verbatim as identifiers so
//! the resolver can surface an unknown-token diagnostic instead of silently
//! dropping author input.

use serde::Serialize;

/// One unit inside a `{...}` attribute block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ModifierToken {
    /// A plain style modifier such as `elevated` or `2xl`, resolved against
    /// variants, sizes, and the shorthand table.
    Identifier {
        /// The token text as written.
        name: String,
    },
    /// A `key="value"` pair, retained as a non-class attribute.
    KeyValue {
        /// Attribute key.
        key: String,
        /// Attribute value with the quotes stripped.
        value: String,
    },
    /// A `.class-name` token, passed through verbatim and bypassing the
    /// shorthand table. The stored class drops the leading dot.
    LiteralClass {
        /// The class name without its `.` prefix.
        class: String,
    },
}

impl ModifierToken {
    /// Build an identifier token.
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    /// Build a key/value token.
    pub fn key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a literal class token.
    pub fn literal_class(class: impl Into<String>) -> Self {
        Self::LiteralClass {
            class: class.into(),
        }
    }

    /// The identifier text, if this is an identifier token.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier { name } => Some(name),
            _ => None,
        }
    }
}

/// Split the contents of one attribute block into typed tokens.
///
/// Order follows source order and duplicates are kept; classification and
/// deduplication are the resolver's job.
pub fn tokenize_attributes(block: &str) -> Vec<ModifierToken> {
    split_tokens(block).into_iter().map(classify).collect()
}

/// Whitespace split that keeps quoted stretches intact.
fn split_tokens(block: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut token_start: Option<usize> = None;
    let mut quote: Option<char> = None;

    for (i, c) in block.char_indices() {
        match c {
            '"' | '\'' if quote.is_none() => {
                if token_start.is_none() {
                    token_start = Some(i);
                }
                quote = Some(c);
            }
            c if Some(c) == quote => {
                quote = None;
            }
            c if c.is_whitespace() && quote.is_none() => {
                if let Some(start) = token_start.take() {
                    tokens.push(&block[start..i]);
                }
            }
            _ => {
                if token_start.is_none() {
                    token_start = Some(i);
                }
            }
        }
    }

    if let Some(start) = token_start {
        tokens.push(&block[start..]);
    }

    tokens
}

fn classify(raw: &str) -> ModifierToken {
    if let Some((key, value)) = parse_key_value(raw) {
        return ModifierToken::key_value(key, value);
    }
    if let Some(class) = parse_literal_class(raw) {
        return ModifierToken::literal_class(class);
    }
    // Well-formed identifiers and malformed fragments both land here; the
    // fragment is preserved verbatim for the resolver to warn about.
    ModifierToken::identifier(raw)
}

/// Match `key="value"` or `key='value'` with symmetric quotes.
fn parse_key_value(raw: &str) -> Option<(&str, &str)> {
    let eq = raw.find('=')?;
    let (key, rest) = (&raw[..eq], &raw[eq + 1..]);

    if key.is_empty() || !is_attr_key(key) {
        return None;
    }

    let mut chars = rest.chars();
    let open = chars.next()?;
    if open != '"' && open != '\'' {
        return None;
    }
    if rest.len() < 2 || !rest.ends_with(open) {
        return None;
    }

    Some((key, &rest[open.len_utf8()..rest.len() - open.len_utf8()]))
}

fn is_attr_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Match `.` followed by `[A-Za-z][A-Za-z0-9_-]*`.
fn parse_literal_class(raw: &str) -> Option<&str> {
    let class = raw.strip_prefix('.')?;
    let mut chars = class.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return None,
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        Some(class)
    } else {
        None
    }
}

/// Whether a token is a well-formed identifier: `[a-z0-9][a-z0-9:-]*`.
///
/// Covers size-like tokens such as `2xl` and ratio tokens such as `16:9`.
pub fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c.is_ascii_digit() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ':' || c == '-')
}
