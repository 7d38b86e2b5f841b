use serde::Serialize;
use thiserror::Error;

/// A 1-indexed line/column pair inside a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The start of a document.
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Machine-readable category for a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// An identifier token with no shorthand, variant, or size match.
    UnknownModifier,
    /// A directive whose name is not in the component registry.
    UnknownComponent,
    /// A container directive with no close fence before its scope ended.
    UnterminatedDirective,
    /// An attribute region with unbalanced or nested braces.
    MalformedAttributes,
    /// The underlying Markdown grammar rejected a segment.
    MarkdownParse,
}

impl DiagnosticCode {
    /// Stable string form of the code, as surfaced to outer tooling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownModifier => "unknown-modifier",
            Self::UnknownComponent => "unknown-component",
            Self::UnterminatedDirective => "unterminated-directive",
            Self::MalformedAttributes => "malformed-attributes",
            Self::MarkdownParse => "markdown-parse",
        }
    }
}

/// A non-fatal finding accumulated alongside the tree.
///
/// Diagnostics never abort compilation; they are handed to an outer tool
/// (linter, CLI) for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable category.
    pub code: DiagnosticCode,
}

impl Diagnostic {
    /// Create a diagnostic at a position.
    pub fn new(code: DiagnosticCode, message: impl Into<String>, at: Position) -> Self {
        Self {
            line: at.line,
            column: at.column,
            message: message.into(),
            code,
        }
    }

    /// The position of this diagnostic.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}]",
            self.line,
            self.column,
            self.message,
            self.code.as_str()
        )
    }
}

/// Fatal compilation errors.
///
/// Everything recoverable surfaces as a [`Diagnostic`] instead; the only way
/// parsing itself fails is the caller-configured structural limit.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Directive nesting exceeded the configured maximum depth.
    #[error("directive nesting exceeds the configured limit of {limit} at line {line}")]
    NestingTooDeep {
        /// The configured maximum nesting depth.
        limit: usize,
        /// Line of the fence that overflowed the stack.
        line: usize,
    },
}
