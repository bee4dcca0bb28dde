//! Error types with rich diagnostics using miette
//!
//! Parse errors carry the failing grammar rule and a source span so they
//! render as labelled snippets. Print errors describe values that the text
//! format cannot represent.

use crate::Rule;
use crate::ast::{Color, Style};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Source context for text that did not come from a file
    pub fn anonymous(source: impl Into<String>) -> Self {
        Self::new("<input>", source)
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Span of `len` bytes at `offset`, clamped to the source
    pub(crate) fn span(&self, offset: usize, len: usize) -> SourceSpan {
        let offset = offset.min(self.source.len());
        let len = len.min(self.source.len() - offset);
        (offset, len).into()
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur during parsing
///
/// Every variant names the rule that failed and where. There is no recovery:
/// the first error ends the parse.
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("unexpected token, expected {expected}")]
    #[diagnostic(code(unitdraw::parse::unexpected_token))]
    UnexpectedToken {
        rule: Rule,
        expected: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("found this")]
        span: SourceSpan,
    },

    #[error("malformed number: {text:?}")]
    #[diagnostic(
        code(unitdraw::parse::malformed_number),
        help("numbers are finite decimals such as `45`, `-1.5` or `2e3`")
    )]
    MalformedNumber {
        rule: Rule,
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a number")]
        span: SourceSpan,
    },

    #[error("missing line break")]
    #[diagnostic(code(unitdraw::parse::missing_separator))]
    MissingSeparator {
        rule: Rule,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a new line here")]
        span: SourceSpan,
    },

    #[error("group {name:?} has no shapes")]
    #[diagnostic(
        code(unitdraw::parse::empty_group),
        help("a group needs at least one `unit square` or `unit circle`")
    )]
    EmptyGroup {
        rule: Rule,
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("this group is empty")]
        span: SourceSpan,
    },

    #[error("unknown style: {keyword}")]
    #[diagnostic(code(unitdraw::parse::unknown_style))]
    UnknownStyle {
        rule: Rule,
        keyword: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown style")]
        span: SourceSpan,
        #[help]
        choices: String,
    },

    #[error("unknown color: {keyword}")]
    #[diagnostic(code(unitdraw::parse::unknown_color))]
    UnknownColor {
        rule: Rule,
        keyword: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown color")]
        span: SourceSpan,
        #[help]
        choices: String,
    },
}

impl ParseError {
    /// The grammar rule that failed
    pub fn rule(&self) -> Rule {
        match self {
            ParseError::UnexpectedToken { rule, .. }
            | ParseError::MalformedNumber { rule, .. }
            | ParseError::MissingSeparator { rule, .. }
            | ParseError::EmptyGroup { rule, .. }
            | ParseError::UnknownStyle { rule, .. }
            | ParseError::UnknownColor { rule, .. } => *rule,
        }
    }

    /// Byte offset of the failure in the source
    pub fn offset(&self) -> usize {
        self.span().offset()
    }

    fn span(&self) -> SourceSpan {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::MalformedNumber { span, .. }
            | ParseError::MissingSeparator { span, .. }
            | ParseError::EmptyGroup { span, .. }
            | ParseError::UnknownStyle { span, .. }
            | ParseError::UnknownColor { span, .. } => *span,
        }
    }

    pub(crate) fn unexpected(
        src: &SourceContext,
        rule: Rule,
        expected: impl Into<String>,
        offset: usize,
    ) -> Self {
        ParseError::UnexpectedToken {
            rule,
            expected: expected.into(),
            src: src.named_source(),
            span: src.span(offset, 1),
        }
    }

    pub(crate) fn unknown_style(src: &SourceContext, keyword: &str, offset: usize) -> Self {
        ParseError::UnknownStyle {
            rule: Rule::style_name,
            keyword: keyword.to_string(),
            src: src.named_source(),
            span: src.span(offset, keyword.len()),
            choices: one_of(Style::ALL.iter().map(|s| s.keyword())),
        }
    }

    pub(crate) fn unknown_color(src: &SourceContext, keyword: &str, offset: usize) -> Self {
        ParseError::UnknownColor {
            rule: Rule::color_name,
            keyword: keyword.to_string(),
            src: src.named_source(),
            span: src.span(offset, keyword.len()),
            choices: one_of(Color::ALL.iter().map(|c| c.keyword())),
        }
    }
}

fn one_of<'a>(keywords: impl Iterator<Item = &'a str>) -> String {
    let keywords: Vec<&str> = keywords.collect();
    format!("expected one of: {}", keywords.join(", "))
}

// ============================================================================
// Print Errors
// ============================================================================

/// Errors that occur during printing
///
/// These describe values the text format cannot represent. A caller building
/// documents from well-formed parts never sees them.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum PrintError {
    #[error("cannot print a {found} as a {expected}")]
    #[diagnostic(code(unitdraw::print::variant_mismatch))]
    VariantMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("cannot print non-finite number {value}")]
    #[diagnostic(code(unitdraw::print::non_finite_number))]
    NonFiniteNumber { value: f64 },

    #[error("cannot print name {name:?}: {reason}")]
    #[diagnostic(code(unitdraw::print::unprintable_name))]
    UnprintableName { name: String, reason: &'static str },

    #[error("cannot print group {name:?} without shapes")]
    #[diagnostic(code(unitdraw::print::empty_group))]
    EmptyGroup { name: String },
}
