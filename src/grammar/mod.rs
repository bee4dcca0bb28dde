//! Bidirectional grammar for scene documents
//!
//! Each grammar-level type implements [`Syntax`]: one pest rule, and the two
//! directions over it side by side. Parsing walks the pest pair tree for
//! `RULE`; printing writes the canonical text that `RULE` matches. The
//! submodules follow the layering of the format:
//! - `lexical`: numbers, points, names/comments
//! - `transform`: rotate/scale/translate lines and their sequences
//! - `style`: style and color keywords
//! - `shape`: unit squares and unit circles
//! - `group`: groups and whole documents

pub mod group;
pub mod lexical;
pub mod shape;
pub mod style;
pub mod transform;

use crate::errors::{ParseError, PrintError, SourceContext};
use crate::{Rule, SceneParser};
use pest::Parser;
use pest::error::{ErrorVariant, InputLocation};
use pest::iterators::Pair;

/// A value with a textual form described by one grammar rule
pub trait Syntax: Sized {
    /// The pest rule both directions follow
    const RULE: Rule;

    /// Build the value from a pair produced by `RULE`
    fn from_pair(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Self, ParseError>;

    /// Write the canonical text for this value
    fn print(&self, out: &mut Printer) -> Result<(), PrintError>;
}

/// Line terminator written by the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Options for printing
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOptions {
    /// Line terminator between lines (the parser accepts both)
    pub line_ending: LineEnding,
}

/// Output buffer with the canonical spacing primitives
pub struct Printer {
    buffer: String,
    line_ending: LineEnding,
}

impl Printer {
    pub fn new(options: &PrintOptions) -> Printer {
        Printer {
            buffer: String::new(),
            line_ending: options.line_ending,
        }
    }

    /// Literal keyword or tag text
    pub fn keyword(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// The single space that stands for any run of horizontal whitespace
    pub fn space(&mut self) {
        self.buffer.push(' ');
    }

    pub fn line_end(&mut self) {
        self.buffer.push_str(self.line_ending.as_str());
    }

    /// Two line terminators: the canonical form of one-or-more
    pub fn blank_line(&mut self) {
        self.line_end();
        self.line_end();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Parse the whole of `src` as a `T`
pub fn parse_rule<T: Syntax>(src: &SourceContext) -> Result<T, ParseError> {
    crate::log::debug!(rule = ?T::RULE, len = src.source.len(), "parse");

    let mut pairs =
        SceneParser::parse(T::RULE, &src.source).map_err(|e| error_from_pest(e, src))?;
    let pair = pairs
        .next()
        .ok_or_else(|| ParseError::unexpected(src, T::RULE, format!("{:?}", T::RULE), 0))?;

    let end = pair.as_span().end();
    if end != src.source.len() {
        return Err(ParseError::unexpected(src, T::RULE, "end of input", end));
    }

    T::from_pair(pair, src)
}

/// Print `value` as the text its rule matches
pub fn print_rule<T: Syntax>(value: &T, options: &PrintOptions) -> Result<String, PrintError> {
    let mut out = Printer::new(options);
    value.print(&mut out)?;
    crate::log::debug!(rule = ?T::RULE, len = out.as_str().len(), "print");
    Ok(out.finish())
}

/// Children of `pair` produced by `rule`, in order
pub(crate) fn children<'i>(
    pair: Pair<'i, Rule>,
    rule: Rule,
) -> impl Iterator<Item = Pair<'i, Rule>> {
    pair.into_inner().filter(move |p| p.as_rule() == rule)
}

/// The first child of `pair` produced by `rule`
pub(crate) fn child<'i>(
    pair: Pair<'i, Rule>,
    rule: Rule,
    src: &SourceContext,
) -> Result<Pair<'i, Rule>, ParseError> {
    let offset = pair.as_span().start();
    let parent = pair.as_rule();
    children(pair, rule)
        .next()
        .ok_or_else(|| ParseError::unexpected(src, parent, format!("{:?}", rule), offset))
}

/// Classify a pest failure by the rules it expected at the furthest position
fn error_from_pest(err: pest::error::Error<Rule>, src: &SourceContext) -> ParseError {
    let offset = match err.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };

    let mut positives = match &err.variant {
        ErrorVariant::ParsingError { positives, .. } => positives.clone(),
        ErrorVariant::CustomError { message } => {
            return ParseError::unexpected(src, Rule::document, message.clone(), offset);
        }
    };

    crate::log::debug!(offset, ?positives, "pest error");

    // EOI is pest's builtin, never the rule that actually failed
    let expects_end = positives.contains(&Rule::EOI);
    positives.retain(|r| *r != Rule::EOI);

    let rest = &src.source[offset.min(src.source.len())..];
    let at_line_end = rest.is_empty() || rest.starts_with('\n') || rest.starts_with('\r');

    if positives.contains(&Rule::number) && !at_line_end {
        let text: String = rest
            .chars()
            .take_while(|c| !c.is_whitespace())
            .collect();
        return ParseError::MalformedNumber {
            rule: Rule::number,
            src: src.named_source(),
            span: src.span(offset, text.len().max(1)),
            text,
        };
    }

    // A line terminator was expected and the only alternatives are the lines
    // that may follow one. If a `group` or keyword could also start here,
    // the token itself is wrong.
    if positives.contains(&Rule::line_end)
        && positives
            .iter()
            .all(|r| matches!(r, Rule::line_end | Rule::transform | Rule::shape))
    {
        return ParseError::MissingSeparator {
            rule: Rule::line_end,
            src: src.named_source(),
            span: src.span(offset, 1),
        };
    }

    let mut expected: Vec<String> = positives.iter().map(|r| format!("{:?}", r)).collect();
    if expects_end {
        expected.push("end of input".to_string());
    }
    let expected = if expected.is_empty() {
        "valid input".to_string()
    } else {
        expected.join(" or ")
    };
    let rule = positives.first().copied().unwrap_or(Rule::document);
    ParseError::unexpected(src, rule, expected, offset)
}
