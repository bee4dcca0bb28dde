//! Numbers, points and the name/comment text that follows a keyword.

use super::{Printer, Syntax, children};
use crate::Rule;
use crate::errors::{ParseError, PrintError, SourceContext};
use crate::types::{Point, finite};
use pest::iterators::Pair;

/// Read a `number` pair as a finite f64
pub(crate) fn parse_number(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<f64, ParseError> {
    let text = pair.as_str();
    let malformed = || ParseError::MalformedNumber {
        rule: Rule::number,
        text: text.to_string(),
        src: src.named_source(),
        span: src.span(pair.as_span().start(), text.len()),
    };

    let value: f64 = text.parse().map_err(|_| malformed())?;
    finite(value).map_err(|_| malformed())
}

/// All `number` children of `pair`, in order
pub(crate) fn parse_numbers(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Vec<f64>, ParseError> {
    children(pair, Rule::number)
        .map(|n| parse_number(n, src))
        .collect()
}

/// Write the shortest text that reads back as exactly `value`
pub(crate) fn print_number(value: f64, out: &mut Printer) -> Result<(), PrintError> {
    let value = finite(value).map_err(|_| PrintError::NonFiniteNumber { value })?;
    // Debug keeps a fractional part on integral values ("8.0") and is the
    // shortest representation that parses back to the same bits.
    out.keyword(&format!("{:?}", value));
    Ok(())
}

/// Name/comment text of a `comment` pair; empty when the keyword had none
pub(crate) fn parse_comment(pair: Pair<'_, Rule>) -> String {
    children(pair, Rule::name)
        .next()
        .map(|name| name.as_str().to_string())
        .unwrap_or_default()
}

/// Write a name/comment: one space then the text, or nothing when empty
pub(crate) fn print_comment(name: &str, out: &mut Printer) -> Result<(), PrintError> {
    if name.is_empty() {
        return Ok(());
    }
    if name.contains(['\n', '\r']) {
        return Err(PrintError::UnprintableName {
            name: name.to_string(),
            reason: "contains a line break",
        });
    }
    if name.starts_with([' ', '\t']) {
        return Err(PrintError::UnprintableName {
            name: name.to_string(),
            reason: "starts with whitespace",
        });
    }
    out.space();
    out.keyword(name);
    Ok(())
}

impl Syntax for Point {
    const RULE: Rule = Rule::point;

    fn from_pair(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Self, ParseError> {
        let start = pair.as_span().start();
        match parse_numbers(pair, src)?.as_slice() {
            [x, y] => Ok(Point::new(*x, *y)),
            _ => Err(ParseError::unexpected(src, Rule::point, "two numbers", start)),
        }
    }

    fn print(&self, out: &mut Printer) -> Result<(), PrintError> {
        print_number(self.x, out)?;
        out.space();
        print_number(self.y, out)
    }
}

/// One point per line
impl Syntax for Vec<Point> {
    const RULE: Rule = Rule::points;

    fn from_pair(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Self, ParseError> {
        children(pair, Rule::point)
            .map(|p| Point::from_pair(p, src))
            .collect()
    }

    fn print(&self, out: &mut Printer) -> Result<(), PrintError> {
        for (i, point) in self.iter().enumerate() {
            if i > 0 {
                out.line_end();
            }
            point.print(out)?;
        }
        Ok(())
    }
}
