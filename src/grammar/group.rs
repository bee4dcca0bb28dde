//! Groups and whole documents.
//!
//! ```text
//! group abc
//! r 45.0
//!
//! unit circle
//! filled red
//!
//! group def
//!
//! unit square
//! closed green
//! ```
//!
//! A group header is `group`, an optional name, and optional transform
//! lines. At least one shape follows. Groups are separated by at least one
//! blank line; the printer always writes exactly one.

use super::lexical::{parse_comment, print_comment};
use super::transform::{parse_trailing, print_trailing};
use super::{Printer, Syntax, child, children};
use crate::Rule;
use crate::ast::{Document, Shape, ShapeGroup};
use crate::errors::{ParseError, PrintError, SourceContext};
use pest::iterators::Pair;

impl Syntax for ShapeGroup {
    const RULE: Rule = Rule::group;

    fn from_pair(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Self, ParseError> {
        let span = pair.as_span();
        let name = parse_comment(child(pair.clone(), Rule::comment, src)?);
        let transforms = parse_trailing(child(pair.clone(), Rule::trailing_transforms, src)?, src)?;
        let shapes = match children(pair, Rule::shapes).next() {
            Some(shapes) => Vec::<Shape>::from_pair(shapes, src)?,
            None => Vec::new(),
        };

        if shapes.is_empty() {
            // Leading blank lines belong to the group rule; point at the keyword.
            let keyword = span.as_str().find("group").unwrap_or(0);
            crate::log::warn!(name = %name, offset = span.start() + keyword, "group without shapes");
            return Err(ParseError::EmptyGroup {
                rule: Rule::group,
                src: src.named_source(),
                span: src.span(span.start() + keyword, "group".len()),
                name,
            });
        }

        Ok(ShapeGroup {
            name,
            transforms,
            shapes,
        })
    }

    fn print(&self, out: &mut Printer) -> Result<(), PrintError> {
        if self.shapes.is_empty() {
            return Err(PrintError::EmptyGroup {
                name: self.name.clone(),
            });
        }
        out.keyword("group");
        print_comment(&self.name, out)?;
        print_trailing(&self.transforms, out)?;
        out.blank_line();
        self.shapes.print(out)
    }
}

impl Syntax for Document {
    const RULE: Rule = Rule::document;

    fn from_pair(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Self, ParseError> {
        let groups = children(pair, Rule::group)
            .map(|g| ShapeGroup::from_pair(g, src))
            .collect::<Result<Vec<_>, _>>()?;
        crate::log::debug!(groups = groups.len(), "document parsed");
        Ok(Document { groups })
    }

    fn print(&self, out: &mut Printer) -> Result<(), PrintError> {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                out.blank_line();
            }
            group.print(out)?;
        }
        Ok(())
    }
}
