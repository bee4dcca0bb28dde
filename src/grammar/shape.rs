//! Shapes: a keyword line with an optional name, a style line, then
//! transform lines.
//!
//! ```text
//! unit square box 1
//! filled red
//! s 8.0 9.0
//! r 45.0
//! ```
//!
//! Squares and circles share one rule body; [`ShapeKind`] supplies the
//! keyword and the conversion to and from [`Shape`].

use super::lexical::{parse_comment, print_comment};
use super::transform::{parse_trailing, print_trailing};
use super::{Printer, Syntax, child, children};
use crate::Rule;
use crate::ast::{DrawStyle, Shape, ShapeRecord, Transform, UnitCircle, UnitSquare};
use crate::errors::{ParseError, PrintError, SourceContext};
use pest::iterators::Pair;

/// One kind of shape and its two-way conversion with [`Shape`]
pub trait ShapeKind: ShapeRecord + Into<Shape> + Sized {
    const KEYWORD: &'static str;
    /// Rule matching the keyword
    const RULE: Rule;

    fn assemble(name: String, draw_style: DrawStyle, transforms: Vec<Transform>) -> Self;

    fn disassemble(shape: &Shape) -> Result<&Self, PrintError>;
}

impl ShapeKind for UnitSquare {
    const KEYWORD: &'static str = "unit square";
    const RULE: Rule = Rule::unit_square;

    fn assemble(name: String, draw_style: DrawStyle, transforms: Vec<Transform>) -> Self {
        UnitSquare::new(name, draw_style, transforms)
    }

    fn disassemble(shape: &Shape) -> Result<&Self, PrintError> {
        match shape {
            Shape::UnitSquare(square) => Ok(square),
            other => Err(PrintError::VariantMismatch {
                expected: Self::KEYWORD,
                found: other.kind(),
            }),
        }
    }
}

impl ShapeKind for UnitCircle {
    const KEYWORD: &'static str = "unit circle";
    const RULE: Rule = Rule::unit_circle;

    fn assemble(name: String, draw_style: DrawStyle, transforms: Vec<Transform>) -> Self {
        UnitCircle::new(name, draw_style, transforms)
    }

    fn disassemble(shape: &Shape) -> Result<&Self, PrintError> {
        match shape {
            Shape::UnitCircle(circle) => Ok(circle),
            other => Err(PrintError::VariantMismatch {
                expected: Self::KEYWORD,
                found: other.kind(),
            }),
        }
    }
}

/// Build a `K` from the pairs that follow its keyword in a `shape` pair
fn parse_kind<K: ShapeKind>(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Shape, ParseError> {
    let name = parse_comment(child(pair.clone(), Rule::comment, src)?);
    let draw_style = DrawStyle::from_pair(child(pair.clone(), Rule::draw_style, src)?, src)?;
    let transforms = parse_trailing(child(pair, Rule::trailing_transforms, src)?, src)?;
    Ok(K::assemble(name, draw_style, transforms).into())
}

fn print_kind<K: ShapeKind>(shape: &Shape, out: &mut Printer) -> Result<(), PrintError> {
    let record = K::disassemble(shape)?;
    out.keyword(K::KEYWORD);
    print_comment(record.name(), out)?;
    out.line_end();
    record.draw_style().print(out)?;
    print_trailing(record.transforms(), out)
}

impl Syntax for Shape {
    const RULE: Rule = Rule::shape;

    fn from_pair(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Self, ParseError> {
        let start = pair.as_span().start();
        let keyword = pair
            .clone()
            .into_inner()
            .next()
            .map(|p| p.as_rule())
            .ok_or_else(|| ParseError::unexpected(src, Rule::shape, "shape keyword", start))?;

        if keyword == UnitSquare::RULE {
            parse_kind::<UnitSquare>(pair, src)
        } else if keyword == UnitCircle::RULE {
            parse_kind::<UnitCircle>(pair, src)
        } else {
            Err(ParseError::unexpected(src, keyword, "shape keyword", start))
        }
    }

    fn print(&self, out: &mut Printer) -> Result<(), PrintError> {
        match self {
            Shape::UnitSquare(_) => print_kind::<UnitSquare>(self, out),
            Shape::UnitCircle(_) => print_kind::<UnitCircle>(self, out),
        }
    }
}

/// Shapes separated by one or more line terminators, printed one blank
/// line apart
impl Syntax for Vec<Shape> {
    const RULE: Rule = Rule::shapes;

    fn from_pair(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Self, ParseError> {
        children(pair, Rule::shape)
            .map(|s| Shape::from_pair(s, src))
            .collect()
    }

    fn print(&self, out: &mut Printer) -> Result<(), PrintError> {
        for (i, shape) in self.iter().enumerate() {
            if i > 0 {
                out.blank_line();
            }
            shape.print(out)?;
        }
        Ok(())
    }
}
