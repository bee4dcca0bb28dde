//! Transform lines: `r <deg>`, `s <sx> <sy>`, `t <tx> <ty>`.
//!
//! Each variant is described once by a [`TransformForm`]: the tag, the rule,
//! and a conversion pair between operand arrays and [`Transform`]. Building
//! a transform from operands always succeeds; taking one apart fails for
//! every other variant, so each form can only print its own variant.

use super::lexical::{parse_numbers, print_number};
use super::{Printer, Syntax, children};
use crate::Rule;
use crate::ast::Transform;
use crate::errors::{ParseError, PrintError, SourceContext};
use pest::iterators::Pair;

/// One transform variant and its two-way conversion
pub trait TransformForm {
    /// One-letter tag that starts the line
    const TAG: &'static str;
    const RULE: Rule;
    /// Variant name for diagnostics
    const NAME: &'static str;

    type Operands: AsRef<[f64]> + for<'a> TryFrom<&'a [f64]>;

    fn apply(operands: Self::Operands) -> Transform;

    fn unapply(transform: &Transform) -> Result<Self::Operands, PrintError>;

    /// Build the transform from this form's pair
    fn from_pair(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Transform, ParseError> {
        let start = pair.as_span().start();
        let numbers = parse_numbers(pair, src)?;
        let operands = <Self::Operands as TryFrom<&[f64]>>::try_from(numbers.as_slice())
            .map_err(|_| ParseError::unexpected(src, Self::RULE, "operands", start))?;
        Ok(Self::apply(operands))
    }

    /// Print `transform`, which must be this form's variant
    fn print(transform: &Transform, out: &mut Printer) -> Result<(), PrintError> {
        let operands = Self::unapply(transform)?;
        out.keyword(Self::TAG);
        for &value in operands.as_ref() {
            out.space();
            print_number(value, out)?;
        }
        Ok(())
    }
}

fn mismatch(expected: &'static str, found: &Transform) -> PrintError {
    PrintError::VariantMismatch {
        expected,
        found: found.kind(),
    }
}

pub struct Rotate;

impl TransformForm for Rotate {
    const TAG: &'static str = "r";
    const RULE: Rule = Rule::rotate;
    const NAME: &'static str = "rotate";
    type Operands = [f64; 1];

    fn apply([degrees]: [f64; 1]) -> Transform {
        Transform::Rotate(degrees)
    }

    fn unapply(transform: &Transform) -> Result<[f64; 1], PrintError> {
        match *transform {
            Transform::Rotate(degrees) => Ok([degrees]),
            ref other => Err(mismatch(Self::NAME, other)),
        }
    }
}

pub struct Scale;

impl TransformForm for Scale {
    const TAG: &'static str = "s";
    const RULE: Rule = Rule::scale;
    const NAME: &'static str = "scale";
    type Operands = [f64; 2];

    fn apply([sx, sy]: [f64; 2]) -> Transform {
        Transform::Scale(sx, sy)
    }

    fn unapply(transform: &Transform) -> Result<[f64; 2], PrintError> {
        match *transform {
            Transform::Scale(sx, sy) => Ok([sx, sy]),
            ref other => Err(mismatch(Self::NAME, other)),
        }
    }
}

pub struct Translate;

impl TransformForm for Translate {
    const TAG: &'static str = "t";
    const RULE: Rule = Rule::translate;
    const NAME: &'static str = "translate";
    type Operands = [f64; 2];

    fn apply([tx, ty]: [f64; 2]) -> Transform {
        Transform::Translate(tx, ty)
    }

    fn unapply(transform: &Transform) -> Result<[f64; 2], PrintError> {
        match *transform {
            Transform::Translate(tx, ty) => Ok([tx, ty]),
            ref other => Err(mismatch(Self::NAME, other)),
        }
    }
}

impl Syntax for Transform {
    const RULE: Rule = Rule::transform;

    fn from_pair(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Self, ParseError> {
        let start = pair.as_span().start();
        let inner = pair
            .into_inner()
            .next()
            .ok_or_else(|| ParseError::unexpected(src, Rule::transform, "r, s or t", start))?;
        match inner.as_rule() {
            Rule::rotate => Rotate::from_pair(inner, src),
            Rule::scale => Scale::from_pair(inner, src),
            Rule::translate => Translate::from_pair(inner, src),
            other => Err(ParseError::unexpected(src, other, "r, s or t", start)),
        }
    }

    fn print(&self, out: &mut Printer) -> Result<(), PrintError> {
        match self {
            Transform::Rotate(_) => Rotate::print(self, out),
            Transform::Scale(..) => Scale::print(self, out),
            Transform::Translate(..) => Translate::print(self, out),
        }
    }
}

/// Transform lines separated by single line terminators
impl Syntax for Vec<Transform> {
    const RULE: Rule = Rule::transforms;

    fn from_pair(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Self, ParseError> {
        children(pair, Rule::transform)
            .map(|t| Transform::from_pair(t, src))
            .collect()
    }

    fn print(&self, out: &mut Printer) -> Result<(), PrintError> {
        for (i, transform) in self.iter().enumerate() {
            if i > 0 {
                out.line_end();
            }
            transform.print(out)?;
        }
        Ok(())
    }
}

/// Transforms under a shape or group header, from a `trailing_transforms` pair
pub(crate) fn parse_trailing(
    pair: Pair<'_, Rule>,
    src: &SourceContext,
) -> Result<Vec<Transform>, ParseError> {
    match children(pair, Rule::transforms).next() {
        Some(transforms) => Vec::<Transform>::from_pair(transforms, src),
        None => Ok(Vec::new()),
    }
}

/// Each transform on its own line after the header line
pub(crate) fn print_trailing(transforms: &[Transform], out: &mut Printer) -> Result<(), PrintError> {
    for transform in transforms {
        out.line_end();
        transform.print(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{PrintOptions, parse_rule, print_rule};

    fn parse<T: Syntax>(input: &str) -> Result<T, ParseError> {
        parse_rule(&SourceContext::anonymous(input))
    }

    fn print<T: Syntax>(value: &T) -> Result<String, PrintError> {
        print_rule(value, &PrintOptions::default())
    }

    #[test]
    fn each_tag_selects_one_variant() {
        assert_eq!(parse::<Transform>("r 45").unwrap(), Transform::Rotate(45.0));
        assert_eq!(parse::<Transform>("s 8 9").unwrap(), Transform::Scale(8.0, 9.0));
        assert_eq!(
            parse::<Transform>("t -1.5 2").unwrap(),
            Transform::Translate(-1.5, 2.0)
        );
    }

    #[test]
    fn blanks_around_and_between_operands() {
        assert_eq!(
            parse::<Transform>(" \ts\t 2   3 \t").unwrap(),
            Transform::Scale(2.0, 3.0)
        );
    }

    #[test]
    fn operand_count_is_fixed_per_tag() {
        assert!(parse::<Transform>("r 1 2").is_err());
        assert!(parse::<Transform>("s 1").is_err());
        assert!(parse::<Transform>("t 1").is_err());
    }

    #[test]
    fn tag_needs_whitespace_and_known_letter() {
        assert!(parse::<Transform>("r45").is_err());
        assert!(parse::<Transform>("x 1 2").is_err());
        assert!(parse::<Transform>("R 45").is_err());
    }

    #[test]
    fn prints_canonical_lines() {
        assert_eq!(print(&Transform::Rotate(45.0)).unwrap(), "r 45.0");
        assert_eq!(print(&Transform::Scale(8.0, 9.5)).unwrap(), "s 8.0 9.5");
        assert_eq!(print(&Transform::Translate(-1.0, 0.25)).unwrap(), "t -1.0 0.25");
    }

    #[test]
    fn forms_refuse_other_variants() {
        let mut out = Printer::new(&PrintOptions::default());
        assert_eq!(
            Rotate::print(&Transform::Scale(1.0, 1.0), &mut out),
            Err(PrintError::VariantMismatch {
                expected: "rotate",
                found: "scale"
            })
        );
        assert!(Scale::unapply(&Transform::Translate(1.0, 2.0)).is_err());
        assert!(Translate::unapply(&Transform::Rotate(1.0)).is_err());
        assert_eq!(Translate::unapply(&Transform::Translate(1.0, 2.0)), Ok([1.0, 2.0]));
        assert_eq!(out.finish(), "");
    }

    #[test]
    fn sequence_keeps_order() {
        let transforms: Vec<Transform> = parse("s 8 9\nr 45\nt 1 2").unwrap();
        assert_eq!(
            transforms,
            vec![
                Transform::Scale(8.0, 9.0),
                Transform::Rotate(45.0),
                Transform::Translate(1.0, 2.0)
            ]
        );
        assert_eq!(print(&transforms).unwrap(), "s 8.0 9.0\nr 45.0\nt 1.0 2.0");
    }

    #[test]
    fn sequence_needs_one_transform() {
        // Shapes without transforms go through the optional trailing rule
        use crate::SceneParser;
        use pest::Parser;

        assert!(parse::<Vec<Transform>>("").is_err());

        let src = SourceContext::anonymous("");
        let pair = SceneParser::parse(Rule::trailing_transforms, "")
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(parse_trailing(pair, &src).unwrap(), Vec::<Transform>::new());
        assert_eq!(print(&Vec::<Transform>::new()).unwrap(), "");
    }

    #[test]
    fn sequence_stops_at_blank_line() {
        assert!(parse::<Vec<Transform>>("r 1\n\nr 2").is_err());
    }

    #[test]
    fn non_finite_operand_cannot_print() {
        assert!(matches!(
            print(&Transform::Rotate(f64::NAN)),
            Err(PrintError::NonFiniteNumber { .. })
        ));
    }
}
