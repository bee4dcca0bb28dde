//! Parse and print scene documents: groups of unit squares and unit circles,
//! each with a draw style and rotate/scale/translate transforms.
//!
//! ```text
//! group wheels
//! t 2.0 0.0
//!
//! unit circle front
//! filled black
//! s 0.5 0.5
//! ```
//!
//! Parsing and printing are inverses: `parse(print(doc)) == doc` for every
//! printable document, and printing a parsed document gives the same text
//! with whitespace canonicalized.

use pest_derive::Parser;

pub mod ast;
pub mod errors;
pub mod grammar;
pub mod log;
pub mod types;

pub use ast::{
    Color, Document, DrawStyle, Shape, ShapeGroup, ShapeRecord, Style, Transform, UnitCircle,
    UnitSquare,
};
pub use errors::{ParseError, PrintError, SourceContext};
pub use grammar::{LineEnding, PrintOptions, Syntax, parse_rule, print_rule};
pub use types::{Point, combine};

#[derive(Parser)]
#[grammar = "scene.pest"]
pub struct SceneParser;

/// Parse a scene document.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    parse_rule(&SourceContext::anonymous(source))
}

/// Parse a scene document, naming the source in diagnostics.
pub fn parse_named(name: &str, source: &str) -> Result<Document, ParseError> {
    parse_rule(&SourceContext::new(name, source))
}

/// Print a document in canonical form.
pub fn print(document: &Document) -> Result<String, PrintError> {
    print_rule(document, &PrintOptions::default())
}

pub fn print_with_options(document: &Document, options: &PrintOptions) -> Result<String, PrintError> {
    print_rule(document, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_transform_lines() {
        for input in ["r 45", "s 1 2", "t -3.5 4", "  r\t90  "] {
            let result = SceneParser::parse(Rule::transform, input);
            assert!(result.is_ok(), "Failed to parse {:?}: {:?}", input, result.err());
        }
    }

    #[test]
    fn parse_transform_tag_dispatch() {
        // Exactly one alternative matches each tag
        let cases = [("r 1", Rule::rotate), ("s 1 2", Rule::scale), ("t 1 2", Rule::translate)];
        for (input, rule) in cases {
            let pair = SceneParser::parse(Rule::transform, input)
                .unwrap()
                .next()
                .unwrap();
            let inner: Vec<Rule> = pair.into_inner().map(|p| p.as_rule()).collect();
            assert_eq!(inner, vec![rule], "{input:?}");
            for other in [Rule::rotate, Rule::scale, Rule::translate] {
                if other != rule {
                    let result = SceneParser::parse(other, input);
                    assert!(result.is_err(), "{input:?} also matched {other:?}");
                }
            }
        }
    }

    #[test]
    fn parse_comment_needs_leading_blank() {
        let pair = SceneParser::parse(Rule::comment, " my name")
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(pair.into_inner().next().unwrap().as_str(), "my name");

        let pair = SceneParser::parse(Rule::comment, "\nnext line")
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(pair.as_str(), "");
        assert_eq!(pair.into_inner().count(), 0);
    }

    #[test]
    fn parse_trailing_transforms_leaves_separator() {
        let input = "\nr 45\n\nunit square";
        let pair = SceneParser::parse(Rule::trailing_transforms, input)
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(pair.as_str(), "\nr 45");

        // No transform on the next line: nothing is consumed
        let pair = SceneParser::parse(Rule::trailing_transforms, "\nunit square")
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(pair.as_str(), "");
    }

    #[test]
    fn parse_shape() {
        let input = "unit square box\nfilled red\ns 8 9\nr 45";
        let result = SceneParser::parse(Rule::shape, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_document_whitespace_only() {
        let result = SceneParser::parse(Rule::document, "  \n\n\t\n");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_document_rejects_top_level_shapes() {
        let result = SceneParser::parse(Rule::document, "unit square\nfilled red");
        assert!(result.is_err());
    }

    #[test]
    fn parse_and_print_document() {
        let input = "group g\n\nunit square\nfilled red\ns 8.0 9.0\nr 45.0";
        let document = parse(input).unwrap();
        assert_eq!(document.groups[0].shapes[0].transforms().len(), 2);
        assert_eq!(print(&document).unwrap(), input);
    }

    #[test]
    fn parse_named_reports_source_name() {
        let err = parse_named("scene.txt", "group g\n\nunit square\nfilled mauve").unwrap_err();
        let report = miette::Report::new(err);
        let source = report.source_code().unwrap();
        let span = miette::SourceSpan::from((0, 1));
        let contents = source.read_span(&span, 0, 0).unwrap();
        assert_eq!(contents.name(), Some("scene.txt"));
    }

    #[test]
    fn crlf_documents_round_trip() {
        let options = PrintOptions {
            line_ending: LineEnding::CrLf,
        };
        let document = parse("group g\n\nunit circle c\nclosed blue\nt 1 2").unwrap();
        let text = print_with_options(&document, &options).unwrap();
        assert_eq!(text, "group g\r\n\r\nunit circle c\r\nclosed blue\r\nt 1.0 2.0");
        assert_eq!(parse(&text).unwrap(), document);
    }
}
