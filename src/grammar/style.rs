//! The style line of a shape: `<style> <color>`, e.g. `filled red`.

use super::{Printer, Syntax, child};
use crate::Rule;
use crate::ast::{Color, DrawStyle, Style};
use crate::errors::{ParseError, PrintError, SourceContext};
use pest::iterators::Pair;

impl Syntax for DrawStyle {
    const RULE: Rule = Rule::draw_style;

    fn from_pair(pair: Pair<'_, Rule>, src: &SourceContext) -> Result<Self, ParseError> {
        let style_pair = child(pair.clone(), Rule::style_name, src)?;
        let color_pair = child(pair, Rule::color_name, src)?;

        let keyword = style_pair.as_str();
        let style = Style::from_keyword(keyword).ok_or_else(|| {
            crate::log::warn!(keyword, "unknown style");
            ParseError::unknown_style(src, keyword, style_pair.as_span().start())
        })?;

        let keyword = color_pair.as_str();
        let color = Color::from_keyword(keyword).ok_or_else(|| {
            crate::log::warn!(keyword, "unknown color");
            ParseError::unknown_color(src, keyword, color_pair.as_span().start())
        })?;

        Ok(DrawStyle { style, color })
    }

    fn print(&self, out: &mut Printer) -> Result<(), PrintError> {
        out.keyword(self.style.keyword());
        out.space();
        out.keyword(self.color.keyword());
        Ok(())
    }
}
