//! Document model for scene files
//!
//! These types are plain values: built in one shot by a parse, or by a
//! caller that wants to print a scene. Every container owns its children.

use crate::types::combine;
use enum_dispatch::enum_dispatch;
use glam::DAffine2;
use std::fmt;

/// A complete scene document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub groups: Vec<ShapeGroup>,
}

impl Document {
    pub fn new(groups: Vec<ShapeGroup>) -> Self {
        Document { groups }
    }

    /// Every shape in document order with its world matrix
    pub fn placements(&self) -> impl Iterator<Item = (&Shape, DAffine2)> {
        self.groups.iter().flat_map(|group| group.placements())
    }
}

/// A named group of shapes sharing group-level transforms
///
/// A group always holds at least one shape; the parser rejects empty groups
/// and the printer refuses to write one.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGroup {
    pub name: String,
    pub transforms: Vec<Transform>,
    pub shapes: Vec<Shape>,
}

impl ShapeGroup {
    pub fn new(name: impl Into<String>, transforms: Vec<Transform>, shapes: Vec<Shape>) -> Self {
        ShapeGroup {
            name: name.into(),
            transforms,
            shapes,
        }
    }

    /// Combined matrix of the group-level transforms
    pub fn transform(&self) -> DAffine2 {
        combine(&self.transforms)
    }

    /// Each shape with its own transforms applied first, then the group's
    pub fn placements(&self) -> impl Iterator<Item = (&Shape, DAffine2)> {
        let group = self.transform();
        self.shapes
            .iter()
            .map(move |shape| (shape, group * shape.transform()))
    }
}

/// One affine operation. Order within a list matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Rotation in degrees
    Rotate(f64),
    /// Scale factors along x and y
    Scale(f64, f64),
    /// Offset along x and y
    Translate(f64, f64),
}

impl Transform {
    /// Variant name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Transform::Rotate(_) => "rotate",
            Transform::Scale(..) => "scale",
            Transform::Translate(..) => "translate",
        }
    }
}

/// How a shape is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Stroke the outline, leaving it open
    Path,
    /// Stroke the closed outline
    Closed,
    /// Fill the interior
    Filled,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Path, Style::Closed, Style::Filled];

    pub fn keyword(self) -> &'static str {
        match self {
            Style::Path => "path",
            Style::Closed => "closed",
            Style::Filled => "filled",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Style> {
        Style::ALL.into_iter().find(|s| s.keyword() == keyword)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Named colors. Keywords match exactly, lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Blue,
    Brown,
    Cyan,
    Gray,
    Green,
    Orange,
    Pink,
    Red,
    White,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 11] = [
        Color::Black,
        Color::Blue,
        Color::Brown,
        Color::Cyan,
        Color::Gray,
        Color::Green,
        Color::Orange,
        Color::Pink,
        Color::Red,
        Color::White,
        Color::Yellow,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Brown => "brown",
            Color::Cyan => "cyan",
            Color::Gray => "gray",
            Color::Green => "green",
            Color::Orange => "orange",
            Color::Pink => "pink",
            Color::Red => "red",
            Color::White => "white",
            Color::Yellow => "yellow",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Color> {
        Color::ALL.into_iter().find(|c| c.keyword() == keyword)
    }

    /// RGB components for renderers
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Black => (0, 0, 0),
            Color::Blue => (0, 0, 255),
            Color::Brown => (165, 42, 42),
            Color::Cyan => (0, 255, 255),
            Color::Gray => (128, 128, 128),
            Color::Green => (0, 128, 0),
            Color::Orange => (255, 165, 0),
            Color::Pink => (255, 192, 203),
            Color::Red => (255, 0, 0),
            Color::White => (255, 255, 255),
            Color::Yellow => (255, 255, 0),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Style and color of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawStyle {
    pub style: Style,
    pub color: Color,
}

impl DrawStyle {
    pub fn new(style: Style, color: Color) -> Self {
        DrawStyle { style, color }
    }
}

/// Common access to the fields every shape carries
#[enum_dispatch]
pub trait ShapeRecord {
    /// Name or comment text; empty when the source had none
    fn name(&self) -> &str;

    fn draw_style(&self) -> DrawStyle;

    /// Shape-level transforms in application order
    fn transforms(&self) -> &[Transform];

    /// Combined matrix of the shape-level transforms
    fn transform(&self) -> DAffine2 {
        combine(self.transforms())
    }
}

/// A square with corners at (0, 0) and (1, 1) before transforms
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSquare {
    pub name: String,
    pub draw_style: DrawStyle,
    pub transforms: Vec<Transform>,
}

impl UnitSquare {
    pub fn new(name: impl Into<String>, draw_style: DrawStyle, transforms: Vec<Transform>) -> Self {
        UnitSquare {
            name: name.into(),
            draw_style,
            transforms,
        }
    }
}

impl ShapeRecord for UnitSquare {
    fn name(&self) -> &str {
        &self.name
    }

    fn draw_style(&self) -> DrawStyle {
        self.draw_style
    }

    fn transforms(&self) -> &[Transform] {
        &self.transforms
    }
}

/// A circle of radius 1 centered on the origin before transforms
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCircle {
    pub name: String,
    pub draw_style: DrawStyle,
    pub transforms: Vec<Transform>,
}

impl UnitCircle {
    pub fn new(name: impl Into<String>, draw_style: DrawStyle, transforms: Vec<Transform>) -> Self {
        UnitCircle {
            name: name.into(),
            draw_style,
            transforms,
        }
    }
}

impl ShapeRecord for UnitCircle {
    fn name(&self) -> &str {
        &self.name
    }

    fn draw_style(&self) -> DrawStyle {
        self.draw_style
    }

    fn transforms(&self) -> &[Transform] {
        &self.transforms
    }
}

/// A drawable shape
#[enum_dispatch(ShapeRecord)]
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    UnitSquare,
    UnitCircle,
}

impl Shape {
    /// Variant name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::UnitSquare(_) => "unit square",
            Shape::UnitCircle(_) => "unit circle",
        }
    }
}
