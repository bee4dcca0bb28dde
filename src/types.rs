//! Numeric primitives and affine math for scene values.
//!
//! Transforms compose into a `glam::DAffine2`. Lists compose left to right:
//! the first transform listed is the first one applied to a point.

use crate::ast::Transform;
use glam::{DAffine2, DVec2, dvec2};
use std::fmt;

/// Error type for numbers the text format cannot carry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate a number read from or written to text (rejects NaN/infinite)
#[inline]
pub fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// A 2D point, written as two numbers on one line
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Map this point through an affine matrix
    pub fn transformed(self, affine: &DAffine2) -> Point {
        affine.transform_point2(self.into()).into()
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> DVec2 {
        dvec2(p.x, p.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Point {
        Point { x: v.x, y: v.y }
    }
}

impl Transform {
    /// The affine matrix for this single transform.
    ///
    /// Rotation angles are in degrees, counter-clockwise.
    pub fn to_affine(&self) -> DAffine2 {
        match *self {
            Transform::Rotate(degrees) => DAffine2::from_angle(degrees.to_radians()),
            Transform::Scale(sx, sy) => DAffine2::from_scale(dvec2(sx, sy)),
            Transform::Translate(tx, ty) => DAffine2::from_translation(dvec2(tx, ty)),
        }
    }

    /// Apply this transform to a point
    pub fn apply(&self, point: Point) -> Point {
        point.transformed(&self.to_affine())
    }
}

/// Compose transforms in listed order into one matrix
pub fn combine(transforms: &[Transform]) -> DAffine2 {
    transforms
        .iter()
        .fold(DAffine2::IDENTITY, |acc, t| t.to_affine() * acc)
}
