//! Shape kinds and anchor computation.
//!
//! An element's kind is decided once, from its tag, and its geometry is then
//! read into a [`Shape`]. Centers are computed per variant:
//!
//! | kind        | elements            | center                     |
//! |-------------|---------------------|----------------------------|
//! | `Rectangle` | `rect`, `image`     | `(x + width/2, y + height/2)` |
//! | `Ellipse`   | `circle`, `ellipse` | `(cx, cy)`                 |
//! | `Path`      | `path`              | first move-to of `d`       |
//!
//! The path center is an approximation and is kept that way on purpose.

use std::str::FromStr;

use roxmltree::Node;
use svgtypes::Length;

use svgraph_core::geometry::{Bounds, Point, Size};

use crate::{
    document::{CIRCLE, ELLIPSE, IMAGE, PATH, RECT, SvgDocument},
    error::GeometryError,
    path,
};

/// Shape classification of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShapeKind {
    Rectangle,
    Ellipse,
    Path,
    Unknown,
}

impl ShapeKind {
    /// Classifies `node` by its namespace-qualified tag.
    pub(crate) fn of(doc: &SvgDocument<'_>, node: Node<'_, '_>) -> Self {
        if doc.is_any(node, &[RECT, IMAGE]) {
            Self::Rectangle
        } else if doc.is_any(node, &[CIRCLE, ELLIPSE]) {
            Self::Ellipse
        } else if doc.is(node, PATH) {
            Self::Path
        } else {
            Self::Unknown
        }
    }

    pub(crate) fn is_shape(self) -> bool {
        self != Self::Unknown
    }
}

/// Geometry read from a shape element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Shape {
    Rectangle(Bounds),
    Ellipse { center: Point },
    Path { first_move_to: Point },
}

impl Shape {
    /// Reads the attributes `kind` needs from `node`.
    ///
    /// Rectangles require `x` and `y`; a missing `width` or `height` counts
    /// as zero. Ellipses require `cx` and `cy`. Paths require `d` to start
    /// with a move-to.
    pub(crate) fn read(kind: ShapeKind, node: Node<'_, '_>) -> Result<Self, GeometryError> {
        match kind {
            ShapeKind::Rectangle => {
                let origin = Point::new(required(node, "x")?, required(node, "y")?);
                let size = Size::new(
                    optional(node, "width")?.unwrap_or(0.0),
                    optional(node, "height")?.unwrap_or(0.0),
                );
                let bounds = Bounds::new_from_top_left(origin, size);

                // Each value is finite on its own, but `x + width` may not be.
                let center = bounds.center();
                if !center.is_finite() {
                    let attribute = if center.x().is_finite() { "height" } else { "width" };
                    return Err(GeometryError::InvalidNumber {
                        attribute,
                        value: node.attribute(attribute).unwrap_or_default().to_string(),
                    });
                }
                Ok(Self::Rectangle(bounds))
            }
            ShapeKind::Ellipse => Ok(Self::Ellipse {
                center: Point::new(required(node, "cx")?, required(node, "cy")?),
            }),
            ShapeKind::Path => {
                let data = node
                    .attribute("d")
                    .ok_or(GeometryError::MissingAttribute("d"))?;
                Ok(Self::Path {
                    first_move_to: path::first_move_to(data)?,
                })
            }
            ShapeKind::Unknown => Err(GeometryError::Unsupported),
        }
    }

    /// Returns the anchor point of this shape.
    pub(crate) fn center(&self) -> Point {
        match self {
            Self::Rectangle(bounds) => bounds.center(),
            Self::Ellipse { center } => *center,
            Self::Path { first_move_to } => *first_move_to,
        }
    }
}

/// Reads a required length attribute.
pub(crate) fn required(node: Node<'_, '_>, attribute: &'static str) -> Result<f32, GeometryError> {
    optional(node, attribute)?.ok_or(GeometryError::MissingAttribute(attribute))
}

/// Reads an optional length attribute.
///
/// Units are dropped; values are taken as user units. For list-valued
/// attributes (`<text x="10 20 30">`) the first entry is used.
pub(crate) fn optional(
    node: Node<'_, '_>,
    attribute: &'static str,
) -> Result<Option<f32>, GeometryError> {
    let Some(raw) = node.attribute(attribute) else {
        return Ok(None);
    };

    let invalid = || GeometryError::InvalidNumber {
        attribute,
        value: raw.to_string(),
    };

    let first = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .find(|token| !token.is_empty())
        .ok_or_else(invalid)?;

    let length = Length::from_str(first).map_err(|_| invalid())?;
    let value = length.number as f32;

    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(invalid())
    }
}
