//! Path data endpoint extraction.
//!
//! Only segment end points are of interest here: curve control points and
//! arc radii are ignored, and no curve is ever flattened.

use svgtypes::{PathParser, PathSegment};

use svgraph_core::geometry::Point;

use crate::error::GeometryError;

/// Returns the coordinate of the first move-to command in `data`.
///
/// This is the anchor used for path-shaped nodes. It is an approximation:
/// the true centroid of the outline is not computed.
pub(crate) fn first_move_to(data: &str) -> Result<Point, GeometryError> {
    match PathParser::from(data).next() {
        Some(Ok(PathSegment::MoveTo { x, y, .. })) => to_point(x, y),
        Some(Ok(_)) | None => Err(GeometryError::NoMoveTo),
        Some(Err(err)) => Err(GeometryError::InvalidPathData(err.to_string())),
    }
}

/// Returns the absolute end point of every segment in `data`, in order.
///
/// Relative commands are resolved against the current point, `H`/`V` keep
/// the other coordinate, and a close-path returns to the start of its
/// subpath.
pub(crate) fn endpoints(data: &str) -> Result<Vec<Point>, GeometryError> {
    let mut points = Vec::new();
    let mut current = (0.0, 0.0);
    let mut subpath_start = current;

    for segment in PathParser::from(data) {
        let segment = segment.map_err(|err| GeometryError::InvalidPathData(err.to_string()))?;

        let next = match segment {
            PathSegment::MoveTo { abs, x, y } => {
                let next = resolve(current, abs, x, y);
                subpath_start = next;
                next
            }
            PathSegment::LineTo { abs, x, y }
            | PathSegment::SmoothQuadratic { abs, x, y }
            | PathSegment::CurveTo { abs, x, y, .. }
            | PathSegment::SmoothCurveTo { abs, x, y, .. }
            | PathSegment::Quadratic { abs, x, y, .. }
            | PathSegment::EllipticalArc { abs, x, y, .. } => resolve(current, abs, x, y),
            PathSegment::HorizontalLineTo { abs, x } => {
                let x = if abs { x } else { current.0 + x };
                (x, current.1)
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let y = if abs { y } else { current.1 + y };
                (current.0, y)
            }
            PathSegment::ClosePath { .. } => subpath_start,
        };

        points.push(to_point(next.0, next.1)?);
        current = next;
    }

    Ok(points)
}

fn resolve(current: (f64, f64), abs: bool, x: f64, y: f64) -> (f64, f64) {
    if abs {
        (x, y)
    } else {
        (current.0 + x, current.1 + y)
    }
}

fn to_point(x: f64, y: f64) -> Result<Point, GeometryError> {
    let point = Point::new(x as f32, y as f32);
    if point.is_finite() {
        Ok(point)
    } else {
        Err(GeometryError::InvalidPathData(format!(
            "coordinate ({x}, {y}) is out of range"
        )))
    }
}
