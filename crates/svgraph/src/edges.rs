//! Edge resolution.
//!
//! Every `line` and `path` element, in document order, is reduced to an edge
//! candidate (a start and an end point). Each endpoint is snapped to the node
//! whose anchor is closest; ties go to the node that appears first. Self
//! loops are dropped, and candidates resolving to the same ordered
//! `(source, target)` pair are merged last-wins: the pair keeps the position
//! where it was first seen.

use indexmap::{IndexMap, map::Entry};
use log::{debug, trace};
use roxmltree::Node as XmlNode;

use svgraph_core::{
    geometry::Point,
    graph::{Edge, Node},
};

use crate::{
    document::{LINE, PATH, SvgDocument},
    error::GeometryError,
    path,
    shape::required,
};

/// Start and end point of a connector before it is matched to nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeCandidate {
    start: Point,
    end: Point,
}

impl EdgeCandidate {
    pub(crate) fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Reads the candidate from a `line` or `path` element.
    ///
    /// Returns `Ok(None)` for paths with fewer than two coordinate pairs.
    pub(crate) fn read(
        doc: &SvgDocument<'_>,
        element: XmlNode<'_, '_>,
    ) -> Result<Option<Self>, GeometryError> {
        if doc.is(element, LINE) {
            let start = Point::new(required(element, "x1")?, required(element, "y1")?);
            let end = Point::new(required(element, "x2")?, required(element, "y2")?);
            return Ok(Some(Self::new(start, end)));
        }

        let data = element
            .attribute("d")
            .ok_or(GeometryError::MissingAttribute("d"))?;
        let points = path::endpoints(data)?;

        match (points.first(), points.last()) {
            (Some(start), Some(end)) if points.len() >= 2 => Ok(Some(Self::new(*start, *end))),
            _ => Ok(None),
        }
    }
}

/// Resolves the deduplicated edge list of `doc` against `nodes`.
///
/// With no nodes there is nothing to snap to, and no edges are produced.
pub(crate) fn resolve_edges(doc: &SvgDocument<'_>, nodes: &[Node]) -> Vec<Edge> {
    if nodes.is_empty() {
        debug!(location = doc.location(); "No nodes to connect, skipping edge resolution");
        return Vec::new();
    }

    let mut edges: IndexMap<(String, String), Edge> = IndexMap::new();

    for element in doc.elements(&[PATH, LINE]) {
        let candidate = match EdgeCandidate::read(doc, element) {
            Ok(Some(candidate)) => candidate,
            Ok(None) => {
                trace!(location = doc.location(); "Path has fewer than two points, not a connector");
                continue;
            }
            Err(err) => {
                debug!(
                    location = doc.location(),
                    element = element.tag_name().name(),
                    error:% = err;
                    "Skipping connector with unusable geometry"
                );
                continue;
            }
        };

        let Some(edge) = resolve_candidate(candidate, nodes) else {
            continue;
        };

        match edges.entry((edge.source().to_string(), edge.target().to_string())) {
            Entry::Occupied(mut slot) => {
                trace!(source = edge.source(), target = edge.target(); "Replacing duplicate edge");
                slot.insert(edge);
            }
            Entry::Vacant(slot) => {
                slot.insert(edge);
            }
        }
    }

    edges.into_values().collect()
}

/// Snaps both ends of `candidate`; `None` for self loops.
fn resolve_candidate(candidate: EdgeCandidate, nodes: &[Node]) -> Option<Edge> {
    let source = nearest_node(candidate.start, nodes)?;
    let target = nearest_node(candidate.end, nodes)?;

    if source.id() == target.id() {
        trace!(node = source.id(); "Dropping self loop");
        return None;
    }

    Some(Edge::new(source.id(), target.id()))
}

/// Returns the node whose anchor is closest to `point`.
///
/// Ties resolve to the lowest index; an empty slice has no answer.
pub(crate) fn nearest_node(point: Point, nodes: &[Node]) -> Option<&Node> {
    nodes
        .iter()
        .map(|node| (node, node.anchor().distance_to(point)))
        .fold(None, |best: Option<(&Node, f32)>, (node, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((node, distance)),
        })
        .map(|(node, _)| node)
}
