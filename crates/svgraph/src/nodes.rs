//! Node extraction.
//!
//! Every `text` element with a non-blank label becomes exactly one node, in
//! document order. The node's anchor is the center of the shape the label
//! belongs to:
//!
//! 1. the nearest ancestor that is itself a shape, otherwise
//! 2. a shape sibling inside the text's own group, when that group holds no
//!    other label (rectangles and ellipses are preferred over paths; the
//!    document root is never searched), otherwise
//! 3. the text element's own `x`/`y` (missing values count as zero).
//!
//! A shape whose geometry cannot be read falls through to the text position
//! rather than dropping the node.

use log::{debug, trace};
use roxmltree::Node as XmlNode;

use svgraph_core::{
    geometry::Point,
    graph::Node,
    identifier::{FallbackAllocator, FallbackIds, derive_id},
};

use crate::{
    document::{SvgDocument, TEXT},
    shape::{self, Shape, ShapeKind},
};

/// A node whose id may still be pending a fallback.
struct Candidate {
    label: String,
    id: Option<String>,
    anchor: Point,
}

/// Extracts the node sequence of `doc`.
pub(crate) fn extract_nodes(doc: &SvgDocument<'_>, fallback_ids: FallbackIds) -> Vec<Node> {
    let candidates: Vec<Candidate> = doc
        .elements(&[TEXT])
        .filter_map(|text| {
            let label = label_of(text);
            if label.is_empty() {
                trace!(location = doc.location(); "Skipping empty text element");
                return None;
            }
            Some(Candidate {
                id: derive_id(&label),
                anchor: anchor_of(doc, text),
                label,
            })
        })
        .collect();

    // Fallbacks are issued only once every derived id is known.
    let mut fallbacks = FallbackAllocator::new(
        fallback_ids,
        candidates.iter().filter_map(|c| c.id.clone()),
    );

    candidates
        .into_iter()
        .enumerate()
        .map(|(idx, candidate)| {
            let id = candidate.id.unwrap_or_else(|| {
                let id = fallbacks.allocate(idx + 1, &candidate.label);
                debug!(label = candidate.label.as_str(), id = id.as_str(); "Assigned fallback id");
                id
            });
            trace!(
                id = id.as_str(),
                x = candidate.anchor.x(),
                y = candidate.anchor.y();
                "Node extracted"
            );
            Node::new(id, candidate.label, candidate.anchor)
        })
        .collect()
}

/// Concatenated descendant text, trimmed.
fn label_of(text: XmlNode<'_, '_>) -> String {
    let raw: String = text
        .descendants()
        .filter(|node| node.is_text())
        .filter_map(|node| node.text())
        .collect();
    raw.trim().to_string()
}

fn anchor_of<'a, 'input>(doc: &'a SvgDocument<'input>, text: XmlNode<'a, 'input>) -> Point {
    if let Some(element) = anchor_shape(doc, text) {
        match Shape::read(ShapeKind::of(doc, element), element) {
            Ok(shape) => return shape.center(),
            Err(err) => debug!(
                location = doc.location(),
                element = element.tag_name().name(),
                error:% = err;
                "Unusable anchor shape, falling back to text position"
            ),
        }
    }
    text_position(doc, text)
}

fn anchor_shape<'a, 'input>(
    doc: &'a SvgDocument<'input>,
    text: XmlNode<'a, 'input>,
) -> Option<XmlNode<'a, 'input>> {
    let root = doc.root();

    if let Some(ancestor) = text
        .ancestors()
        .skip(1)
        .take_while(|node| *node != root)
        .find(|node| ShapeKind::of(doc, *node).is_shape())
    {
        return Some(ancestor);
    }

    // A group shared by several labels (an editor layer) says nothing about
    // which shape belongs to which label.
    let group = text
        .parent_element()
        .filter(|parent| *parent != root)
        .filter(|parent| labels_in(doc, *parent) == 1)?;
    let siblings = || group.children().filter(|node| node.is_element());

    siblings()
        .find(|node| {
            matches!(
                ShapeKind::of(doc, *node),
                ShapeKind::Rectangle | ShapeKind::Ellipse
            )
        })
        .or_else(|| siblings().find(|node| ShapeKind::of(doc, *node) == ShapeKind::Path))
}

/// Number of `text` elements under `group` that would become nodes.
fn labels_in(doc: &SvgDocument<'_>, group: XmlNode<'_, '_>) -> usize {
    group
        .descendants()
        .filter(|node| doc.is(*node, TEXT) && !label_of(*node).is_empty())
        .count()
}

fn text_position(doc: &SvgDocument<'_>, text: XmlNode<'_, '_>) -> Point {
    let coordinate = |attribute| {
        shape::optional(text, attribute)
            .unwrap_or_else(|err| {
                debug!(location = doc.location(), error:% = err; "Ignoring text position");
                None
            })
            .unwrap_or(0.0)
    };
    Point::new(coordinate("x"), coordinate("y"))
}
