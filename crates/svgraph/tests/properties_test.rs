//! Property tests for graph invariants over generated diagrams.

use std::{collections::HashSet, fmt::Write};

use proptest::prelude::*;

use svgraph::{GraphExtractor, config::ExtractConfig, identifier::FallbackIds};

#[derive(Debug, Clone)]
struct LabeledBox {
    label: String,
    x: i32,
    y: i32,
}

#[derive(Debug, Clone)]
struct Connector {
    from: (i32, i32),
    to: (i32, i32),
    as_path: bool,
}

fn label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][A-Za-z0-9 ]{0,10}",
        Just("---".to_string()),
        Just("   ".to_string()),
        Just("Web-Server".to_string()),
    ]
}

fn box_strategy() -> impl Strategy<Value = LabeledBox> {
    (label_strategy(), 0i32..1000, 0i32..1000)
        .prop_map(|(label, x, y)| LabeledBox { label, x, y })
}

fn connector_strategy() -> impl Strategy<Value = Connector> {
    ((0i32..1100, 0i32..1100), (0i32..1100, 0i32..1100), any::<bool>())
        .prop_map(|(from, to, as_path)| Connector { from, to, as_path })
}

fn render(boxes: &[LabeledBox], connectors: &[Connector]) -> String {
    let mut svg = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg">"#);
    for b in boxes {
        write!(
            svg,
            r#"<g><rect x="{}" y="{}" width="80" height="40"/><text>{}</text></g>"#,
            b.x, b.y, b.label
        )
        .unwrap();
    }
    for c in connectors {
        if c.as_path {
            write!(
                svg,
                r#"<path d="M {} {} L {} {}"/>"#,
                c.from.0, c.from.1, c.to.0, c.to.1
            )
            .unwrap();
        } else {
            write!(
                svg,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
                c.from.0, c.from.1, c.to.0, c.to.1
            )
            .unwrap();
        }
    }
    svg.push_str("</svg>");
    svg
}

fn extractor() -> GraphExtractor {
    GraphExtractor::new(ExtractConfig::new("svg", FallbackIds::Ordinal))
}

fn check_node_count(
    boxes: Vec<LabeledBox>,
    connectors: Vec<Connector>,
) -> Result<(), TestCaseError> {
    let graph = extractor()
        .extract(&render(&boxes, &connectors), "gen.svg")
        .unwrap();
    let expected = boxes.iter().filter(|b| !b.label.trim().is_empty()).count();
    prop_assert_eq!(graph.nodes().len(), expected);
    Ok(())
}

fn check_no_self_loops(
    boxes: Vec<LabeledBox>,
    connectors: Vec<Connector>,
) -> Result<(), TestCaseError> {
    let graph = extractor()
        .extract(&render(&boxes, &connectors), "gen.svg")
        .unwrap();
    for edge in graph.edges() {
        prop_assert_ne!(edge.source(), edge.target());
    }
    Ok(())
}

fn check_unique_pairs(
    boxes: Vec<LabeledBox>,
    connectors: Vec<Connector>,
) -> Result<(), TestCaseError> {
    let graph = extractor()
        .extract(&render(&boxes, &connectors), "gen.svg")
        .unwrap();
    let pairs: HashSet<_> = graph
        .edges()
        .iter()
        .map(|e| (e.source(), e.target()))
        .collect();
    prop_assert_eq!(pairs.len(), graph.edges().len());
    Ok(())
}

fn check_idempotent(
    boxes: Vec<LabeledBox>,
    connectors: Vec<Connector>,
) -> Result<(), TestCaseError> {
    let source = render(&boxes, &connectors);
    let first = GraphExtractor::default().extract(&source, "gen.svg").unwrap();
    let second = GraphExtractor::default().extract(&source, "gen.svg").unwrap();
    prop_assert_eq!(first, second);
    Ok(())
}

fn check_edges_reference_nodes(
    boxes: Vec<LabeledBox>,
    connectors: Vec<Connector>,
) -> Result<(), TestCaseError> {
    let graph = extractor()
        .extract(&render(&boxes, &connectors), "gen.svg")
        .unwrap();
    let ids: HashSet<_> = graph.nodes().iter().map(|n| n.id()).collect();
    for edge in graph.edges() {
        prop_assert!(ids.contains(edge.source()));
        prop_assert!(ids.contains(edge.target()));
    }
    Ok(())
}

fn check_no_connectors_no_edges(boxes: Vec<LabeledBox>) -> Result<(), TestCaseError> {
    let graph = extractor().extract(&render(&boxes, &[]), "gen.svg").unwrap();
    prop_assert!(graph.edges().is_empty());
    Ok(())
}

fn check_ids_non_empty(boxes: Vec<LabeledBox>) -> Result<(), TestCaseError> {
    let graph = GraphExtractor::default()
        .extract(&render(&boxes, &[]), "gen.svg")
        .unwrap();
    for node in graph.nodes() {
        prop_assert!(!node.id().is_empty());
    }
    Ok(())
}

proptest! {
    #[test]
    fn node_count_matches_labels(
        boxes in prop::collection::vec(box_strategy(), 0..12),
        connectors in prop::collection::vec(connector_strategy(), 0..12),
    ) {
        check_node_count(boxes, connectors)?;
    }

    #[test]
    fn edges_are_never_self_loops(
        boxes in prop::collection::vec(box_strategy(), 0..12),
        connectors in prop::collection::vec(connector_strategy(), 0..24),
    ) {
        check_no_self_loops(boxes, connectors)?;
    }

    #[test]
    fn edge_pairs_are_unique(
        boxes in prop::collection::vec(box_strategy(), 0..6),
        connectors in prop::collection::vec(connector_strategy(), 0..40),
    ) {
        check_unique_pairs(boxes, connectors)?;
    }

    #[test]
    fn extraction_is_idempotent(
        boxes in prop::collection::vec(box_strategy(), 0..12),
        connectors in prop::collection::vec(connector_strategy(), 0..12),
    ) {
        check_idempotent(boxes, connectors)?;
    }

    #[test]
    fn edges_reference_extracted_nodes(
        boxes in prop::collection::vec(box_strategy(), 0..12),
        connectors in prop::collection::vec(connector_strategy(), 0..12),
    ) {
        check_edges_reference_nodes(boxes, connectors)?;
    }

    #[test]
    fn no_connectors_means_no_edges(boxes in prop::collection::vec(box_strategy(), 0..12)) {
        check_no_connectors_no_edges(boxes)?;
    }

    #[test]
    fn node_ids_are_never_empty(boxes in prop::collection::vec(box_strategy(), 0..12)) {
        check_ids_non_empty(boxes)?;
    }
}
