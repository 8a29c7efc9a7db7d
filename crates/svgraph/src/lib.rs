//! svgraph - Turn SVG architecture diagrams into node/edge graphs.
//!
//! Labels (`text` elements) become nodes anchored at the center of the shape
//! they sit on; connectors (`line` and `path` elements) become directed edges
//! between the nodes nearest to their two ends.
//!
//! Extraction runs in three passes over one parsed document: load, collect
//! nodes, then resolve edges against the complete node list. Nothing is
//! cached between calls, so an extractor can be shared freely across threads.

pub mod config;

mod document;
mod edges;
mod error;
mod nodes;
mod path;
mod shape;

pub use svgraph_core::{geometry, graph, identifier};

pub use document::SvgDocument;
pub use error::{GeometryError, MalformedCause, SvgraphError};

use log::{debug, info};

use config::ExtractConfig;
use graph::Graph;

/// Extracts graphs from diagram documents.
///
/// # Examples
///
/// ```rust
/// use svgraph::GraphExtractor;
///
/// let source = r#"<svg xmlns="http://www.w3.org/2000/svg">
///     <g><rect x="0" y="0" width="100" height="50"/><text>Client</text></g>
///     <g><rect x="300" y="0" width="100" height="50"/><text>Server</text></g>
///     <line x1="50" y1="25" x2="350" y2="25"/>
/// </svg>"#;
///
/// let extractor = GraphExtractor::default();
/// let graph = extractor.extract(source, "diagram.svg")
///     .expect("Failed to extract");
///
/// assert_eq!(graph.nodes().len(), 2);
/// assert_eq!(graph.edges()[0].source(), "client");
/// assert_eq!(graph.edges()[0].target(), "server");
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphExtractor {
    config: ExtractConfig,
}

impl GraphExtractor {
    /// Create a new extractor with the given configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use svgraph::{GraphExtractor, config::ExtractConfig, identifier::FallbackIds};
    ///
    /// let extractor = GraphExtractor::new(ExtractConfig::new("svg", FallbackIds::Ordinal));
    /// ```
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Returns the extraction configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Parse markup into a document without extracting anything.
    ///
    /// # Errors
    ///
    /// Returns [`SvgraphError::MalformedDocument`] if the text is not well-formed.
    pub fn load<'input>(
        &self,
        text: &'input str,
        location: &str,
    ) -> Result<SvgDocument<'input>, SvgraphError> {
        SvgDocument::parse(text, location, self.config.root_tag())
    }

    /// Extract the graph from markup text.
    ///
    /// # Arguments
    ///
    /// * `text` - The diagram markup.
    /// * `location` - Where the document came from, used only in diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`SvgraphError::MalformedDocument`] if the text is not
    /// well-formed. Problems with individual elements never fail the call.
    pub fn extract(&self, text: &str, location: &str) -> Result<Graph, SvgraphError> {
        let doc = self.load(text, location)?;
        Ok(self.extract_document(&doc))
    }

    /// Extract the graph from a UTF-8 byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SvgraphError::MalformedDocument`] for invalid UTF-8 or
    /// malformed markup.
    pub fn extract_bytes(&self, bytes: &[u8], location: &str) -> Result<Graph, SvgraphError> {
        let doc = SvgDocument::parse_bytes(bytes, location, self.config.root_tag())?;
        Ok(self.extract_document(&doc))
    }

    /// Extract the graph from an already loaded document.
    pub fn extract_document(&self, doc: &SvgDocument<'_>) -> Graph {
        info!(location = doc.location(); "Extracting diagram graph");

        let nodes = nodes::extract_nodes(doc, self.config.fallback_ids());
        debug!(location = doc.location(), count = nodes.len(); "Nodes extracted");

        let edges = edges::resolve_edges(doc, &nodes);
        debug!(location = doc.location(), count = edges.len(); "Edges resolved");

        info!(
            location = doc.location(),
            nodes = nodes.len(),
            edges = edges.len();
            "Graph extracted"
        );
        Graph::new(nodes, edges)
    }
}

/// Extract a graph with the default configuration.
///
/// # Errors
///
/// See [`GraphExtractor::extract`].
pub fn extract(text: &str, location: &str) -> Result<Graph, SvgraphError> {
    GraphExtractor::default().extract(text, location)
}
