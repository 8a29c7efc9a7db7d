//! Document loading.
//!
//! [`SvgDocument`] wraps a parsed [`roxmltree`] tree together with the
//! namespace URI declared on its root element. Every element lookup made by
//! the extractor goes through [`SvgDocument::is`], which qualifies the local
//! name with that namespace. Exported diagrams that omit the namespace
//! declaration are still searched, by local name alone.

use log::{debug, warn};
use roxmltree::{Document, Node, ParsingOptions};

use crate::error::SvgraphError;

pub(crate) const TEXT: &str = "text";
pub(crate) const PATH: &str = "path";
pub(crate) const LINE: &str = "line";
pub(crate) const RECT: &str = "rect";
pub(crate) const IMAGE: &str = "image";
pub(crate) const CIRCLE: &str = "circle";
pub(crate) const ELLIPSE: &str = "ellipse";

/// A parsed diagram document.
///
/// The tree borrows the input text; the document is cheap to build and is
/// dropped once extraction finishes.
pub struct SvgDocument<'input> {
    tree: Document<'input>,
    namespace: Option<String>,
    location: String,
}

impl<'input> SvgDocument<'input> {
    /// Parses markup text.
    ///
    /// # Arguments
    ///
    /// * `text` - The raw markup.
    /// * `location` - Where the document came from; only used in messages.
    /// * `root_tag` - Expected local name of the root element. A mismatch is
    ///   logged and parsing continues.
    ///
    /// # Errors
    ///
    /// Returns [`SvgraphError::MalformedDocument`] when the text is not
    /// well-formed XML.
    pub fn parse(
        text: &'input str,
        location: impl Into<String>,
        root_tag: &str,
    ) -> Result<Self, SvgraphError> {
        let location = location.into();
        let body = text.strip_prefix('\u{feff}').unwrap_or(text);

        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let tree = Document::parse_with_options(body, options)
            .map_err(|err| SvgraphError::new_malformed(err, location.as_str(), body))?;

        let root = tree.root_element();
        let namespace = root.tag_name().namespace().map(str::to_string);

        if root.tag_name().name() != root_tag {
            warn!(
                location = location.as_str(),
                expected = root_tag,
                found = root.tag_name().name();
                "Unexpected root element"
            );
        }

        match &namespace {
            Some(uri) => debug!(location = location.as_str(), namespace = uri.as_str(); "Document loaded"),
            None => debug!(location = location.as_str(); "Document loaded without namespace, using unscoped lookups"),
        }

        Ok(Self {
            tree,
            namespace,
            location,
        })
    }

    /// Parses a byte buffer that must hold UTF-8 markup.
    ///
    /// # Errors
    ///
    /// Returns [`SvgraphError::MalformedDocument`] for invalid UTF-8 or
    /// malformed XML.
    pub fn parse_bytes(
        bytes: &'input [u8],
        location: impl Into<String>,
        root_tag: &str,
    ) -> Result<Self, SvgraphError> {
        let location = location.into();
        let text = std::str::from_utf8(bytes).map_err(|err| {
            SvgraphError::new_malformed(err, location.as_str(), String::from_utf8_lossy(bytes))
        })?;
        Self::parse(text, location, root_tag)
    }

    /// Returns the namespace URI of the root element, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the location string supplied at parse time.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the root element.
    pub fn root(&self) -> Node<'_, 'input> {
        self.tree.root_element()
    }

    /// Returns true if `node` is an element named `local` in the document namespace.
    pub fn is(&self, node: Node<'_, '_>, local: &str) -> bool {
        if !node.is_element() || node.tag_name().name() != local {
            return false;
        }
        match &self.namespace {
            Some(uri) => node.tag_name().namespace() == Some(uri.as_str()),
            None => true,
        }
    }

    /// Returns true if `node` matches any of `locals`.
    pub fn is_any(&self, node: Node<'_, '_>, locals: &[&str]) -> bool {
        locals.iter().any(|local| self.is(node, local))
    }

    /// Iterates, in document order, over every element matching one of `locals`.
    pub fn elements<'a>(
        &'a self,
        locals: &'a [&'a str],
    ) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        self.tree
            .root_element()
            .descendants()
            .filter(move |node| self.is_any(*node, locals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG_NS: &str = "http://www.w3.org/2000/svg";

    #[test]
    fn test_parse_reads_namespace() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><text>A</text></svg>"#,
            "a.svg",
            "svg",
        )
        .unwrap();
        assert_eq!(doc.namespace(), Some(SVG_NS));
        assert_eq!(doc.location(), "a.svg");
        assert_eq!(doc.root().tag_name().name(), "svg");
    }

    #[test]
    fn test_parse_without_namespace() {
        let doc = SvgDocument::parse("<svg><text>A</text></svg>", "a.svg", "svg").unwrap();
        assert_eq!(doc.namespace(), None);
        assert_eq!(doc.elements(&[TEXT]).count(), 1);
    }

    #[test]
    fn test_lookups_are_namespace_qualified() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:x="urn:other">
                <text>A</text>
                <x:text>B</x:text>
            </svg>"#,
            "a.svg",
            "svg",
        )
        .unwrap();
        let texts: Vec<_> = doc.elements(&[TEXT]).collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text(), Some("A"));
    }

    #[test]
    fn test_prefixed_root_namespace() {
        let doc = SvgDocument::parse(
            r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:line/><svg:path/></svg:svg>"#,
            "a.svg",
            "svg",
        )
        .unwrap();
        assert_eq!(doc.namespace(), Some(SVG_NS));
        assert_eq!(doc.elements(&[PATH, LINE]).count(), 2);
    }

    #[test]
    fn test_elements_in_document_order() {
        let doc = SvgDocument::parse(
            r#"<svg><line id="1"/><g><path id="2"/></g><line id="3"/></svg>"#,
            "a.svg",
            "svg",
        )
        .unwrap();
        let ids: Vec<_> = doc
            .elements(&[PATH, LINE])
            .filter_map(|n| n.attribute("id"))
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_root_tag_mismatch_is_not_fatal() {
        let doc = SvgDocument::parse("<drawing><text>A</text></drawing>", "a.xml", "svg").unwrap();
        assert_eq!(doc.root().tag_name().name(), "drawing");
    }

    #[test]
    fn test_doctype_allowed() {
        let doc = SvgDocument::parse(
            r#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg"/>"#,
            "a.svg",
            "svg",
        );
        assert!(doc.is_ok());
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let doc = SvgDocument::parse("\u{feff}<svg/>", "a.svg", "svg");
        assert!(doc.is_ok());
    }

    #[test]
    fn test_unterminated_tag_is_malformed() {
        let result = SvgDocument::parse("<svg><rect></svg>", "broken.svg", "svg");
        match result {
            Err(SvgraphError::MalformedDocument { location, src, .. }) => {
                assert_eq!(location, "broken.svg");
                assert_eq!(src, "<svg><rect></svg>");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected malformed document"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let result = SvgDocument::parse_bytes(b"<svg>\xff\xfe</svg>", "bytes.svg", "svg");
        assert!(matches!(
            result,
            Err(SvgraphError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_parse_bytes_valid() {
        let doc = SvgDocument::parse_bytes(b"<svg><text>A</text></svg>", "bytes.svg", "svg").unwrap();
        assert_eq!(doc.elements(&[TEXT]).count(), 1);
    }
}
