//! Error types for svgraph operations.
//!
//! [`SvgraphError`] is the only error a caller ever sees: the document could
//! not be read or is not well-formed markup. Problems with individual
//! elements are reported as [`GeometryError`] internally, logged, and the
//! element is skipped.

use std::{io, str::Utf8Error};

use thiserror::Error;

/// The main error type for svgraph operations.
///
/// # Diagnostic Variants
///
/// `MalformedDocument` keeps the source text so front ends can point at the
/// offending position (see [`MalformedCause::offset`]).
#[derive(Debug, Error)]
pub enum SvgraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed document `{location}`: {cause}")]
    MalformedDocument {
        cause: MalformedCause,
        location: String,
        src: String,
    },
}

impl SvgraphError {
    /// Create a new `MalformedDocument` error with the associated source text.
    pub fn new_malformed(
        cause: impl Into<MalformedCause>,
        location: impl Into<String>,
        src: impl Into<String>,
    ) -> Self {
        Self::MalformedDocument {
            cause: cause.into(),
            location: location.into(),
            src: src.into(),
        }
    }
}

/// Why a document was rejected by the loader.
#[derive(Debug, Error)]
pub enum MalformedCause {
    #[error("{0}")]
    Xml(#[from] roxmltree::Error),

    #[error("invalid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),
}

impl MalformedCause {
    /// Byte offset into `src` at which the failure was detected.
    ///
    /// For encoding failures `src` is the lossy decoding of the input; its
    /// valid prefix is byte-identical to the input, so the offset holds.
    pub fn offset(&self, src: &str) -> Option<usize> {
        match self {
            Self::Xml(err) => {
                let pos = err.pos();
                text_pos_to_offset(src, pos.row, pos.col)
            }
            Self::Encoding(err) => Some(err.valid_up_to().min(src.len())),
        }
    }
}

/// Converts a 1-based row/column (columns counted in chars) into a byte offset.
fn text_pos_to_offset(src: &str, row: u32, col: u32) -> Option<usize> {
    let line_start = match row {
        0 | 1 => 0,
        row => src.match_indices('\n').nth(row as usize - 2)?.0 + 1,
    };
    let line_end = src[line_start..]
        .find('\n')
        .map_or(src.len(), |idx| line_start + idx);

    let column = src[line_start..line_end]
        .char_indices()
        .nth(col.saturating_sub(1) as usize)
        .map_or(line_end, |(idx, _)| line_start + idx);

    Some(column)
}

/// A per-element geometry problem.
///
/// These never abort extraction; the element is skipped (or, for node
/// anchors, replaced by the text position).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("missing `{0}` attribute")]
    MissingAttribute(&'static str),

    #[error("invalid number `{value}` in `{attribute}` attribute")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
    },

    #[error("invalid path data: {0}")]
    InvalidPathData(String),

    #[error("path data does not start with a move-to command")]
    NoMoveTo,

    #[error("element is not a supported shape")]
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_pos_first_line() {
        assert_eq!(text_pos_to_offset("<svg>", 1, 1), Some(0));
        assert_eq!(text_pos_to_offset("<svg>", 1, 3), Some(2));
    }

    #[test]
    fn test_text_pos_later_line() {
        let src = "<svg>\n  <rect>\n</svg>";
        assert_eq!(text_pos_to_offset(src, 2, 3), Some(8));
        assert_eq!(text_pos_to_offset(src, 3, 1), Some(15));
    }

    #[test]
    fn test_text_pos_clamps_to_line_end() {
        let src = "ab\ncd";
        assert_eq!(text_pos_to_offset(src, 1, 40), Some(2));
        assert_eq!(text_pos_to_offset(src, 2, 40), Some(5));
    }

    #[test]
    fn test_text_pos_missing_row() {
        assert_eq!(text_pos_to_offset("one line", 4, 1), None);
    }

    #[test]
    fn test_text_pos_counts_chars() {
        let src = "é<x";
        assert_eq!(text_pos_to_offset(src, 1, 2), Some(2));
    }

    #[test]
    fn test_malformed_xml_display() {
        let xml_err = roxmltree::Document::parse("<svg>").unwrap_err();
        let err = SvgraphError::new_malformed(xml_err, "diagram.svg", "<svg>");
        let message = err.to_string();
        assert!(message.starts_with("Malformed document `diagram.svg`:"), "{message}");
    }

    #[test]
    fn test_encoding_offset() {
        let bytes = b"<svg>\xff</svg>";
        let utf8_err = std::str::from_utf8(bytes).unwrap_err();
        let src = String::from_utf8_lossy(bytes);
        let cause = MalformedCause::from(utf8_err);
        assert_eq!(cause.offset(&src), Some(5));
    }
}
