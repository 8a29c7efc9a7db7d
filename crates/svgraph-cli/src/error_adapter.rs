//! Error adapter for converting SvgraphError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Malformed
//! documents carry their source text, so the report points at the position
//! where reading stopped.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, SourceSpan};

use svgraph::{MalformedCause, SvgraphError};

/// Adapter that renders a [`SvgraphError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a SvgraphError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl Diagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            SvgraphError::Io(_) => "svgraph::io",
            SvgraphError::MalformedDocument { .. } => "svgraph::malformed",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            SvgraphError::Io(_) => return None,
            SvgraphError::MalformedDocument {
                cause: MalformedCause::Xml(_),
                ..
            } => "the input must be well-formed XML",
            SvgraphError::MalformedDocument {
                cause: MalformedCause::Encoding(_),
                ..
            } => "the input must be UTF-8 encoded",
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self.0 {
            SvgraphError::MalformedDocument { src, .. } => Some(src as &dyn miette::SourceCode),
            SvgraphError::Io(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let SvgraphError::MalformedDocument { cause, src, .. } = self.0 else {
            return None;
        };
        let offset = cause.offset(src)?;
        let label = LabeledSpan::new_primary_with_span(
            Some("reading stopped here".to_string()),
            SourceSpan::new(offset.into(), 0),
        );
        Some(Box::new(std::iter::once(label)))
    }
}
