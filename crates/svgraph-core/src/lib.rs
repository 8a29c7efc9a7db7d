//! svgraph Core Types
//!
//! This crate provides the value types shared by the svgraph extractor and
//! its front ends. It includes:
//!
//! - **Geometry**: Points, sizes and bounding boxes ([`geometry`] module)
//! - **Graph**: The extracted node/edge model ([`graph`] module)
//! - **Identifiers**: Label normalization and fallback tokens ([`identifier`] module)

pub mod geometry;
pub mod graph;
pub mod identifier;
