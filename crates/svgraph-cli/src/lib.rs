//! svgraph CLI library
//!
//! This module contains the core CLI logic for the svgraph extractor.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, STDIO};
pub use error_adapter::ErrorAdapter;

use std::{
    fs,
    io::{self, Read, Write},
};

use log::info;

use svgraph::{GraphExtractor, SvgraphError, graph::Graph};

/// Run the svgraph CLI application
///
/// Reads the input document, extracts its graph and writes the graph as
/// JSON to the output file (or standard output).
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SvgraphError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input documents
pub fn run(args: &Args) -> Result<(), SvgraphError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = read_input(&args.input)?;

    let extractor = GraphExtractor::new(app_config.extract().clone());
    let graph = extractor.extract_bytes(&source, location(&args.input))?;
    let json = to_json(&graph, app_config.output().pretty())?;

    match args.output.as_deref() {
        Some(path) if path != STDIO => {
            fs::write(path, json)?;
            info!(output_file = path; "Graph exported successfully");
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn read_input(input: &str) -> Result<Vec<u8>, SvgraphError> {
    if input == STDIO {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    Ok(fs::read(input)?)
}

fn location(input: &str) -> &str {
    if input == STDIO { "<stdin>" } else { input }
}

fn to_json(graph: &Graph, pretty: bool) -> Result<String, SvgraphError> {
    let mut json = if pretty {
        serde_json::to_string_pretty(graph)
    } else {
        serde_json::to_string(graph)
    }
    .map_err(io::Error::from)?;
    json.push('\n');
    Ok(json)
}
