//! Command-line argument definitions for the svgraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output locations, configuration
//! file selection, and logging verbosity.

use clap::Parser;

/// Path value that stands for the standard streams.
pub const STDIO: &str = "-";

/// Command-line arguments for the svgraph extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input SVG file, or `-` for standard input
    #[arg(help = "Path to the input file (`-` reads standard input)")]
    pub input: String,

    /// Path to the output JSON file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
