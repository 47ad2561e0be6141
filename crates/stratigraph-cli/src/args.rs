//! Command-line argument definitions for the stratigraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity and how long the layout may run.

use clap::Parser;

/// Command-line arguments for the stratigraphy diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON relationships document
    #[arg(help = "Path to the input JSON file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Upper bound on simulation steps before the SVG is written
    #[arg(long, default_value_t = 1000)]
    pub max_ticks: usize,
}
