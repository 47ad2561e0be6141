//! CLI logic for the stratigraphy diagram renderer.
//!
//! The CLI reads a relationships document, lays the diagram out on an
//! in-memory drawing surface and writes the settled frame as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};
use serde::Deserialize;

use stratigraph::{
    DrawingSurface, Relationships, SimulationState, StratigraphError, StratigraphyRenderer,
    SurfaceRegistry,
};

/// Surface the CLI renders onto.
const SURFACE_ID: &str = "stratigraph";

/// The JSON document read by the CLI.
///
/// `relationships` may be absent or `null`; the render is then aborted.
#[derive(Debug, Deserialize)]
pub struct InputDocument {
    pub central: String,
    #[serde(default)]
    pub relationships: Option<Relationships>,
}

/// Parses an input document, keeping the source for error reports.
///
/// # Errors
///
/// Returns [`StratigraphError::Input`] when `source` is not a valid document.
pub fn parse_input(source: &str) -> Result<InputDocument, StratigraphError> {
    serde_json::from_str(source).map_err(|err| StratigraphError::new_input_error(err, source))
}

/// Run the stratigraph CLI application
///
/// # Errors
///
/// Returns `StratigraphError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input documents
/// - Aborted renders (missing relationships)
pub fn run(args: &Args) -> Result<(), StratigraphError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let renderer = StratigraphyRenderer::new(app_config)?;

    let source = fs::read_to_string(&args.input)?;
    let document = parse_input(&source)?;

    // Unsized, so the configured fallback size applies.
    let mut surfaces = SurfaceRegistry::new();
    surfaces.insert(DrawingSurface::without_size(SURFACE_ID));

    let mut diagram = renderer
        .render(
            &surfaces,
            SURFACE_ID,
            &document.central,
            document.relationships.as_ref(),
            None,
        )
        .ok_or_else(|| StratigraphError::Export("no diagram rendered".to_string()))?;

    let state = diagram.run_until_settled(args.max_ticks);
    if state == SimulationState::Running {
        warn!(max_ticks = args.max_ticks, alpha = diagram.alpha(); "Layout did not settle");
    }
    info!(ticks = diagram.ticks(), state:?; "Layout finished");

    let svg = diagram
        .surface()
        .borrow()
        .markup()
        .ok_or_else(|| StratigraphError::Export("surface holds no drawing".to_string()))?;
    diagram.stop();

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
