//! Visual definitions used when turning a diagram into SVG.
//!
//! - [`StrokeDefinition`] / [`StrokeStyle`] describe edge and border lines.
//! - [`RenderLayer`] / [`LayeredOutput`] keep edges painted beneath nodes.
//! - [`TextDefinition`] styles labels and measures them for hit testing.

mod layer;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::TextDefinition;
