//! Stratigraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the stratigraphy
//! diagram renderer. It includes:
//!
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: Points, sizes and bounds in diagram space ([`geometry`] module)
//! - **Draw**: Stroke definitions, layered SVG output and text metrics ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
