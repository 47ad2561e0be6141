//! Stroke and line-style definitions.
//!
//! A [`StrokeDefinition`] bundles color, width and dash pattern. The
//! [`apply_stroke!`](crate::apply_stroke!) macro writes all of them onto an
//! SVG element in one go.
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#3b82f6"`, `1` |
//! | `width` | `stroke-width` | `2` |
//! | `style` | `stroke-dasharray` | `"6,4"` |

use crate::color::Color;

/// Dash pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    /// Continuous line (default)
    #[default]
    Solid,
    /// Dashed line: 6px dash, 4px gap
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
        }
    }
}

/// A stroke definition for edges and node borders.
///
/// # Examples
///
/// ```
/// use stratigraph_core::color::Color;
/// use stratigraph_core::draw::{StrokeDefinition, StrokeStyle};
///
/// let normal = StrokeDefinition::solid(Color::new("#3b82f6").unwrap(), 2.0);
/// let uncertain = StrokeDefinition::dashed(Color::new("#f59e0b").unwrap(), 2.0);
///
/// assert_eq!(normal.style(), StrokeStyle::Solid);
/// assert_eq!(uncertain.style().to_svg_value(), Some("6,4"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a solid stroke (convenience constructor).
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke (convenience constructor).
    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Dashed,
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets `stroke`, `stroke-opacity` and `stroke-width`, plus
/// `stroke-dasharray` when the style is not solid.
///
/// # Examples
///
/// ```
/// use stratigraph_core::color::Color;
/// use stratigraph_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::dashed(Color::new("#f59e0b").unwrap(), 2.0);
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("y1", 0)
///     .set("x2", 10)
///     .set("y2", 10);
///
/// let line = stratigraph_core::apply_stroke!(line, &stroke);
/// assert!(line.to_string().contains("stroke-dasharray=\"6,4\""));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
