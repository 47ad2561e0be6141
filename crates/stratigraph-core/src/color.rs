//! Color handling for stratigraphy diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, so theme colors can be written as any CSS color
//! string and emitted back into SVG attributes.

use std::str::FromStr;

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#3b82f6"`,
    /// `"rgb(245, 158, 11)"` or `"navy"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratigraph_core::color::Color;
    ///
    /// let edge = Color::new("#3b82f6").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// # let _ = edge;
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#f59e0b").is_ok());
        assert!(Color::new("rgb(17, 24, 39)").is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
        assert!(invalid.unwrap_err().contains("not-a-color"));
    }

    #[test]
    fn test_color_alpha_and_eq() {
        let a = Color::new("#eff6ff").unwrap();
        let b = Color::new("#eff6ff").unwrap();
        let c = Color::new("#fff7ed").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!((a.alpha() - 1.0).abs() < 0.001);
        assert!((Color::new("rgba(0, 0, 0, 0.5)").unwrap().alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_to_svg_value() {
        let color = Color::new("#111827").unwrap();
        let value = svg::node::Value::from(&color);
        assert_eq!(value.to_string(), color.to_string());
    }
}
