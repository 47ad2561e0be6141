//! Semantic color roles and their resolution.
//!
//! The renderer never hardcodes a color: every stroke and fill goes through a
//! [`ColorResolver`]. [`Theme`] is the configured resolver, and any closure
//! `Fn(ColorRole) -> Color` can stand in for it when the host derives colors
//! from its own style state.

use std::fmt;

use crate::color::Color;

/// What a color is used for in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    NormalEdge,
    UncertainEdge,
    ArrowHead,
    MainNodeFill,
    NodeFill,
    UncertainNodeFill,
    NodeStroke,
    UncertainNodeStroke,
    Label,
}

impl ColorRole {
    pub const ALL: [ColorRole; 9] = [
        ColorRole::NormalEdge,
        ColorRole::UncertainEdge,
        ColorRole::ArrowHead,
        ColorRole::MainNodeFill,
        ColorRole::NodeFill,
        ColorRole::UncertainNodeFill,
        ColorRole::NodeStroke,
        ColorRole::UncertainNodeStroke,
        ColorRole::Label,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::NormalEdge => "edge",
            Self::UncertainEdge => "uncertain edge",
            Self::ArrowHead => "arrow",
            Self::MainNodeFill => "main node fill",
            Self::NodeFill => "node fill",
            Self::UncertainNodeFill => "uncertain node fill",
            Self::NodeStroke => "node stroke",
            Self::UncertainNodeStroke => "uncertain node stroke",
            Self::Label => "label",
        }
    }

    /// CSS color of the built-in palette.
    fn default_css(self) -> &'static str {
        match self {
            Self::NormalEdge | Self::ArrowHead | Self::NodeStroke => "#3b82f6",
            Self::UncertainEdge | Self::UncertainNodeStroke => "#f59e0b",
            Self::MainNodeFill => "#f8fafc",
            Self::NodeFill => "#eff6ff",
            Self::UncertainNodeFill => "#fff7ed",
            Self::Label => "#111827",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps semantic roles to concrete colors.
pub trait ColorResolver {
    fn resolve(&self, role: ColorRole) -> Color;
}

impl<F> ColorResolver for F
where
    F: Fn(ColorRole) -> Color,
{
    fn resolve(&self, role: ColorRole) -> Color {
        self(role)
    }
}

/// A complete palette, one color per role.
///
/// # Examples
///
/// ```
/// # use stratigraph::color::Color;
/// # use stratigraph::theme::{ColorResolver, ColorRole, Theme};
/// let mut theme = Theme::default();
/// theme.set(ColorRole::NormalEdge, Color::new("navy").unwrap());
///
/// assert_eq!(theme.resolve(ColorRole::NormalEdge), Color::new("navy").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    colors: [Color; 9],
}

impl Theme {
    pub fn get(&self, role: ColorRole) -> Color {
        self.colors[role.index()]
    }

    pub fn set(&mut self, role: ColorRole, color: Color) {
        self.colors[role.index()] = color;
    }
}

impl Default for Theme {
    fn default() -> Self {
        let colors = ColorRole::ALL.map(|role| {
            // The built-in palette is made of literal hex colors.
            Color::new(role.default_css()).unwrap_or_default()
        });
        Self { colors }
    }
}

impl ColorResolver for Theme {
    fn resolve(&self, role: ColorRole) -> Color {
        self.get(role)
    }
}
