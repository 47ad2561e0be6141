//! Configuration types for stratigraphy diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out, styled and interacted with. All types implement
//! [`serde::Deserialize`] with every field defaulted, so a partial file only
//! overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`LayoutConfig`] - Force simulation constants.
//! - [`StyleConfig`] - Palette overrides, node geometry and font sizes.
//! - [`InteractionConfig`] - Zoom limits and hit-test tolerances.
//! - [`SurfaceConfig`] - Fallback drawing-surface size.
//!
//! # Example
//!
//! ```
//! # use stratigraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().link_distance(), 140.0);
//! assert!(config.style().theme().is_ok());
//! ```

use serde::Deserialize;

use crate::{
    color::Color,
    geometry::Size,
    theme::{ColorRole, Theme},
};

/// Top-level configuration combining layout, style, interaction and surface settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    interaction: InteractionConfig,

    #[serde(default)]
    surface: SurfaceConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        layout: LayoutConfig,
        style: StyleConfig,
        interaction: InteractionConfig,
        surface: SurfaceConfig,
    ) -> Self {
        Self {
            layout,
            style,
            interaction,
            surface,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn interaction(&self) -> &InteractionConfig {
        &self.interaction
    }

    pub fn surface(&self) -> &SurfaceConfig {
        &self.surface
    }
}

/// Force simulation constants.
///
/// The defaults give a layout where anterior units settle above the central
/// unit, posterior units below it and synchronous units to either side.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Target separation of linked nodes.
    link_distance: f32,
    link_strength: f32,
    /// Pairwise repulsion; negative values repel.
    charge_strength: f32,
    /// Collision radius of a single node; two nodes keep twice this apart.
    collision_radius: f32,
    /// Vertical distance of the anterior/posterior targets from the center.
    zone_offset_y: f32,
    /// Horizontal distance of the synchronous targets from the center.
    zone_offset_x: f32,
    zone_strength_y: f32,
    central_strength_y: f32,
    zone_strength_x: f32,
    alpha_decay: f32,
    alpha_min: f32,
    velocity_decay: f32,
    /// Alpha target applied while a node is being dragged.
    drag_alpha_target: f32,
    /// Radius scale of the initial phyllotaxis placement.
    initial_radius: f32,
    /// Seed of the jitter that separates coincident nodes.
    seed: u64,
}

impl LayoutConfig {
    pub fn link_distance(&self) -> f32 {
        self.link_distance
    }

    pub fn link_strength(&self) -> f32 {
        self.link_strength
    }

    pub fn charge_strength(&self) -> f32 {
        self.charge_strength
    }

    pub fn collision_radius(&self) -> f32 {
        self.collision_radius
    }

    pub fn zone_offset_y(&self) -> f32 {
        self.zone_offset_y
    }

    pub fn zone_offset_x(&self) -> f32 {
        self.zone_offset_x
    }

    pub fn zone_strength_y(&self) -> f32 {
        self.zone_strength_y
    }

    pub fn central_strength_y(&self) -> f32 {
        self.central_strength_y
    }

    pub fn zone_strength_x(&self) -> f32 {
        self.zone_strength_x
    }

    pub fn alpha_decay(&self) -> f32 {
        self.alpha_decay
    }

    pub fn alpha_min(&self) -> f32 {
        self.alpha_min
    }

    pub fn velocity_decay(&self) -> f32 {
        self.velocity_decay
    }

    pub fn drag_alpha_target(&self) -> f32 {
        self.drag_alpha_target
    }

    pub fn initial_radius(&self) -> f32 {
        self.initial_radius
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            link_distance: 140.0,
            link_strength: 0.7,
            charge_strength: -180.0,
            collision_radius: 45.0,
            zone_offset_y: 150.0,
            zone_offset_x: 200.0,
            zone_strength_y: 0.6,
            central_strength_y: 1.0,
            zone_strength_x: 0.4,
            // Reaches alpha_min from 1.0 in 300 ticks.
            alpha_decay: 1.0 - 0.001_f32.powf(1.0 / 300.0),
            alpha_min: 0.001,
            velocity_decay: 0.4,
            drag_alpha_target: 0.3,
            initial_radius: 10.0,
            seed: 1,
        }
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Color fields are CSS color strings; unset roles use the built-in palette.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    edge_color: Option<String>,
    uncertain_edge_color: Option<String>,
    arrow_color: Option<String>,
    main_node_fill: Option<String>,
    node_fill: Option<String>,
    uncertain_node_fill: Option<String>,
    node_stroke: Option<String>,
    uncertain_node_stroke: Option<String>,
    label_color: Option<String>,

    node_width: f32,
    node_height: f32,
    corner_radius: f32,
    /// Distance an edge label is lifted above the edge midpoint.
    label_offset: f32,
    edge_label_font_size: u16,
    node_label_font_size: u16,
    font_family: String,
}

impl StyleConfig {
    /// Builds the [`Theme`] from the default palette and any configured overrides.
    ///
    /// # Errors
    ///
    /// Returns an error naming the role whose color string cannot be parsed.
    pub fn theme(&self) -> Result<Theme, String> {
        let overrides = [
            (ColorRole::NormalEdge, &self.edge_color),
            (ColorRole::UncertainEdge, &self.uncertain_edge_color),
            (ColorRole::ArrowHead, &self.arrow_color),
            (ColorRole::MainNodeFill, &self.main_node_fill),
            (ColorRole::NodeFill, &self.node_fill),
            (ColorRole::UncertainNodeFill, &self.uncertain_node_fill),
            (ColorRole::NodeStroke, &self.node_stroke),
            (ColorRole::UncertainNodeStroke, &self.uncertain_node_stroke),
            (ColorRole::Label, &self.label_color),
        ];

        let mut theme = Theme::default();
        for (role, value) in overrides {
            if let Some(value) = value {
                let color = Color::new(value)
                    .map_err(|err| format!("Invalid {role} color in config: {err}"))?;
                theme.set(role, color);
            }
        }
        Ok(theme)
    }

    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }

    pub fn edge_label_font_size(&self) -> u16 {
        self.edge_label_font_size
    }

    pub fn node_label_font_size(&self) -> u16 {
        self.node_label_font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            edge_color: None,
            uncertain_edge_color: None,
            arrow_color: None,
            main_node_fill: None,
            node_fill: None,
            uncertain_node_fill: None,
            node_stroke: None,
            uncertain_node_stroke: None,
            label_color: None,
            node_width: 90.0,
            node_height: 40.0,
            corner_radius: 10.0,
            label_offset: 10.0,
            edge_label_font_size: 12,
            node_label_font_size: 14,
            font_family: "sans-serif".to_string(),
        }
    }
}

/// Zoom limits and pointer tolerances.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    min_scale: f32,
    max_scale: f32,
    /// Maximum distance, in content units, at which a click still hits an edge line.
    link_hit_tolerance: f32,
    wheel_sensitivity: f32,
}

impl InteractionConfig {
    /// Checks that zoom limits and tolerances are usable numbers.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first setting that is non-finite or not
    /// strictly positive.
    pub fn validate(&self) -> Result<(), String> {
        let settings = [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("link_hit_tolerance", self.link_hit_tolerance),
            ("wheel_sensitivity", self.wheel_sensitivity),
        ];
        for (name, value) in settings {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!(
                    "Invalid interaction.{name} in config: {value} must be a positive number"
                ));
            }
        }
        Ok(())
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    pub fn link_hit_tolerance(&self) -> f32 {
        self.link_hit_tolerance
    }

    pub fn wheel_sensitivity(&self) -> f32 {
        self.wheel_sensitivity
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 3.0,
            link_hit_tolerance: 6.0,
            wheel_sensitivity: 0.002,
        }
    }
}

/// Drawing-surface settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    fallback_width: f32,
    fallback_height: f32,
}

impl SurfaceConfig {
    /// Size used when a surface does not report its client size.
    pub fn fallback_size(&self) -> Size {
        Size::new(self.fallback_width, self.fallback_height)
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            fallback_width: 800.0,
            fallback_height: 500.0,
        }
    }
}
