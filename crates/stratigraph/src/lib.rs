//! Stratigraph - interactive stratigraphic relationship diagrams.
//!
//! A diagram shows one central stratigraphic unit together with the units it
//! is related to: anterior units above it, posterior units below it and
//! synchronous units beside it. Positions come from a force simulation, the
//! result is drawn as SVG onto a [`DrawingSurface`], and pointer input drives
//! zoom, pan, drag and edge selection.
//!
//! # Example
//!
//! ```
//! use stratigraph::{
//!     DrawingSurface, Relationship, Relationships, SimulationState, SurfaceRegistry,
//!     geometry::Size,
//! };
//!
//! let mut surfaces = SurfaceRegistry::new();
//! surfaces.insert(DrawingSurface::new("stratigraphy", Size::new(800.0, 500.0)));
//!
//! let relationships = Relationships {
//!     anterior: Some(vec![Relationship::new("US 23", false, true, "s'appuie contre")]),
//!     ..Relationships::default()
//! };
//!
//! let mut diagram = stratigraph::render(
//!     &surfaces,
//!     "stratigraphy",
//!     "US 100",
//!     Some(&relationships),
//!     Some(Box::new(|link: &stratigraph::Link| println!("{}", link.describe()))),
//! )
//! .expect("surface and relationships are present");
//!
//! assert_eq!(diagram.run_until_settled(1000), SimulationState::Settled);
//! assert!(diagram.surface().borrow().markup().is_some());
//! ```

pub mod config;
pub mod interaction;
pub mod model;
pub mod render;
pub mod simulation;
pub mod surface;
pub mod theme;

mod diagram;
mod error;

pub use stratigraph_core::{color, draw, geometry};

pub use diagram::{DiagramHandle, EdgeSelected};
pub use error::{DiagramError, StratigraphError};
pub use interaction::{ClickOutcome, EventOutcome, PointerEvent, ZoomTransform};
pub use model::{GraphModel, Link, LinkKind, Node, Relationship, Relationships, Zone};
pub use simulation::SimulationState;
pub use surface::{DrawingSurface, SharedSurface, SurfaceRegistry};
pub use theme::{ColorResolver, ColorRole, Theme};

use std::rc::Rc;

use log::{error, info};

use config::AppConfig;
use interaction::InteractionController;
use render::{RenderStyle, Renderer};
use simulation::Simulation;

/// Renders stratigraphy diagrams with a fixed configuration.
///
/// # Examples
///
/// ```
/// use stratigraph::{StratigraphyRenderer, config::AppConfig};
///
/// let renderer = StratigraphyRenderer::new(AppConfig::default()).unwrap();
/// assert_eq!(renderer.config().layout().link_distance(), 140.0);
/// ```
#[derive(Clone)]
pub struct StratigraphyRenderer {
    config: AppConfig,
    colors: Rc<dyn ColorResolver>,
}

impl StratigraphyRenderer {
    /// Creates a renderer coloring diagrams with the configured theme.
    ///
    /// # Errors
    ///
    /// Returns [`StratigraphError::Config`] when a configured color cannot be
    /// parsed or a zoom limit is not a positive number.
    pub fn new(config: AppConfig) -> Result<Self, StratigraphError> {
        config
            .interaction()
            .validate()
            .map_err(StratigraphError::Config)?;
        let theme = config.style().theme().map_err(StratigraphError::Config)?;
        Ok(Self {
            config,
            colors: Rc::new(theme),
        })
    }

    /// Replaces the theme with a host-provided color resolver.
    pub fn with_color_resolver(mut self, colors: impl ColorResolver + 'static) -> Self {
        self.colors = Rc::new(colors);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Renders a diagram for `central_id` onto surface `surface_id`.
    ///
    /// Anything previously drawn on the surface is cleared first. Returns
    /// `None`, after logging the reason, when the surface is unknown or the
    /// relationships are missing; nothing is touched in that case.
    pub fn render(
        &self,
        surfaces: &SurfaceRegistry,
        surface_id: &str,
        central_id: &str,
        relationships: Option<&Relationships>,
        on_edge_selected: Option<EdgeSelected>,
    ) -> Option<DiagramHandle> {
        match self.try_render(
            surfaces,
            surface_id,
            central_id,
            relationships,
            on_edge_selected,
        ) {
            Ok(handle) => Some(handle),
            Err(err) => {
                error!(
                    surface_id = surface_id,
                    central_id = central_id,
                    err:% = err;
                    "Stratigraphy diagram not rendered"
                );
                None
            }
        }
    }

    fn try_render(
        &self,
        surfaces: &SurfaceRegistry,
        surface_id: &str,
        central_id: &str,
        relationships: Option<&Relationships>,
        on_edge_selected: Option<EdgeSelected>,
    ) -> Result<DiagramHandle, DiagramError> {
        let surface = surfaces
            .get(surface_id)
            .ok_or_else(|| DiagramError::SurfaceNotFound {
                surface_id: surface_id.to_string(),
            })?;
        let relationships = relationships.ok_or(DiagramError::MissingRelationships)?;

        let size = {
            let mut surface = surface.borrow_mut();
            surface.clear();
            surface.size_or(self.config.surface().fallback_size())
        };
        let center = size.half_extent();

        info!(
            surface_id = surface_id,
            central_id = central_id,
            relationships = relationships.len();
            "Rendering stratigraphy diagram"
        );

        let model = GraphModel::build(central_id, relationships, center);
        let simulation = Simulation::with_layout_forces(model, self.config.layout(), center);

        let style = RenderStyle::new(self.config.style(), self.colors.as_ref());
        let mut renderer = Renderer::new(surface, size, style, Rc::clone(&self.colors));
        renderer.redraw(simulation.model());

        let controller =
            InteractionController::new(self.config.interaction(), self.config.layout());

        Ok(DiagramHandle::new(
            simulation,
            renderer,
            controller,
            on_edge_selected,
        ))
    }
}

impl Default for StratigraphyRenderer {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            colors: Rc::new(Theme::default()),
        }
    }
}

/// Renders a diagram with the default configuration.
///
/// See [`StratigraphyRenderer::render`].
pub fn render(
    surfaces: &SurfaceRegistry,
    surface_id: &str,
    central_id: &str,
    relationships: Option<&Relationships>,
    on_edge_selected: Option<EdgeSelected>,
) -> Option<DiagramHandle> {
    StratigraphyRenderer::default().render(
        surfaces,
        surface_id,
        central_id,
        relationships,
        on_edge_selected,
    )
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::geometry::{Point, Size};

    const SURFACE: &str = "stratigraphy";

    fn surfaces() -> SurfaceRegistry {
        let mut surfaces = SurfaceRegistry::new();
        surfaces.insert(DrawingSurface::new(SURFACE, Size::new(800.0, 500.0)));
        surfaces
    }

    fn single_anterior() -> Relationships {
        Relationships {
            anterior: Some(vec![Relationship::new(
                "US 23",
                false,
                true,
                "s'appuie contre",
            )]),
            ..Relationships::default()
        }
    }

    #[test]
    fn test_end_to_end_single_relationship() {
        let surfaces = surfaces();
        let mut diagram = render(&surfaces, SURFACE, "US 100", Some(&single_anterior()), None)
            .expect("diagram");

        let ids: Vec<_> = diagram.model().nodes().iter().map(Node::id).collect();
        assert_eq!(ids, vec!["US 100", "US 23"]);

        let links = diagram.model().links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].source(), "US 100");
        assert_eq!(links[0].target(), "US 23");
        assert_eq!(links[0].label(), "s'appuie contre");
        assert_eq!(links[0].kind(), LinkKind::Normal);

        assert_eq!(diagram.run_until_settled(1000), SimulationState::Settled);
        assert_eq!(diagram.node("US 100").unwrap().position(), Point::new(400.0, 250.0));
        assert!(diagram.node("US 23").unwrap().position().y() < 250.0);
    }

    #[test]
    fn test_empty_relationships_render_central_only() {
        let surfaces = surfaces();
        let diagram =
            render(&surfaces, SURFACE, "US 1", Some(&Relationships::default()), None).unwrap();

        assert_eq!(diagram.model().nodes().len(), 1);
        assert!(diagram.model().links().is_empty());
        let markup = diagram.surface().borrow().markup().unwrap();
        assert!(markup.contains("US 1"));
        assert!(!markup.contains("<line"));
    }

    #[test]
    fn test_missing_surface_or_relationships() {
        let surfaces = surfaces();
        assert!(render(&surfaces, "nope", "US 100", Some(&single_anterior()), None).is_none());
        assert!(render(&surfaces, SURFACE, "US 100", None, None).is_none());

        // Aborted renders leave the surface alone.
        let surface = surfaces.get(SURFACE).unwrap();
        assert_eq!(surface.borrow().generation(), 0);
        assert!(surface.borrow().is_empty());
    }

    #[test]
    fn test_surface_without_size_uses_fallback() {
        let mut surfaces = SurfaceRegistry::new();
        surfaces.insert(DrawingSurface::without_size("panel"));

        let diagram = render(&surfaces, "panel", "US 9", Some(&single_anterior()), None).unwrap();
        assert_eq!(diagram.model().central().position(), Point::new(400.0, 250.0));
        assert!(
            diagram
                .surface()
                .borrow()
                .markup()
                .unwrap()
                .contains("viewBox=\"0 0 800 500\"")
        );
    }

    #[test]
    fn test_no_ticks_after_stop() {
        let surfaces = surfaces();
        let mut diagram =
            render(&surfaces, SURFACE, "US 100", Some(&single_anterior()), None).unwrap();

        diagram.tick();
        diagram.stop();
        let frames = diagram.frames();

        assert_eq!(diagram.tick(), SimulationState::Stopped);
        assert_eq!(diagram.run_until_settled(100), SimulationState::Stopped);
        assert_eq!(diagram.frames(), frames);
        assert_eq!(diagram.ticks(), 1);
    }

    #[test]
    fn test_drag_scenario() {
        let surfaces = surfaces();
        let mut diagram =
            render(&surfaces, SURFACE, "US 100", Some(&single_anterior()), None).unwrap();
        diagram.run_until_settled(50);

        assert!(diagram.drag_node_to("US 23", Point::new(300.0, 300.0)));
        assert_eq!(
            diagram.node("US 23").unwrap().pinned(),
            Some(Point::new(300.0, 300.0))
        );

        diagram.run_until_settled(1000);
        let node = diagram.node("US 23").unwrap();
        assert_eq!(node.position(), Point::new(300.0, 300.0));
        assert_eq!(node.pinned(), Some(Point::new(300.0, 300.0)));

        assert!(!diagram.drag_node_to("US 100", Point::new(0.0, 0.0)));
        assert!(!diagram.drag_node_to("US 404", Point::new(0.0, 0.0)));
        assert_eq!(
            diagram.model().central().position(),
            Point::new(400.0, 250.0)
        );
    }

    #[test]
    fn test_edge_click_invokes_callback() {
        let surfaces = surfaces();
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);

        let mut diagram = render(
            &surfaces,
            SURFACE,
            "US 100",
            Some(&single_anterior()),
            Some(Box::new(move |link: &Link| {
                sink.borrow_mut().push(link.describe());
            })),
        )
        .unwrap();
        diagram.run_until_settled(1000);

        // Put the edge somewhere predictable: straight down from the center.
        assert!(diagram.drag_node_to("US 23", Point::new(400.0, 450.0)));

        let outcome = diagram.handle_event(PointerEvent::Click {
            at: Point::new(400.0, 340.0),
        });
        assert_eq!(outcome, EventOutcome::Clicked(ClickOutcome::Edge(0)));
        assert_eq!(
            selected.borrow().as_slice(),
            ["US 100 s'appuie contre US 23".to_string()]
        );
        assert_eq!(diagram.selected_link().unwrap().title(), "Relation: US 23");

        // Node clicks do not select anything.
        let outcome = diagram.handle_event(PointerEvent::Click {
            at: Point::new(400.0, 250.0),
        });
        assert_eq!(outcome, EventOutcome::Clicked(ClickOutcome::Node(0)));
        assert_eq!(selected.borrow().len(), 1);
    }

    #[test]
    fn test_rerender_clears_previous_diagram() {
        let surfaces = surfaces();
        let mut first =
            render(&surfaces, SURFACE, "US 100", Some(&single_anterior()), None).unwrap();
        first.tick();

        let relationships = Relationships {
            posterior: Some(vec![Relationship::new("US 12", false, false, "sous")]),
            ..Relationships::default()
        };
        let mut second = render(&surfaces, SURFACE, "US 200", Some(&relationships), None).unwrap();
        first.stop();

        second.run_until_settled(1000);
        first.tick();

        let markup = surfaces.get(SURFACE).unwrap().borrow().markup().unwrap();
        assert!(markup.contains("US 200"));
        assert!(!markup.contains("US 100"));
        assert_eq!(markup.matches("<marker").count(), 1);
    }

    #[test]
    fn test_stale_diagram_does_not_draw() {
        let surfaces = surfaces();
        let mut first =
            render(&surfaces, SURFACE, "US 100", Some(&single_anterior()), None).unwrap();
        let _second = render(
            &surfaces,
            SURFACE,
            "US 200",
            Some(&Relationships::default()),
            None,
        )
        .unwrap();

        // The host forgot to stop the first diagram.
        let frames = first.frames();
        first.tick();
        assert_eq!(first.frames(), frames);

        let markup = surfaces.get(SURFACE).unwrap().borrow().markup().unwrap();
        assert!(!markup.contains("US 100"));
    }

    #[test]
    fn test_zoom_and_pan() {
        let surfaces = surfaces();
        let mut diagram =
            render(&surfaces, SURFACE, "US 100", Some(&single_anterior()), None).unwrap();

        diagram.zoom_by(2.0, Point::new(400.0, 250.0));
        diagram.pan_by(Point::new(10.0, -5.0));

        let transform = diagram.transform();
        assert_approx_eq!(f32, transform.k(), 2.0);
        assert_approx_eq!(f32, transform.x(), -390.0);
        assert_approx_eq!(f32, transform.y(), -255.0);

        let markup = diagram.surface().borrow().markup().unwrap();
        assert!(markup.contains("translate(-390,-255) scale(2)"));
    }

    #[test]
    fn test_invalid_theme_is_rejected() {
        let config: AppConfig =
            serde_json::from_str(r#"{"style": {"node_fill": "definitely-not-a-color"}}"#).unwrap();
        assert!(matches!(
            StratigraphyRenderer::new(config),
            Err(StratigraphError::Config(_))
        ));
    }

    #[test]
    fn test_zero_min_scale_is_rejected() {
        let config: AppConfig =
            serde_json::from_str(r#"{"interaction": {"min_scale": 0.0}}"#).unwrap();
        assert!(matches!(
            StratigraphyRenderer::new(config),
            Err(StratigraphError::Config(_))
        ));
    }

    #[test]
    fn test_custom_color_resolver() {
        let surfaces = surfaces();
        let marker = color::Color::new("rebeccapurple").unwrap();
        let renderer = StratigraphyRenderer::default().with_color_resolver(move |_: ColorRole| marker);

        let diagram = renderer
            .render(&surfaces, SURFACE, "US 100", Some(&single_anterior()), None)
            .unwrap();
        let markup = diagram.surface().borrow().markup().unwrap();
        assert!(markup.contains(&format!("fill=\"{marker}\"")));
    }
}
