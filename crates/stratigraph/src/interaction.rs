//! Pointer handling: drag, pan, wheel zoom and click selection.
//!
//! Events arrive in surface coordinates and are mapped into content
//! coordinates through the current [`ZoomTransform`] before hit testing.
//!
//! # Gestures
//!
//! - Pressing on a non-central node starts a drag. The simulation target
//!   energy is raised so the layout reacts, and the node is pinned under the
//!   pointer. Releasing lowers the target again but keeps the pin.
//! - Pressing anywhere else starts a pan of the whole viewport.
//! - The wheel zooms around the pointer within the configured scale extent.
//!
//! # Clicks
//!
//! Clicks resolve to the topmost element. Edge clicks are consumed by the
//! edge and never reach node or surface handlers; node clicks bubble up.

mod zoom;

pub use zoom::{ScaleExtent, ZoomTransform};

use log::debug;

use crate::{
    config::{InteractionConfig, LayoutConfig},
    geometry::Point,
    render::{Hit, Renderer},
    simulation::Simulation,
};

/// Pointer input in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { at: Point },
    Move { at: Point },
    Up { at: Point },
    /// Positive `delta_y` zooms out.
    Wheel { at: Point, delta_y: f32 },
    Click { at: Point },
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Link at this index; the host selection callback runs.
    Edge(usize),
    /// Node at this index.
    Node(usize),
    Surface,
}

impl ClickOutcome {
    /// Whether the click continues to surface-level handlers.
    pub fn propagates(self) -> bool {
        !matches!(self, Self::Edge(_))
    }
}

/// Effect of a handled [`PointerEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    DragStarted(usize),
    Dragged(usize),
    DragEnded(usize),
    PanStarted,
    Panned,
    PanEnded,
    Zoomed,
    Clicked(ClickOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    /// `offset` is the node center relative to the grab point.
    Drag { index: usize, offset: Point },
    Pan { last: Point },
}

/// Pointer state machine of one diagram.
#[derive(Debug, Clone)]
pub struct InteractionController {
    gesture: Gesture,
    extent: ScaleExtent,
    link_hit_tolerance: f32,
    wheel_sensitivity: f32,
    drag_alpha_target: f32,
}

impl InteractionController {
    pub fn new(interaction: &InteractionConfig, layout: &LayoutConfig) -> Self {
        Self {
            gesture: Gesture::Idle,
            extent: ScaleExtent::new(interaction.min_scale(), interaction.max_scale()),
            link_hit_tolerance: interaction.link_hit_tolerance(),
            wheel_sensitivity: interaction.wheel_sensitivity(),
            drag_alpha_target: layout.drag_alpha_target(),
        }
    }

    pub fn extent(&self) -> ScaleExtent {
        self.extent
    }

    /// Index of the node being dragged, if any.
    pub fn dragging(&self) -> Option<usize> {
        match self.gesture {
            Gesture::Drag { index, .. } => Some(index),
            _ => None,
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.gesture, Gesture::Pan { .. })
    }

    /// Finds what lies under surface point `at`.
    pub fn hit_test(&self, renderer: &Renderer, at: Point) -> Option<Hit> {
        let content = renderer.transform().invert(at);
        renderer.scene().hit_test(content, self.link_hit_tolerance)
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        simulation: &mut Simulation,
        renderer: &mut Renderer,
    ) -> EventOutcome {
        match event {
            PointerEvent::Down { at } => self.pointer_down(at, simulation, renderer),
            PointerEvent::Move { at } => self.pointer_move(at, simulation, renderer),
            PointerEvent::Up { at } => self.pointer_up(at, simulation, renderer),
            PointerEvent::Wheel { at, delta_y } => {
                let factor = 2.0_f32.powf(-delta_y * self.wheel_sensitivity);
                self.zoom_by(factor, at, simulation, renderer);
                EventOutcome::Zoomed
            }
            PointerEvent::Click { at } => {
                EventOutcome::Clicked(self.click(at, simulation, renderer))
            }
        }
    }

    fn pointer_down(
        &mut self,
        at: Point,
        simulation: &mut Simulation,
        renderer: &mut Renderer,
    ) -> EventOutcome {
        if let Some(Hit::Node(index)) = self.hit_test(renderer, at) {
            let content = renderer.transform().invert(at);
            if self.start_drag(index, content, simulation, renderer) {
                return EventOutcome::DragStarted(index);
            }
        }

        self.gesture = Gesture::Pan { last: at };
        EventOutcome::PanStarted
    }

    fn pointer_move(
        &mut self,
        at: Point,
        simulation: &mut Simulation,
        renderer: &mut Renderer,
    ) -> EventOutcome {
        match self.gesture {
            Gesture::Idle => EventOutcome::Ignored,
            Gesture::Drag { index, .. } => {
                let content = renderer.transform().invert(at);
                self.drag_to(content, simulation, renderer);
                EventOutcome::Dragged(index)
            }
            Gesture::Pan { last } => {
                self.gesture = Gesture::Pan { last: at };
                self.pan_by(at.sub_point(last), simulation, renderer);
                EventOutcome::Panned
            }
        }
    }

    fn pointer_up(
        &mut self,
        at: Point,
        simulation: &mut Simulation,
        renderer: &mut Renderer,
    ) -> EventOutcome {
        match self.gesture {
            Gesture::Idle => EventOutcome::Ignored,
            Gesture::Drag { index, .. } => {
                let content = renderer.transform().invert(at);
                self.drag_to(content, simulation, renderer);
                self.end_drag(simulation);
                EventOutcome::DragEnded(index)
            }
            Gesture::Pan { last } => {
                self.pan_by(at.sub_point(last), simulation, renderer);
                self.gesture = Gesture::Idle;
                EventOutcome::PanEnded
            }
        }
    }

    fn click(&self, at: Point, simulation: &Simulation, renderer: &Renderer) -> ClickOutcome {
        match self.hit_test(renderer, at) {
            Some(Hit::EdgeLabel(index) | Hit::EdgeLine(index)) => ClickOutcome::Edge(index),
            Some(Hit::Node(index)) => {
                if let Some(node) = simulation.model().nodes().get(index) {
                    debug!(node_id = node.id(), zone = node.zone().name(); "Node clicked");
                }
                ClickOutcome::Node(index)
            }
            None => ClickOutcome::Surface,
        }
    }

    /// Starts dragging node `index` grabbed at content point `grab`.
    ///
    /// Returns false for the central node, which is not draggable.
    pub fn start_drag(
        &mut self,
        index: usize,
        grab: Point,
        simulation: &mut Simulation,
        renderer: &mut Renderer,
    ) -> bool {
        let Some(node) = simulation.model().nodes().get(index) else {
            return false;
        };
        if node.is_main() {
            return false;
        }

        let position = node.position();
        debug!(node_id = node.id(); "Drag started");

        self.gesture = Gesture::Drag {
            index,
            offset: position.sub_point(grab),
        };
        simulation.reheat(self.drag_alpha_target);
        simulation.pin_node(index, position);
        renderer.redraw(simulation.model());
        true
    }

    /// Moves the dragged node so the grab point follows content point `to`.
    pub fn drag_to(&mut self, to: Point, simulation: &mut Simulation, renderer: &mut Renderer) {
        if let Gesture::Drag { index, offset } = self.gesture {
            simulation.pin_node(index, to.add_point(offset));
            renderer.redraw(simulation.model());
        }
    }

    /// Ends the drag. The node stays pinned where it was released.
    pub fn end_drag(&mut self, simulation: &mut Simulation) {
        if let Gesture::Drag { index, .. } = self.gesture {
            simulation.set_alpha_target(0.0);
            if let Some(node) = simulation.model().nodes().get(index) {
                debug!(node_id = node.id(), pinned:? = node.pinned(); "Drag ended");
            }
            self.gesture = Gesture::Idle;
        }
    }

    /// Zooms by `factor` around surface point `anchor`.
    pub fn zoom_by(
        &mut self,
        factor: f32,
        anchor: Point,
        simulation: &Simulation,
        renderer: &mut Renderer,
    ) {
        let transform = renderer.transform().scale_by(factor, anchor, self.extent);
        debug!(k = transform.k(); "Zoomed");
        renderer.set_transform(transform);
        renderer.redraw(simulation.model());
    }

    /// Pans the viewport by `delta` surface units.
    pub fn pan_by(&mut self, delta: Point, simulation: &Simulation, renderer: &mut Renderer) {
        renderer.set_transform(renderer.transform().translate_by(delta));
        renderer.redraw(simulation.model());
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        config::{AppConfig, StyleConfig},
        geometry::Size,
        model::{GraphModel, Relationship, Relationships},
        render::RenderStyle,
        simulation::SimulationState,
        surface::DrawingSurface,
        theme::Theme,
    };

    const CENTER: Point = Point::new(400.0, 250.0);

    struct Fixture {
        controller: InteractionController,
        simulation: Simulation,
        renderer: Renderer,
    }

    impl Fixture {
        fn new() -> Self {
            let config = AppConfig::default();
            let relationships = Relationships {
                anterior: Some(vec![Relationship::new("US 23", false, true, "s'appuie contre")]),
                ..Relationships::default()
            };
            let mut model = GraphModel::build("US 100", &relationships, CENTER);
            model.nodes_mut()[1].set_position(Point::new(400.0, 100.0));

            let simulation = Simulation::new(model, config.layout(), CENTER);
            let surface = Rc::new(RefCell::new(DrawingSurface::new(
                "graph",
                Size::new(800.0, 500.0),
            )));
            let theme = Theme::default();
            let style = RenderStyle::new(&StyleConfig::default(), &theme);
            let mut renderer =
                Renderer::new(surface, Size::new(800.0, 500.0), style, Rc::new(theme));
            renderer.redraw(simulation.model());

            Self {
                controller: InteractionController::new(config.interaction(), config.layout()),
                simulation,
                renderer,
            }
        }

        fn send(&mut self, event: PointerEvent) -> EventOutcome {
            self.controller
                .handle(event, &mut self.simulation, &mut self.renderer)
        }
    }

    #[test]
    fn test_drag_pins_node() {
        let mut fixture = Fixture::new();

        let outcome = fixture.send(PointerEvent::Down {
            at: Point::new(410.0, 105.0),
        });
        assert_eq!(outcome, EventOutcome::DragStarted(1));
        assert_approx_eq!(f32, fixture.simulation.alpha_target(), 0.3);

        fixture.send(PointerEvent::Move {
            at: Point::new(310.0, 305.0),
        });
        let outcome = fixture.send(PointerEvent::Up {
            at: Point::new(310.0, 305.0),
        });
        assert_eq!(outcome, EventOutcome::DragEnded(1));
        assert_approx_eq!(f32, fixture.simulation.alpha_target(), 0.0);
        assert_eq!(fixture.controller.dragging(), None);

        // The grab offset is preserved.
        let node = &fixture.simulation.model().nodes()[1];
        assert_eq!(node.pinned(), Some(Point::new(300.0, 300.0)));
        assert_eq!(node.position(), Point::new(300.0, 300.0));
    }

    #[test]
    fn test_central_node_pans_instead() {
        let mut fixture = Fixture::new();

        let outcome = fixture.send(PointerEvent::Down { at: CENTER });
        assert_eq!(outcome, EventOutcome::PanStarted);

        fixture.send(PointerEvent::Move {
            at: CENTER.add_point(Point::new(20.0, 10.0)),
        });
        fixture.send(PointerEvent::Up {
            at: CENTER.add_point(Point::new(30.0, 10.0)),
        });

        let transform = fixture.renderer.transform();
        assert_approx_eq!(f32, transform.x(), 30.0);
        assert_approx_eq!(f32, transform.y(), 10.0);
        assert_eq!(fixture.simulation.model().central().position(), CENTER);
    }

    #[test]
    fn test_wheel_zoom_is_clamped() {
        let mut fixture = Fixture::new();

        fixture.send(PointerEvent::Wheel {
            at: CENTER,
            delta_y: -500.0,
        });
        assert_approx_eq!(f32, fixture.renderer.transform().k(), 2.0, epsilon = 1e-4);

        for _ in 0..10 {
            fixture.send(PointerEvent::Wheel {
                at: CENTER,
                delta_y: -500.0,
            });
        }
        assert_approx_eq!(f32, fixture.renderer.transform().k(), 3.0);

        for _ in 0..20 {
            fixture.send(PointerEvent::Wheel {
                at: CENTER,
                delta_y: 500.0,
            });
        }
        assert_approx_eq!(f32, fixture.renderer.transform().k(), 0.5);
    }

    #[test]
    fn test_click_targets() {
        let mut fixture = Fixture::new();

        // Midway along the vertical edge, away from its label.
        let on_line = Point::new(400.0, 200.0);
        let outcome = fixture.send(PointerEvent::Click { at: on_line });
        assert_eq!(outcome, EventOutcome::Clicked(ClickOutcome::Edge(0)));
        assert!(!ClickOutcome::Edge(0).propagates());

        let outcome = fixture.send(PointerEvent::Click {
            at: Point::new(400.0, 100.0),
        });
        assert_eq!(outcome, EventOutcome::Clicked(ClickOutcome::Node(1)));
        assert!(ClickOutcome::Node(1).propagates());

        let outcome = fixture.send(PointerEvent::Click {
            at: Point::new(50.0, 450.0),
        });
        assert_eq!(outcome, EventOutcome::Clicked(ClickOutcome::Surface));
    }

    #[test]
    fn test_hit_testing_follows_zoom() {
        let mut fixture = Fixture::new();
        fixture.send(PointerEvent::Wheel {
            at: Point::new(0.0, 0.0),
            delta_y: -500.0,
        });

        // Node 1 now sits at (800, 200) on the surface.
        assert_eq!(
            fixture
                .controller
                .hit_test(&fixture.renderer, Point::new(800.0, 200.0)),
            Some(Hit::Node(1))
        );
    }

    #[test]
    fn test_drag_restarts_settled_simulation() {
        let mut fixture = Fixture::new();
        while fixture.simulation.tick(&mut fixture.renderer) == SimulationState::Running {}
        assert_eq!(fixture.simulation.state(), SimulationState::Settled);

        let node_at = fixture.simulation.model().nodes()[1].position();
        let at = fixture.renderer.transform().apply(node_at);
        fixture.send(PointerEvent::Down { at });
        assert_eq!(fixture.simulation.state(), SimulationState::Running);
    }

    #[test]
    fn test_stray_events_are_ignored() {
        let mut fixture = Fixture::new();
        assert_eq!(
            fixture.send(PointerEvent::Move { at: CENTER }),
            EventOutcome::Ignored
        );
        assert_eq!(
            fixture.send(PointerEvent::Up { at: CENTER }),
            EventOutcome::Ignored
        );
    }
}
