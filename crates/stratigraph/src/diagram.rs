//! Lifecycle handle of a rendered diagram.

use log::debug;

use crate::{
    geometry::Point,
    interaction::{ClickOutcome, EventOutcome, InteractionController, PointerEvent, ZoomTransform},
    model::{GraphModel, Link, Node},
    render::Renderer,
    simulation::{Simulation, SimulationState},
    surface::SharedSurface,
};

/// Host callback receiving the link a user selected.
pub type EdgeSelected = Box<dyn FnMut(&Link)>;

/// A live diagram: its simulation, renderer and pointer state.
///
/// The host drives the simulation by calling [`tick`](Self::tick) from its
/// own loop and forwards pointer input through
/// [`handle_event`](Self::handle_event). Call [`stop`](Self::stop) (or drop
/// the handle) before rendering a new diagram onto the same surface.
pub struct DiagramHandle {
    simulation: Simulation,
    renderer: Renderer,
    controller: InteractionController,
    on_edge_selected: Option<EdgeSelected>,
    selected: Option<usize>,
}

impl DiagramHandle {
    pub(crate) fn new(
        simulation: Simulation,
        renderer: Renderer,
        controller: InteractionController,
        on_edge_selected: Option<EdgeSelected>,
    ) -> Self {
        Self {
            simulation,
            renderer,
            controller,
            on_edge_selected,
            selected: None,
        }
    }

    /// Advances the layout by one step and redraws.
    pub fn tick(&mut self) -> SimulationState {
        self.simulation.tick(&mut self.renderer)
    }

    /// Ticks until the simulation leaves the running state or `max_ticks`
    /// steps were taken.
    pub fn run_until_settled(&mut self, max_ticks: usize) -> SimulationState {
        for _ in 0..max_ticks {
            if self.tick() != SimulationState::Running {
                break;
            }
        }
        self.state()
    }

    /// Stops the simulation for good. The last frame stays on the surface.
    pub fn stop(&mut self) {
        self.simulation.stop();
    }

    pub fn state(&self) -> SimulationState {
        self.simulation.state()
    }

    pub fn alpha(&self) -> f32 {
        self.simulation.alpha()
    }

    /// Number of simulation steps taken.
    pub fn ticks(&self) -> usize {
        self.simulation.ticks()
    }

    pub fn model(&self) -> &GraphModel {
        self.simulation.model()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.model().node(id)
    }

    pub fn transform(&self) -> ZoomTransform {
        self.renderer.transform()
    }

    pub fn surface(&self) -> &SharedSurface {
        self.renderer.surface()
    }

    /// Number of frames this diagram mounted on its surface.
    pub fn frames(&self) -> usize {
        self.renderer.frames()
    }

    /// Most recently selected link.
    pub fn selected_link(&self) -> Option<&Link> {
        self.selected.and_then(|index| self.model().links().get(index))
    }

    /// Feeds one pointer event to the interaction controller.
    ///
    /// Edge clicks invoke the selection callback.
    pub fn handle_event(&mut self, event: PointerEvent) -> EventOutcome {
        let outcome = self
            .controller
            .handle(event, &mut self.simulation, &mut self.renderer);

        if let EventOutcome::Clicked(ClickOutcome::Edge(index)) = outcome {
            self.select_edge(index);
        }
        outcome
    }

    /// Selects the link at `index` as if it was clicked.
    pub fn select_edge(&mut self, index: usize) -> bool {
        let Some(link) = self.simulation.model().links().get(index) else {
            return false;
        };

        debug!(relation:% = link.describe(); "Edge selected");
        self.selected = Some(index);
        if let Some(callback) = self.on_edge_selected.as_mut() {
            callback(link);
        }
        true
    }

    /// Zooms by `factor` around surface point `anchor`.
    pub fn zoom_by(&mut self, factor: f32, anchor: Point) {
        self.controller
            .zoom_by(factor, anchor, &self.simulation, &mut self.renderer);
    }

    /// Pans the view by `delta` surface units.
    pub fn pan_by(&mut self, delta: Point) {
        self.controller
            .pan_by(delta, &self.simulation, &mut self.renderer);
    }

    /// Drags node `id` to content point `to` and releases it there.
    ///
    /// Returns false when the node does not exist or is the central node.
    pub fn drag_node_to(&mut self, id: &str, to: Point) -> bool {
        let Some(index) = self.model().index_of(id) else {
            return false;
        };
        let grab = self.model().nodes()[index].position();

        if !self
            .controller
            .start_drag(index, grab, &mut self.simulation, &mut self.renderer)
        {
            return false;
        }
        self.controller
            .drag_to(to, &mut self.simulation, &mut self.renderer);
        self.controller.end_drag(&mut self.simulation);
        true
    }
}

impl Drop for DiagramHandle {
    fn drop(&mut self) {
        self.simulation.stop();
        debug!(ticks = self.simulation.ticks(); "Diagram released");
    }
}
