//! Force-directed layout simulation.
//!
//! The simulation relaxes node positions step by step. Every step it cools
//! `alpha` toward its target, lets each [`Force`] add to node velocities,
//! then integrates velocities into positions. Pinned nodes are held at their
//! pin. Once `alpha` drops below `alpha_min` the simulation settles and stops
//! calling its listener until it is reheated.
//!
//! Stepping is driven by the host: each [`Simulation::tick`] is one discrete
//! step, so long layouts interleave with whatever else the host does.

mod forces;
mod jiggle;

use std::f32::consts::PI;

use log::{debug, info, trace};

pub use forces::{ChargeForce, CollideForce, Force, LinkForce, ZoneForceX, ZoneForceY};
pub use jiggle::Jiggle;

use crate::{config::LayoutConfig, geometry::Point, model::GraphModel};

/// Observer of simulation progress.
pub trait TickListener {
    /// Called after every step with the updated positions.
    fn on_tick(&mut self, model: &GraphModel);

    /// Called once when the simulation settles.
    fn on_end(&mut self, _model: &GraphModel) {}
}

/// Lifecycle state of a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Running,
    /// Cooled below the stopping threshold. Can be reheated.
    Settled,
    /// Stopped by its owner. Terminal.
    Stopped,
}

/// Iterative force relaxation over a [`GraphModel`].
pub struct Simulation {
    model: GraphModel,
    forces: Vec<Box<dyn Force>>,
    alpha: f32,
    alpha_min: f32,
    alpha_decay: f32,
    alpha_target: f32,
    velocity_decay: f32,
    jiggle: Jiggle,
    state: SimulationState,
    ticks: usize,
}

impl Simulation {
    /// Creates a simulation without forces and places unplaced nodes.
    pub fn new(mut model: GraphModel, config: &LayoutConfig, center: Point) -> Self {
        place_on_spiral(&mut model, center, config.initial_radius());

        let mut simulation = Self {
            model,
            forces: Vec::new(),
            alpha: 1.0,
            alpha_min: 0.001,
            alpha_decay: 0.0228,
            alpha_target: 0.0,
            velocity_decay: 0.4,
            jiggle: Jiggle::default(),
            state: SimulationState::Running,
            ticks: 0,
        };
        simulation
            .set_alpha_min(config.alpha_min())
            .set_alpha_decay(config.alpha_decay())
            .set_velocity_decay(config.velocity_decay())
            .set_seed(config.seed());
        simulation
    }

    /// Sets the alpha below which the simulation settles.
    pub fn set_alpha_min(&mut self, alpha_min: f32) -> &mut Self {
        self.alpha_min = alpha_min;
        self
    }

    /// Sets the fraction of the distance to the alpha target covered per step.
    pub fn set_alpha_decay(&mut self, alpha_decay: f32) -> &mut Self {
        self.alpha_decay = alpha_decay;
        self
    }

    /// Sets the fraction of velocity lost per step.
    pub fn set_velocity_decay(&mut self, velocity_decay: f32) -> &mut Self {
        self.velocity_decay = velocity_decay;
        self
    }

    /// Reseeds the jitter used for coincident nodes.
    pub fn set_seed(&mut self, seed: u64) -> &mut Self {
        self.jiggle = Jiggle::new(seed);
        self
    }

    /// Creates a simulation with the stratigraphy forces: link, charge,
    /// collision and both zone forces.
    pub fn with_layout_forces(model: GraphModel, config: &LayoutConfig, center: Point) -> Self {
        let link = LinkForce::new(&model, config.link_distance(), config.link_strength());

        let mut simulation = Self::new(model, config, center);
        simulation.add_force(link);
        simulation.add_force(ChargeForce::new(config.charge_strength()));
        simulation.add_force(CollideForce::new(config.collision_radius()));
        simulation.add_force(ZoneForceY::new(
            center.y(),
            config.zone_offset_y(),
            config.zone_strength_y(),
            config.central_strength_y(),
        ));
        simulation.add_force(ZoneForceX::new(
            center.x(),
            config.zone_offset_x(),
            config.zone_strength_x(),
        ));

        simulation
    }

    pub fn add_force(&mut self, force: impl Force + 'static) {
        debug!(force = force.name(); "Force added");
        self.forces.push(Box::new(force));
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn alpha_min(&self) -> f32 {
        self.alpha_min
    }

    pub fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Number of steps taken so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Performs one step and notifies `listener`.
    ///
    /// Settled and stopped simulations do nothing and never call the listener.
    pub fn tick(&mut self, listener: &mut dyn TickListener) -> SimulationState {
        if self.state != SimulationState::Running {
            return self.state;
        }

        self.step();
        listener.on_tick(&self.model);

        if self.alpha < self.alpha_min {
            self.state = SimulationState::Settled;
            info!(ticks = self.ticks, alpha = self.alpha; "Simulation settled");
            listener.on_end(&self.model);
        }

        self.state
    }

    fn step(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
        self.ticks += 1;

        for force in &mut self.forces {
            force.apply(self.model.nodes_mut(), self.alpha, &mut self.jiggle);
        }

        let retain = 1.0 - self.velocity_decay;
        for node in self.model.nodes_mut() {
            match node.pinned() {
                Some(pin) => {
                    node.set_position(pin);
                    node.set_velocity(Point::default());
                }
                None => {
                    let velocity = node.velocity().scale(retain);
                    node.set_velocity(velocity);
                    node.set_position(node.position().add_point(velocity));
                }
            }
        }

        trace!(tick = self.ticks, alpha = self.alpha; "Simulation step");
    }

    /// Sets the alpha target and resumes a settled simulation.
    ///
    /// Stopped simulations stay stopped.
    pub fn reheat(&mut self, alpha_target: f32) {
        self.alpha_target = alpha_target;
        if self.state == SimulationState::Settled {
            debug!(alpha_target = alpha_target; "Simulation restarted");
            self.state = SimulationState::Running;
        }
    }

    /// Only changes the alpha target; the simulation keeps its current state.
    pub fn set_alpha_target(&mut self, alpha_target: f32) -> &mut Self {
        self.alpha_target = alpha_target;
        self
    }

    /// Stops the simulation for good.
    pub fn stop(&mut self) {
        if self.state != SimulationState::Stopped {
            debug!(ticks = self.ticks; "Simulation stopped");
            self.state = SimulationState::Stopped;
        }
    }

    /// Pins node `index` at `at` and moves it there immediately.
    pub(crate) fn pin_node(&mut self, index: usize, at: Point) {
        if let Some(node) = self.model.node_mut(index) {
            if node.is_main() {
                return;
            }
            node.pin(at);
            node.set_position(at);
            node.set_velocity(Point::default());
        }
    }
}

/// Places every unplaced node on a phyllotaxis spiral around `center`.
fn place_on_spiral(model: &mut GraphModel, center: Point, initial_radius: f32) {
    let angle_step = PI * (3.0 - 5.0_f32.sqrt());

    for (i, node) in model.nodes_mut().iter_mut().enumerate() {
        if let Some(pin) = node.pinned() {
            node.set_position(pin);
            continue;
        }
        if node.is_placed() {
            continue;
        }

        let radius = initial_radius * (0.5 + i as f32).sqrt();
        let angle = i as f32 * angle_step;
        let offset = Point::new(radius * angle.cos(), radius * angle.sin());
        node.set_position(center.add_point(offset));
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::model::{Relationship, Relationships, Zone};

    const CENTER: Point = Point::new(400.0, 250.0);

    #[derive(Default)]
    struct Recorder {
        ticks: usize,
        ends: usize,
    }

    impl TickListener for Recorder {
        fn on_tick(&mut self, _model: &GraphModel) {
            self.ticks += 1;
        }

        fn on_end(&mut self, _model: &GraphModel) {
            self.ends += 1;
        }
    }

    fn sample_relationships() -> Relationships {
        Relationships {
            anterior: Some(vec![Relationship::new("US 23", false, true, "s'appuie contre")]),
            posterior: Some(vec![
                Relationship::new("US 12", false, false, "sous"),
                Relationship::new("US 15", true, false, "incertain"),
            ]),
            synchronous: Some(vec![Relationship::new("US 18", false, true, "équivalent à")]),
        }
    }

    fn sample_simulation() -> Simulation {
        let model = GraphModel::build("US 100", &sample_relationships(), CENTER);
        Simulation::with_layout_forces(model, &LayoutConfig::default(), CENTER)
    }

    fn run(simulation: &mut Simulation, listener: &mut dyn TickListener, max: usize) {
        for _ in 0..max {
            if simulation.tick(listener) != SimulationState::Running {
                break;
            }
        }
    }

    #[test]
    fn test_initial_spiral_places_everyone() {
        let simulation = sample_simulation();
        let model = simulation.model();

        assert!(model.nodes().iter().all(|node| node.is_placed()));
        assert_eq!(model.central().position(), CENTER);

        // Node 1 sits at radius 10 * sqrt(1.5).
        let first = model.nodes()[1].position().sub_point(CENTER);
        assert_approx_eq!(f32, first.hypot(), 10.0 * 1.5_f32.sqrt(), epsilon = 1e-3);
    }

    #[test]
    fn test_simulation_halts() {
        let mut simulation = sample_simulation();
        let mut recorder = Recorder::default();

        run(&mut simulation, &mut recorder, 1000);

        assert_eq!(simulation.state(), SimulationState::Settled);
        assert!(simulation.alpha() < simulation.alpha_min());
        assert_eq!(recorder.ends, 1);
        // 1.0 * (1 - decay)^n < 0.001 first holds at n = 300.
        assert!((299..=301).contains(&recorder.ticks), "{}", recorder.ticks);

        let before = recorder.ticks;
        assert_eq!(simulation.tick(&mut recorder), SimulationState::Settled);
        assert_eq!(recorder.ticks, before);
        assert_eq!(recorder.ends, 1);
    }

    #[test]
    fn test_setters_chain() {
        let mut simulation = sample_simulation();
        let mut recorder = Recorder::default();
        simulation
            .set_alpha_decay(0.1)
            .set_alpha_min(0.01)
            .set_velocity_decay(0.6)
            .set_seed(7);

        run(&mut simulation, &mut recorder, 1000);

        assert_approx_eq!(f32, simulation.alpha_min(), 0.01);
        assert_eq!(simulation.state(), SimulationState::Settled);
        // 0.9^n < 0.01 first holds at n = 44.
        assert_eq!(recorder.ticks, 44);
    }

    #[test]
    fn test_central_node_never_moves() {
        let mut simulation = sample_simulation();
        let mut recorder = Recorder::default();
        run(&mut simulation, &mut recorder, 1000);

        assert_eq!(simulation.model().central().position(), CENTER);
    }

    #[test]
    fn test_zones_separate_vertically() {
        let mut simulation = sample_simulation();
        run(&mut simulation, &mut Recorder::default(), 1000);

        let model = simulation.model();
        let center_y = model.central().position().y();
        for node in model.nodes() {
            match node.zone() {
                Zone::Anterior => assert!(node.position().y() < center_y - 50.0),
                Zone::Posterior => assert!(node.position().y() > center_y + 50.0),
                _ => {}
            }
        }
    }

    #[test]
    fn test_nodes_do_not_overlap_after_settling() {
        let mut simulation = sample_simulation();
        run(&mut simulation, &mut Recorder::default(), 1000);

        let nodes = simulation.model().nodes();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                let distance = a.position().sub_point(b.position()).hypot();
                assert!(distance > 60.0, "{} and {} at {distance}", a.id(), b.id());
            }
        }
    }

    #[test]
    fn test_layout_is_reproducible() {
        let mut first = sample_simulation();
        let mut second = sample_simulation();
        run(&mut first, &mut Recorder::default(), 1000);
        run(&mut second, &mut Recorder::default(), 1000);

        for (a, b) in first.model().nodes().iter().zip(second.model().nodes()) {
            assert_eq!(a.position(), b.position());
        }
    }

    #[test]
    fn test_stop_is_terminal() {
        let mut simulation = sample_simulation();
        let mut recorder = Recorder::default();
        simulation.tick(&mut recorder);
        simulation.stop();

        assert_eq!(simulation.tick(&mut recorder), SimulationState::Stopped);
        simulation.reheat(0.3);
        assert_eq!(simulation.tick(&mut recorder), SimulationState::Stopped);
        assert_eq!(recorder.ticks, 1);
        assert_eq!(recorder.ends, 0);
    }

    #[test]
    fn test_reheat_resumes_settled() {
        let mut simulation = sample_simulation();
        let mut recorder = Recorder::default();
        run(&mut simulation, &mut recorder, 1000);

        simulation.reheat(0.3);
        assert_eq!(simulation.state(), SimulationState::Running);
        assert_approx_eq!(f32, simulation.alpha_target(), 0.3);

        simulation.tick(&mut recorder);
        assert!(simulation.alpha() > simulation.alpha_min());
    }

    #[test]
    fn test_pinned_node_holds() {
        let mut simulation = sample_simulation();
        let index = simulation.model().index_of("US 23").unwrap();
        simulation.pin_node(index, Point::new(300.0, 300.0));

        run(&mut simulation, &mut Recorder::default(), 1000);

        let node = &simulation.model().nodes()[index];
        assert_eq!(node.position(), Point::new(300.0, 300.0));
        assert_eq!(node.pinned(), Some(Point::new(300.0, 300.0)));
    }

    #[test]
    fn test_central_cannot_be_pinned_elsewhere() {
        let mut simulation = sample_simulation();
        simulation.pin_node(0, Point::new(0.0, 0.0));
        assert_eq!(simulation.model().central().position(), CENTER);
    }
}
