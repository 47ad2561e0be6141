//! Forces composed by the layout simulation.
//!
//! Each force reads node positions and adds to node velocities; the
//! simulation integrates velocities into positions once every force ran.

mod charge;
mod collide;
mod link;
mod zone;

pub use charge::ChargeForce;
pub use collide::CollideForce;
pub use link::LinkForce;
pub use zone::{ZoneForceX, ZoneForceY};

use super::Jiggle;
use crate::model::Node;

/// A velocity contribution applied on every simulation step.
pub trait Force {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Adds this force's contribution, scaled by `alpha`, to node velocities.
    fn apply(&mut self, nodes: &mut [Node], alpha: f32, jiggle: &mut Jiggle);
}

/// Replaces an exactly-zero component with a jiggle value.
fn nonzero_or_jiggle(value: f32, jiggle: &mut Jiggle) -> f32 {
    if value == 0.0 { jiggle.offset() } else { value }
}
