use crate::{
    geometry::Point,
    model::{Node, Zone},
    simulation::Jiggle,
};

use super::Force;

/// Pulls nodes toward the horizontal band of their zone.
///
/// Anterior units sit above the center, posterior units below it, and the
/// central and synchronous units on the center line.
#[derive(Debug, Clone)]
pub struct ZoneForceY {
    center_y: f32,
    offset: f32,
    strength: f32,
    central_strength: f32,
}

impl ZoneForceY {
    pub fn new(center_y: f32, offset: f32, strength: f32, central_strength: f32) -> Self {
        Self {
            center_y,
            offset,
            strength,
            central_strength,
        }
    }

    /// Vertical target of a zone.
    pub fn target(&self, zone: Zone) -> f32 {
        match zone {
            Zone::Anterior => self.center_y - self.offset,
            Zone::Posterior => self.center_y + self.offset,
            Zone::Central | Zone::Synchronous => self.center_y,
        }
    }

    fn strength(&self, zone: Zone) -> f32 {
        match zone {
            Zone::Central => self.central_strength,
            _ => self.strength,
        }
    }
}

impl Force for ZoneForceY {
    fn name(&self) -> &'static str {
        "zone-y"
    }

    fn apply(&mut self, nodes: &mut [Node], alpha: f32, _jiggle: &mut Jiggle) {
        for node in nodes {
            let pull = (self.target(node.zone()) - node.position().y())
                * self.strength(node.zone())
                * alpha;
            node.add_velocity(Point::new(0.0, pull));
        }
    }
}

/// Pulls synchronous nodes toward a column left or right of the center.
///
/// The side is whichever one the node currently sits on, so synchronous
/// units spread to both sides instead of piling up in one column.
#[derive(Debug, Clone)]
pub struct ZoneForceX {
    center_x: f32,
    offset: f32,
    strength: f32,
}

impl ZoneForceX {
    pub fn new(center_x: f32, offset: f32, strength: f32) -> Self {
        Self {
            center_x,
            offset,
            strength,
        }
    }

    /// Horizontal target for a synchronous node currently at `x`.
    pub fn target(&self, x: f32) -> f32 {
        if x < self.center_x {
            self.center_x - self.offset
        } else {
            self.center_x + self.offset
        }
    }
}

impl Force for ZoneForceX {
    fn name(&self) -> &'static str {
        "zone-x"
    }

    fn apply(&mut self, nodes: &mut [Node], alpha: f32, _jiggle: &mut Jiggle) {
        for node in nodes.iter_mut().filter(|n| n.zone() == Zone::Synchronous) {
            let x = node.position().x();
            let pull = (self.target(x) - x) * self.strength * alpha;
            node.add_velocity(Point::new(pull, 0.0));
        }
    }
}
