use crate::{
    geometry::Point,
    model::{GraphModel, Node},
    simulation::Jiggle,
};

use super::{Force, nonzero_or_jiggle};

#[derive(Debug, Clone, Copy)]
struct Spring {
    source: usize,
    target: usize,
    /// Share of the correction applied to the target; the source takes the rest.
    bias: f32,
}

/// Pulls linked nodes toward a target separation.
///
/// Corrections are split between the two ends by degree, so a node with many
/// links moves less than a leaf attached to it.
#[derive(Debug, Clone)]
pub struct LinkForce {
    springs: Vec<Spring>,
    distance: f32,
    strength: f32,
}

impl LinkForce {
    pub fn new(model: &GraphModel, distance: f32, strength: f32) -> Self {
        let mut degree = vec![0_u32; model.nodes().len()];
        for link in model.links() {
            degree[link.source_index()] += 1;
            degree[link.target_index()] += 1;
        }

        let springs = model
            .links()
            .iter()
            .map(|link| {
                let source = degree[link.source_index()] as f32;
                let target = degree[link.target_index()] as f32;
                Spring {
                    source: link.source_index(),
                    target: link.target_index(),
                    bias: source / (source + target),
                }
            })
            .collect();

        Self {
            springs,
            distance,
            strength,
        }
    }
}

impl Force for LinkForce {
    fn name(&self) -> &'static str {
        "link"
    }

    fn apply(&mut self, nodes: &mut [Node], alpha: f32, jiggle: &mut Jiggle) {
        for spring in &self.springs {
            // Self links carry no direction.
            if spring.source == spring.target {
                continue;
            }

            let source = &nodes[spring.source];
            let target = &nodes[spring.target];
            let delta = target
                .position()
                .add_point(target.velocity())
                .sub_point(source.position().add_point(source.velocity()));
            let delta = Point::new(
                nonzero_or_jiggle(delta.x(), jiggle),
                nonzero_or_jiggle(delta.y(), jiggle),
            );

            let length = delta.hypot();
            let factor = (length - self.distance) / length * alpha * self.strength;
            let correction = delta.scale(factor);

            nodes[spring.target].add_velocity(correction.scale(-spring.bias));
            nodes[spring.source].add_velocity(correction.scale(1.0 - spring.bias));
        }
    }
}
