use crate::{geometry::Point, model::Node, simulation::Jiggle};

use super::{Force, nonzero_or_jiggle};

/// Squared distance below which repulsion stops growing.
const MIN_DISTANCE_SQUARED: f32 = 1.0;

/// Pairwise repulsion between all nodes (attraction for positive strengths).
///
/// Diagrams hold a few dozen units at most, so every pair is evaluated
/// exactly instead of through a spatial approximation.
#[derive(Debug, Clone)]
pub struct ChargeForce {
    strength: f32,
}

impl ChargeForce {
    pub fn new(strength: f32) -> Self {
        Self { strength }
    }
}

impl Force for ChargeForce {
    fn name(&self) -> &'static str {
        "charge"
    }

    fn apply(&mut self, nodes: &mut [Node], alpha: f32, jiggle: &mut Jiggle) {
        let positions: Vec<_> = nodes.iter().map(Node::position).collect();

        for (i, node) in nodes.iter_mut().enumerate() {
            for (j, other) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }

                let mut dx = other.x() - positions[i].x();
                let mut dy = other.y() - positions[i].y();
                let mut distance_sq = dx * dx + dy * dy;
                if dx == 0.0 {
                    dx = nonzero_or_jiggle(dx, jiggle);
                    distance_sq += dx * dx;
                }
                if dy == 0.0 {
                    dy = nonzero_or_jiggle(dy, jiggle);
                    distance_sq += dy * dy;
                }
                if distance_sq < MIN_DISTANCE_SQUARED {
                    distance_sq = (MIN_DISTANCE_SQUARED * distance_sq).sqrt();
                }
                if distance_sq == 0.0 {
                    continue;
                }

                let weight = self.strength * alpha / distance_sq;
                node.add_velocity(Point::new(dx * weight, dy * weight));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::model::{GraphModel, Relationship, Relationships};

    #[test]
    fn test_repulsion_is_symmetric() {
        let relationships = Relationships {
            synchronous: Some(vec![Relationship::new("US 18", false, true, "équivalent à")]),
            ..Relationships::default()
        };
        let mut model = GraphModel::build("US 100", &relationships, Point::new(0.0, 0.0));
        model.nodes_mut()[1].set_position(Point::new(0.0, 100.0));

        let mut force = ChargeForce::new(-180.0);
        force.apply(model.nodes_mut(), 1.0, &mut Jiggle::default());

        let nodes = model.nodes();
        // -180 * 100 / 100^2
        assert_approx_eq!(f32, nodes[0].velocity().y(), -1.8, epsilon = 1e-4);
        assert_approx_eq!(f32, nodes[1].velocity().y(), 1.8, epsilon = 1e-4);
        assert!(nodes[0].velocity().x().abs() < 1e-6);
    }

    #[test]
    fn test_coincident_nodes_stay_finite() {
        let relationships = Relationships {
            synchronous: Some(vec![Relationship::new("US 18", false, true, "")]),
            ..Relationships::default()
        };
        let mut model = GraphModel::build("US 100", &relationships, Point::new(5.0, 5.0));
        model.nodes_mut()[1].set_position(Point::new(5.0, 5.0));

        let mut force = ChargeForce::new(-180.0);
        force.apply(model.nodes_mut(), 1.0, &mut Jiggle::default());

        for node in model.nodes() {
            assert!(node.velocity().x().is_finite());
            assert!(node.velocity().y().is_finite());
        }
    }
}
