use crate::{geometry::Point, model::Node, simulation::Jiggle};

use super::{Force, nonzero_or_jiggle};

/// Keeps node centers at least two radii apart.
///
/// Overlap is resolved on anticipated positions (position plus velocity) and
/// split between the two nodes in proportion to the other node's area.
#[derive(Debug, Clone)]
pub struct CollideForce {
    radius: f32,
}

impl CollideForce {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Force for CollideForce {
    fn name(&self) -> &'static str {
        "collide"
    }

    fn apply(&mut self, nodes: &mut [Node], _alpha: f32, jiggle: &mut Jiggle) {
        let ri = self.radius;
        let rj = self.radius;
        let reach = ri + rj;
        let target_share = (rj * rj) / (ri * ri + rj * rj);

        for i in 0..nodes.len() {
            let anticipated = nodes[i].position().add_point(nodes[i].velocity());

            for j in (i + 1)..nodes.len() {
                let other = nodes[j].position().add_point(nodes[j].velocity());
                let mut dx = anticipated.x() - other.x();
                let mut dy = anticipated.y() - other.y();
                let mut distance_sq = dx * dx + dy * dy;
                if distance_sq >= reach * reach {
                    continue;
                }

                if dx == 0.0 {
                    dx = nonzero_or_jiggle(dx, jiggle);
                    distance_sq += dx * dx;
                }
                if dy == 0.0 {
                    dy = nonzero_or_jiggle(dy, jiggle);
                    distance_sq += dy * dy;
                }

                let distance = distance_sq.sqrt();
                if distance == 0.0 {
                    continue;
                }
                let factor = (reach - distance) / distance;
                let push = Point::new(dx * factor, dy * factor);

                nodes[i].add_velocity(push.scale(target_share));
                nodes[j].add_velocity(push.scale(-(1.0 - target_share)));
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
    fn test_overlap_is_split_evenly() {
        let relationships = Relationships {
            posterior: Some(vec![Relationship::new("US 12", false, false, "sous")]),
            ..Relationships::default()
        };
        let mut model = GraphModel::build("US 100", &relationships, Point::new(0.0, 0.0));
        model.nodes_mut()[1].set_position(Point::new(60.0, 0.0));

        let mut force = CollideForce::new(45.0);
        force.apply(model.nodes_mut(), 1.0, &mut Jiggle::default());

        let nodes = model.nodes();
        // 30 units of overlap, half to each node.
        assert_approx_eq!(f32, nodes[0].velocity().x(), -15.0, epsilon = 1e-3);
        assert_approx_eq!(f32, nodes[1].velocity().x(), 15.0, epsilon = 1e-3);
    }

    #[test]
    fn test_distant_nodes_untouched() {
        let relationships = Relationships {
            posterior: Some(vec![Relationship::new("US 12", false, false, "sous")]),
            ..Relationships::default()
        };
        let mut model = GraphModel::build("US 100", &relationships, Point::new(0.0, 0.0));
        model.nodes_mut()[1].set_position(Point::new(200.0, 0.0));

        let mut force = CollideForce::new(45.0);
        force.apply(model.nodes_mut(), 1.0, &mut Jiggle::default());

        assert!(model.nodes().iter().all(|node| node.velocity().is_zero()));
    }
}
