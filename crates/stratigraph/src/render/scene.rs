//! Geometry of the last drawn frame, kept for hit testing.

use crate::geometry::{Bounds, Point};

/// Element under a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Node at this index of the model.
    Node(usize),
    /// Label of the link at this index.
    EdgeLabel(usize),
    /// Line of the link at this index.
    EdgeLine(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NodeShape {
    pub(crate) index: usize,
    pub(crate) bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LinkShape {
    pub(crate) index: usize,
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub(crate) label: Bounds,
}

/// Content-space shapes in paint order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub(crate) nodes: Vec<NodeShape>,
    pub(crate) links: Vec<LinkShape>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Finds the topmost element at `point` (content coordinates).
    ///
    /// Nodes are painted over links, so they win; among links, labels win
    /// over lines. Within a kind, later-painted elements win. Lines accept
    /// points within `line_tolerance`.
    pub fn hit_test(&self, point: Point, line_tolerance: f32) -> Option<Hit> {
        if let Some(node) = self.nodes.iter().rev().find(|n| n.bounds.contains(point)) {
            return Some(Hit::Node(node.index));
        }

        if let Some(link) = self.links.iter().rev().find(|l| l.label.contains(point)) {
            return Some(Hit::EdgeLabel(link.index));
        }

        self.links
            .iter()
            .rev()
            .find(|l| point.distance_to_segment(l.start, l.end) <= line_tolerance)
            .map(|l| Hit::EdgeLine(l.index))
    }

    /// Bounds of the drawn node at model index `index`.
    pub fn node_bounds(&self, index: usize) -> Option<Bounds> {
        self.nodes.iter().find(|n| n.index == index).map(|n| n.bounds)
    }

    /// Bounds of the drawn label of the link at `index`.
    pub fn label_bounds(&self, index: usize) -> Option<Bounds> {
        self.links.iter().find(|l| l.index == index).map(|l| l.label)
    }

    /// Visible segment of the link at `index`.
    pub fn link_segment(&self, index: usize) -> Option<(Point, Point)> {
        self.links
            .iter()
            .find(|l| l.index == index)
            .map(|l| (l.start, l.end))
    }
}
