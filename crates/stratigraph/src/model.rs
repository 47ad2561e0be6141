//! Graph model built from a central unit and its classified relationships.
//!
//! The model is the node/link pair the layout engine moves and the renderer
//! draws. It is rebuilt from scratch for every diagram instance.
//!
//! # Construction rules
//!
//! - The central node is created first, at the surface center, pinned there.
//! - Zones are visited in the fixed order anterior, posterior, synchronous,
//!   and each zone's relationships in input order.
//! - A node is created the first time its unit identifier is seen; later
//!   relationships reuse it without touching its zone or uncertainty.
//! - Every relationship yields exactly one link.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Deserializer};

use crate::geometry::Point;

/// Layout zone of a node, derived from the relationship list it first appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Central,
    Anterior,
    Posterior,
    Synchronous,
}

impl Zone {
    pub fn name(self) -> &'static str {
        match self {
            Self::Central => "central",
            Self::Anterior => "anterior",
            Self::Posterior => "posterior",
            Self::Synchronous => "synchronous",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One stratigraphic relationship between the central unit and another unit.
///
/// Every field defaults when absent or `null`, so incomplete records still
/// render (with an empty identifier or label).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Relationship {
    /// Identifier of the other unit.
    #[serde(deserialize_with = "null_as_default")]
    pub unit1_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uncertain: bool,
    /// `true` points the edge from the central unit to the other unit.
    #[serde(deserialize_with = "null_as_default")]
    pub vocabulary_direction: bool,
    /// Vocabulary term shown on the edge.
    #[serde(deserialize_with = "null_as_default")]
    pub vocabulary_label: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Relationship {
    pub fn new(
        unit1_id: impl Into<String>,
        uncertain: bool,
        vocabulary_direction: bool,
        vocabulary_label: impl Into<String>,
    ) -> Self {
        Self {
            unit1_id: unit1_id.into(),
            uncertain,
            vocabulary_direction,
            vocabulary_label: vocabulary_label.into(),
        }
    }
}

/// The three classified relationship sequences. Absent sequences count as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Relationships {
    pub anterior: Option<Vec<Relationship>>,
    pub posterior: Option<Vec<Relationship>>,
    pub synchronous: Option<Vec<Relationship>>,
}

impl Relationships {
    /// Returns the zones paired with their relationships, in build order.
    fn by_zone(&self) -> [(Zone, &[Relationship]); 3] {
        [
            (Zone::Anterior, self.anterior.as_deref().unwrap_or_default()),
            (Zone::Posterior, self.posterior.as_deref().unwrap_or_default()),
            (
                Zone::Synchronous,
                self.synchronous.as_deref().unwrap_or_default(),
            ),
        ]
    }

    /// Total number of relationship records across all zones.
    pub fn len(&self) -> usize {
        self.by_zone().iter().map(|(_, rels)| rels.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A stratigraphic unit in the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    zone: Zone,
    main: bool,
    uncertain: bool,
    position: Option<Point>,
    velocity: Point,
    pinned: Option<Point>,
}

impl Node {
    fn central(id: &str, center: Point) -> Self {
        Self {
            id: id.to_string(),
            zone: Zone::Central,
            main: true,
            uncertain: false,
            position: Some(center),
            velocity: Point::default(),
            pinned: Some(center),
        }
    }

    fn related(id: &str, zone: Zone, uncertain: bool) -> Self {
        Self {
            id: id.to_string(),
            zone,
            main: false,
            uncertain,
            position: None,
            velocity: Point::default(),
            pinned: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// True only for the central unit.
    pub fn is_main(&self) -> bool {
        self.main
    }

    pub fn is_uncertain(&self) -> bool {
        self.uncertain
    }

    /// Current position. Unplaced nodes report the origin until the layout
    /// engine gives them an initial position.
    pub fn position(&self) -> Point {
        self.position.unwrap_or_default()
    }

    /// Returns true once the node has a position.
    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Pinned position overriding the simulation, if any.
    pub fn pinned(&self) -> Option<Point> {
        self.pinned
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = Some(position);
    }

    pub(crate) fn set_velocity(&mut self, velocity: Point) {
        self.velocity = velocity;
    }

    pub(crate) fn add_velocity(&mut self, delta: Point) {
        self.velocity = self.velocity.add_point(delta);
    }

    /// Pins a non-central node. The central node's pin is fixed at build time.
    pub(crate) fn pin(&mut self, at: Point) {
        if !self.main {
            self.pinned = Some(at);
        }
    }
}

/// Rendering style of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Normal,
    Uncertain,
}

impl LinkKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Uncertain => "uncertain",
        }
    }
}

/// A directed, labelled edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    source: String,
    target: String,
    label: String,
    kind: LinkKind,
    source_index: usize,
    target_index: usize,
}

impl Link {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Vocabulary term of the originating relationship.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    pub fn is_uncertain(&self) -> bool {
        self.kind == LinkKind::Uncertain
    }

    /// Index of the source node in [`GraphModel::nodes`].
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Index of the target node in [`GraphModel::nodes`].
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// Heading for a relation detail panel, e.g. `"Relation: US 23"`.
    pub fn title(&self) -> String {
        format!("Relation: {}", self.target)
    }

    /// Sentence describing the relation, e.g. `"US 100 s'appuie contre US 23"`.
    pub fn describe(&self) -> String {
        format!("{} {} {}", self.source, self.label, self.target)
    }
}

/// Nodes and links of one diagram instance.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    nodes: Vec<Node>,
    links: Vec<Link>,
    index: IndexMap<String, usize>,
}

impl GraphModel {
    /// Builds the model for `central_id` and its relationships, placing the
    /// central node at `center`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratigraph::geometry::Point;
    /// use stratigraph::model::{GraphModel, Relationship, Relationships};
    ///
    /// let relationships = Relationships {
    ///     anterior: Some(vec![Relationship::new("US 23", false, true, "s'appuie contre")]),
    ///     ..Relationships::default()
    /// };
    ///
    /// let model = GraphModel::build("US 100", &relationships, Point::new(400.0, 250.0));
    /// assert_eq!(model.nodes().len(), 2);
    /// assert_eq!(model.links()[0].source(), "US 100");
    /// assert_eq!(model.links()[0].target(), "US 23");
    /// ```
    pub fn build(central_id: &str, relationships: &Relationships, center: Point) -> Self {
        let mut model = Self::default();
        model.insert_node(Node::central(central_id, center));

        for (zone, entries) in relationships.by_zone() {
            for relationship in entries {
                let other = relationship.unit1_id.as_str();
                let other_index = match model.index.get(other) {
                    Some(&index) => index,
                    None => model.insert_node(Node::related(other, zone, relationship.uncertain)),
                };

                let (source_index, target_index) = if relationship.vocabulary_direction {
                    (0, other_index)
                } else {
                    (other_index, 0)
                };

                model.links.push(Link {
                    source: model.nodes[source_index].id.clone(),
                    target: model.nodes[target_index].id.clone(),
                    label: relationship.vocabulary_label.clone(),
                    kind: if relationship.uncertain {
                        LinkKind::Uncertain
                    } else {
                        LinkKind::Normal
                    },
                    source_index,
                    target_index,
                });
            }
        }

        debug!(
            central_id = central_id,
            nodes = model.nodes.len(),
            links = model.links.len();
            "Graph model built"
        );

        model
    }

    fn insert_node(&mut self, node: Node) -> usize {
        let index = self.nodes.len();
        self.index.insert(node.id.clone(), index);
        self.nodes.push(node);
        index
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The central node. Always the first node of the model.
    pub fn central(&self) -> &Node {
        &self.nodes[0]
    }

    /// Looks up a node by unit identifier.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }
}
