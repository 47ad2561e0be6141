//! Layer-based SVG output.
//!
//! Edges must be painted beneath nodes so that node boxes cover the line
//! ends. Drawables push their SVG nodes into a [`LayeredOutput`] tagged with
//! a [`RenderLayer`]; rendering emits one `<g class="...">` per layer in
//! paint order.
//!
//! # Example
//!
//! ```
//! # use stratigraph_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Group, Line};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Nodes, Box::new(Group::new()));
//! output.add_to_layer(RenderLayer::Links, Box::new(Line::new()));
//!
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! assert!(groups[0].to_string().contains("class=\"links\""));
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Paint layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Edge lines and their labels
    Links,
    /// Unit boxes and their identifiers
    Nodes,
}

impl RenderLayer {
    /// Returns the class name given to this layer's group.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Links => "links",
            Self::Nodes => "nodes",
        }
    }
}

/// SVG nodes collected per layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to the given layer. Insertion order is kept within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g>` whose `class` is the layer name.
    /// Groups are returned bottom layer first.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps per-layer insertion order
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("class", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("class", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
