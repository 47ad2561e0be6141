//! SVG rendering of a diagram onto its drawing surface.
//!
//! The [`Renderer`] is the simulation's [`TickListener`]: every tick it turns
//! the current node positions into a fresh SVG document, mounts it on the
//! surface and records the drawn geometry in a [`Scene`] for hit testing.
//! There is no separate static render path.
//!
//! Document structure:
//!
//! ```text
//! <svg viewBox="0 0 W H">
//!   <defs><marker id="{surface}-arrow"/></defs>
//!   <g class="viewport" transform="translate(x,y) scale(k)">
//!     <g class="links">  <g class="link ..."><line/><text/></g> ... </g>
//!     <g class="nodes">  <g class="node ..." transform="translate(x, y)"><rect/><text/></g> ... </g>
//!   </g>
//! </svg>
//! ```

mod arrow;
mod scene;

pub use arrow::{arrow_marker, edge_endpoints, marker_id};
pub use scene::{Hit, Scene};

use std::rc::Rc;

use log::{trace, warn};
use svg::{Document, node::element as svg_element};

use stratigraph_core::apply_stroke;

use crate::{
    config::StyleConfig,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition, TextDefinition},
    geometry::{Bounds, Point, Size},
    interaction::ZoomTransform,
    model::{GraphModel, Link, Node},
    simulation::TickListener,
    surface::SharedSurface,
    theme::{ColorResolver, ColorRole},
};
use scene::{LinkShape, NodeShape};

const EDGE_STROKE_WIDTH: f32 = 2.0;
const NODE_STROKE_WIDTH: f32 = 2.0;
const MAIN_NODE_STROKE_WIDTH: f32 = 3.0;

/// Sizes and text styles used when drawing.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    node_size: Size,
    corner_radius: f32,
    label_offset: f32,
    edge_label: TextDefinition,
    node_label: TextDefinition,
    main_node_label: TextDefinition,
}

impl RenderStyle {
    /// Derives the style from configuration, coloring text through `colors`.
    pub fn new(config: &StyleConfig, colors: &dyn ColorResolver) -> Self {
        let label_color = colors.resolve(ColorRole::Label);

        let mut edge_label = TextDefinition::new();
        edge_label.set_font_family(config.font_family());
        edge_label.set_font_size(config.edge_label_font_size());
        edge_label.set_color(Some(label_color));

        let mut node_label = TextDefinition::new();
        node_label.set_font_family(config.font_family());
        node_label.set_font_size(config.node_label_font_size());
        node_label.set_color(Some(label_color));
        node_label.set_vertically_centered(true);

        let mut main_node_label = node_label.clone();
        main_node_label.set_bold(true);

        Self {
            node_size: config.node_size(),
            corner_radius: config.corner_radius(),
            label_offset: config.label_offset(),
            edge_label,
            node_label,
            main_node_label,
        }
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Anchor of an edge label: midpoint of the node centers, lifted by the label offset.
    pub fn label_anchor(&self, source: Point, target: Point) -> Point {
        let mid = source.midpoint(target);
        mid.with_y(mid.y() - self.label_offset)
    }

    fn node_label(&self, node: &Node) -> &TextDefinition {
        if node.is_main() {
            &self.main_node_label
        } else {
            &self.node_label
        }
    }
}

/// Draws the model onto one drawing surface.
pub struct Renderer {
    surface: SharedSurface,
    surface_id: String,
    generation: u64,
    size: Size,
    marker_id: String,
    colors: Rc<dyn ColorResolver>,
    style: RenderStyle,
    transform: ZoomTransform,
    scene: Scene,
    frames: usize,
    detached: bool,
}

impl Renderer {
    /// Creates a renderer bound to the surface's current generation.
    pub fn new(
        surface: SharedSurface,
        size: Size,
        style: RenderStyle,
        colors: Rc<dyn ColorResolver>,
    ) -> Self {
        let (surface_id, generation) = {
            let surface = surface.borrow();
            (surface.id().to_string(), surface.generation())
        };

        Self {
            marker_id: marker_id(&surface_id),
            surface,
            surface_id,
            generation,
            size,
            colors,
            style,
            transform: ZoomTransform::identity(),
            scene: Scene::default(),
            frames: 0,
            detached: false,
        }
    }

    pub fn surface(&self) -> &SharedSurface {
        &self.surface
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: ZoomTransform) {
        self.transform = transform;
    }

    /// Number of frames mounted so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// False once the surface was cleared for another diagram.
    pub fn is_attached(&self) -> bool {
        !self.detached && self.surface.borrow().generation() == self.generation
    }

    /// Redraws the whole diagram from the current model state.
    pub fn redraw(&mut self, model: &GraphModel) {
        if !self.is_attached() {
            if !self.detached {
                warn!(
                    surface_id = self.surface_id.as_str();
                    "Surface was cleared by another diagram, skipping redraw"
                );
                self.detached = true;
            }
            return;
        }

        let mut scene = Scene::default();
        let mut output = LayeredOutput::new();

        for (index, link) in model.links().iter().enumerate() {
            let (group, shape) = self.draw_link(model, index, link);
            output.add_to_layer(RenderLayer::Links, Box::new(group));
            scene.links.push(shape);
        }

        for (index, node) in model.nodes().iter().enumerate() {
            let (group, shape) = self.draw_node(index, node);
            output.add_to_layer(RenderLayer::Nodes, Box::new(group));
            scene.nodes.push(shape);
        }

        let mut viewport = svg_element::Group::new()
            .set("class", "viewport")
            .set("transform", self.transform.to_string());
        for layer in output.render() {
            viewport = viewport.add(layer);
        }

        let defs = svg_element::Definitions::new().add(arrow_marker(
            &self.marker_id,
            self.colors.resolve(ColorRole::ArrowHead),
        ));

        let document = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.size.width(), self.size.height()),
            )
            .set("width", self.size.width())
            .set("height", self.size.height())
            .add(defs)
            .add(viewport);

        self.surface.borrow_mut().mount(document);
        self.scene = scene;
        self.frames += 1;
        trace!(frame = self.frames; "Frame mounted");
    }

    fn draw_link(
        &self,
        model: &GraphModel,
        index: usize,
        link: &Link,
    ) -> (svg_element::Group, LinkShape) {
        let source = model.nodes()[link.source_index()].position();
        let target = model.nodes()[link.target_index()].position();
        let (start, end) = edge_endpoints(source, target, self.style.node_size);

        let stroke = if link.is_uncertain() {
            StrokeDefinition::dashed(
                self.colors.resolve(ColorRole::UncertainEdge),
                EDGE_STROKE_WIDTH,
            )
        } else {
            StrokeDefinition::solid(
                self.colors.resolve(ColorRole::NormalEdge),
                EDGE_STROKE_WIDTH,
            )
        };

        let line = svg_element::Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y())
            .set("marker-end", format!("url(#{})", self.marker_id))
            .set("cursor", "pointer");
        let line = apply_stroke!(line, &stroke);

        let anchor = self.style.label_anchor(source, target);
        let label = self
            .style
            .edge_label
            .render(link.label(), anchor)
            .set("cursor", "pointer");

        // The text baseline sits at the anchor, so the glyphs extend above it.
        let measured = self.style.edge_label.measure(link.label());
        let label_bounds = Bounds::new_from_top_left(
            Point::new(
                anchor.x() - measured.width() / 2.0,
                anchor.y() - measured.height(),
            ),
            measured,
        );

        let group = svg_element::Group::new()
            .set("class", format!("link {}", link.kind().name()))
            .set("data-source", link.source())
            .set("data-target", link.target())
            .add(line)
            .add(label);

        let shape = LinkShape {
            index,
            start,
            end,
            label: label_bounds,
        };
        (group, shape)
    }

    fn draw_node(&self, index: usize, node: &Node) -> (svg_element::Group, NodeShape) {
        let size = self.style.node_size;
        let half = size.half_extent();

        let fill = if node.is_main() {
            ColorRole::MainNodeFill
        } else if node.is_uncertain() {
            ColorRole::UncertainNodeFill
        } else {
            ColorRole::NodeFill
        };
        let stroke_role = if node.is_uncertain() {
            ColorRole::UncertainNodeStroke
        } else {
            ColorRole::NodeStroke
        };
        let stroke_width = if node.is_main() {
            MAIN_NODE_STROKE_WIDTH
        } else {
            NODE_STROKE_WIDTH
        };
        let stroke = StrokeDefinition::solid(self.colors.resolve(stroke_role), stroke_width);
        let fill = self.colors.resolve(fill);

        let rect = svg_element::Rectangle::new()
            .set("x", -half.x())
            .set("y", -half.y())
            .set("width", size.width())
            .set("height", size.height())
            .set("rx", self.style.corner_radius)
            .set("fill", fill.to_string())
            .set("fill-opacity", fill.alpha())
            .set("cursor", "pointer");
        let rect = apply_stroke!(rect, &stroke);

        let label = self
            .style
            .node_label(node)
            .render(node.id(), Point::default())
            .set("cursor", "pointer");

        let position = node.position();
        let mut class = format!("node {}", node.zone());
        if node.is_main() {
            class.push_str(" main");
        }
        if node.is_uncertain() {
            class.push_str(" uncertain");
        }

        let group = svg_element::Group::new()
            .set("class", class)
            .set("data-id", node.id())
            .set(
                "transform",
                format!("translate({}, {})", position.x(), position.y()),
            )
            .add(rect)
            .add(label);

        let shape = NodeShape {
            index,
            bounds: position.to_bounds(size),
        };
        (group, shape)
    }
}

impl TickListener for Renderer {
    fn on_tick(&mut self, model: &GraphModel) {
        self.redraw(model);
    }

    fn on_end(&mut self, model: &GraphModel) {
        self.redraw(model);
    }
}
