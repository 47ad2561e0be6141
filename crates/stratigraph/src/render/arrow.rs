//! Arrow marker definition and edge endpoint geometry.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    geometry::{Point, Size, rectangle_exit_point},
};

/// Builds the `<marker>` drawn at the end of every edge.
///
/// The tip of the path sits at `refX`, so the arrow touches the point where
/// the line ends.
pub fn arrow_marker(id: &str, color: Color) -> svg_element::Marker {
    let head = svg_element::Path::new()
        .set("d", "M0,-5L10,0L0,5")
        .set("fill", color.to_string())
        .set("fill-opacity", color.alpha());

    svg_element::Marker::new()
        .set("id", id)
        .set("viewBox", "0 -5 10 10")
        .set("refX", 10)
        .set("refY", 0)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(head)
}

/// Marker id scoped to one surface so several diagrams can share a page.
pub fn marker_id(surface_id: &str) -> String {
    let safe: String = surface_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("{safe}-arrow")
}

/// Visible segment of an edge between two node centers.
///
/// The line leaves from the source center (hidden beneath the source box) and
/// stops on the target box border so the arrowhead stays visible.
pub fn edge_endpoints(source: Point, target: Point, node_size: Size) -> (Point, Point) {
    (source, rectangle_exit_point(target, node_size, source))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_marker_attributes() {
        let markup = arrow_marker("graph-arrow", Color::default()).to_string();
        assert!(markup.contains("id=\"graph-arrow\""));
        assert!(markup.contains("viewBox=\"0 -5 10 10\""));
        assert!(markup.contains("orient=\"auto\""));
        assert!(markup.contains("M0,-5L10,0L0,5"));
    }

    #[test]
    fn test_marker_id_is_sanitized() {
        assert_eq!(marker_id("stratigraphy"), "stratigraphy-arrow");
        assert_eq!(marker_id("form:graph 1"), "form-graph-1-arrow");
    }

    #[test]
    fn test_vertical_edge_stops_at_box_edge() {
        let size = Size::new(90.0, 40.0);
        let (start, end) =
            edge_endpoints(Point::new(400.0, 250.0), Point::new(400.0, 100.0), size);

        assert_eq!(start, Point::new(400.0, 250.0));
        assert_approx_eq!(f32, end.x(), 400.0, epsilon = 1e-3);
        assert_approx_eq!(f32, end.y(), 120.0, epsilon = 1e-3);
    }

    #[test]
    fn test_horizontal_edge_stops_at_box_side() {
        let size = Size::new(90.0, 40.0);
        let (_, end) = edge_endpoints(Point::new(0.0, 0.0), Point::new(200.0, 0.0), size);

        assert_approx_eq!(f32, end.x(), 155.0, epsilon = 1e-3);
        assert_approx_eq!(f32, end.y(), 0.0, epsilon = 1e-3);
    }
}
