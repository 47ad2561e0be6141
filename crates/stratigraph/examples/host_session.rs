//! Example: Driving a diagram the way a host page does
//!
//! This example registers a drawing surface, renders a diagram with an edge
//! selection callback, runs the layout to rest, replays a few pointer events
//! and prints the final SVG.

use stratigraph::{
    DrawingSurface, Link, PointerEvent, Relationship, Relationships, SurfaceRegistry,
    geometry::{Point, Size},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut surfaces = SurfaceRegistry::new();
    surfaces.insert(DrawingSurface::new("stratigraphy", Size::new(800.0, 500.0)));

    let relationships = Relationships {
        anterior: Some(vec![Relationship::new(
            "US 23",
            false,
            true,
            "s'appuie contre",
        )]),
        posterior: Some(vec![
            Relationship::new("US 12", false, false, "sous"),
            Relationship::new("US 15", true, false, "incertain"),
        ]),
        synchronous: Some(vec![Relationship::new("US 18", false, true, "équivalent à")]),
    };

    let mut diagram = stratigraph::render(
        &surfaces,
        "stratigraphy",
        "US 100",
        Some(&relationships),
        Some(Box::new(|link: &Link| {
            println!("{}", link.title());
            println!("  {}", link.describe());
        })),
    )
    .ok_or("diagram was not rendered")?;

    let state = diagram.run_until_settled(1000);
    println!("Layout {state:?} after {} ticks\n", diagram.ticks());

    // Move US 23 out of the way, then zoom in on the central unit.
    diagram.drag_node_to("US 23", Point::new(250.0, 90.0));
    diagram.run_until_settled(1000);
    diagram.handle_event(PointerEvent::Wheel {
        at: Point::new(400.0, 250.0),
        delta_y: -120.0,
    });

    // Click halfway along every edge.
    let midpoints: Vec<Point> = diagram
        .model()
        .links()
        .iter()
        .map(|link| {
            let nodes = diagram.model().nodes();
            let mid = nodes[link.source_index()]
                .position()
                .midpoint(nodes[link.target_index()].position());
            diagram.transform().apply(mid)
        })
        .collect();
    for at in midpoints {
        diagram.handle_event(PointerEvent::Click { at });
    }

    if let Some(svg) = diagram.surface().borrow().markup() {
        println!("\n{svg}");
    }

    Ok(())
}
