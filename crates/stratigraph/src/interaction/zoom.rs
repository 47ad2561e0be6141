//! Zoom and pan transform of the diagram viewport.

use std::fmt;

use crate::geometry::Point;

/// Allowed zoom range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleExtent {
    min: f32,
    max: f32,
}

impl ScaleExtent {
    /// Creates an extent; bounds given in the wrong order are swapped.
    pub fn new(min: f32, max: f32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn min(self) -> f32 {
        self.min
    }

    pub fn max(self) -> f32 {
        self.max
    }

    pub fn clamp(self, k: f32) -> f32 {
        k.clamp(self.min, self.max)
    }
}

impl Default for ScaleExtent {
    fn default() -> Self {
        Self::new(0.5, 3.0)
    }
}

/// Uniform scale `k` followed by a translation `(x, y)`.
///
/// Maps content coordinates to surface coordinates:
/// `surface = content * k + (x, y)`.
///
/// # Examples
///
/// ```
/// # use stratigraph::geometry::Point;
/// # use stratigraph::interaction::{ScaleExtent, ZoomTransform};
/// let anchor = Point::new(100.0, 100.0);
/// let zoomed = ZoomTransform::identity().scale_by(2.0, anchor, ScaleExtent::default());
///
/// // The anchor stays put.
/// assert_eq!(zoomed.apply(zoomed.invert(anchor)), anchor);
/// assert_eq!(zoomed.to_string(), "translate(-100,-100) scale(2)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    k: f32,
    x: f32,
    y: f32,
}

impl ZoomTransform {
    pub fn identity() -> Self {
        Self {
            k: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn new(k: f32, x: f32, y: f32) -> Self {
        Self { k, x, y }
    }

    pub fn k(self) -> f32 {
        self.k
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Content point to surface point.
    pub fn apply(self, point: Point) -> Point {
        Point::new(point.x() * self.k + self.x, point.y() * self.k + self.y)
    }

    /// Surface point to content point.
    pub fn invert(self, point: Point) -> Point {
        Point::new((point.x() - self.x) / self.k, (point.y() - self.y) / self.k)
    }

    /// Multiplies the scale by `factor`, clamped to `extent`, keeping the
    /// surface point `anchor` over the same content point.
    pub fn scale_by(self, factor: f32, anchor: Point, extent: ScaleExtent) -> Self {
        let k = extent.clamp(self.k * factor);
        let content = self.invert(anchor);
        Self {
            k,
            x: anchor.x() - content.x() * k,
            y: anchor.y() - content.y() * k,
        }
    }

    /// Shifts the view by `delta` surface units.
    pub fn translate_by(self, delta: Point) -> Self {
        Self {
            k: self.k,
            x: self.x + delta.x(),
            y: self.y + delta.y(),
        }
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for ZoomTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({},{}) scale({})", self.x, self.y, self.k)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_identity_round_trip() {
        let transform = ZoomTransform::identity();
        let point = Point::new(12.0, -4.0);
        assert_eq!(transform.apply(point), point);
        assert_eq!(transform.to_string(), "translate(0,0) scale(1)");
    }

    #[test]
    fn test_scale_is_clamped() {
        let extent = ScaleExtent::new(0.5, 3.0);
        let anchor = Point::new(400.0, 250.0);

        let zoomed_in = ZoomTransform::identity().scale_by(10.0, anchor, extent);
        assert_approx_eq!(f32, zoomed_in.k(), 3.0);

        let zoomed_out = ZoomTransform::identity().scale_by(0.01, anchor, extent);
        assert_approx_eq!(f32, zoomed_out.k(), 0.5);
    }

    #[test]
    fn test_anchor_stays_fixed() {
        let extent = ScaleExtent::default();
        let anchor = Point::new(250.0, 120.0);
        let transform = ZoomTransform::new(1.5, 30.0, -20.0).scale_by(1.3, anchor, extent);

        let back = transform.apply(ZoomTransform::new(1.5, 30.0, -20.0).invert(anchor));
        assert_approx_eq!(f32, back.x(), anchor.x(), epsilon = 1e-3);
        assert_approx_eq!(f32, back.y(), anchor.y(), epsilon = 1e-3);
    }

    #[test]
    fn test_translate() {
        let transform = ZoomTransform::new(2.0, 0.0, 0.0).translate_by(Point::new(10.0, 5.0));
        assert_eq!(transform.apply(Point::new(1.0, 1.0)), Point::new(12.0, 7.0));
        assert_eq!(transform.invert(Point::new(12.0, 7.0)), Point::new(1.0, 1.0));
    }

    #[test]
    fn test_extent_orders_bounds() {
        let extent = ScaleExtent::new(3.0, 0.5);
        assert_approx_eq!(f32, extent.min(), 0.5);
        assert_approx_eq!(f32, extent.max(), 3.0);
    }
}
