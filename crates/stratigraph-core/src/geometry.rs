//! Geometric primitives for diagram layout and hit testing.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate (or displacement) in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`rectangle_exit_point`] - Where a ray leaving a rectangle's center crosses its border
//!
//! # Coordinate System
//!
//! Coordinates follow SVG conventions:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! "Above" therefore means a smaller `y`.

/// A 2D point in diagram coordinate space.
///
/// Points double as displacement vectors (velocities, pointer deltas), so
/// they provide the handful of vector operations the layout needs.
///
/// # Examples
///
/// ```
/// # use stratigraph_core::geometry::Point;
/// let a = Point::new(10.0, 20.0);
/// let b = Point::new(30.0, 40.0);
///
/// let mid = a.midpoint(b);
/// assert_eq!(mid.x(), 20.0);
/// assert_eq!(mid.y(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the Euclidean length of this point seen as a vector
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Shortest distance from this point to the segment `start..end`.
    ///
    /// Degenerate segments (both ends equal) measure the distance to that end.
    pub fn distance_to_segment(self, start: Point, end: Point) -> f32 {
        let seg = end.sub_point(start);
        let len_sq = seg.x * seg.x + seg.y * seg.y;
        if len_sq == 0.0 {
            return self.sub_point(start).hypot();
        }

        let rel = self.sub_point(start);
        let t = ((rel.x * seg.x + rel.y * seg.y) / len_sq).clamp(0.0, 1.0);
        let projection = start.add_point(seg.scale(t));
        self.sub_point(projection).hypot()
    }

    /// Converts a center point and size into bounds.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a point holding half the width and half the height.
    ///
    /// This is the offset from a centered box's center to its bottom-right corner.
    pub fn half_extent(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// An axis-aligned rectangle defined by its minimum and maximum coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds of the given size centered on `center`.
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half = size.half_extent();
        Self {
            min_x: center.x - half.x,
            min_y: center.y - half.y,
            max_x: center.x + half.x,
            max_y: center.y + half.y,
        }
    }

    /// Creates bounds of the given size whose top-left corner is `top_left`.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns true if `point` lies inside or on the border of the bounds.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

/// Returns the point where a ray from `center` toward `toward` leaves a
/// rectangle of `size` centered on `center`.
///
/// The angle of the ray decides which edge is crossed: the distance along the
/// ray is the smaller of `half_width / |cos θ|` and `half_height / |sin θ|`.
/// When `toward` coincides with `center` there is no direction and `center`
/// is returned.
///
/// # Examples
///
/// ```
/// # use stratigraph_core::geometry::{Point, Size, rectangle_exit_point};
/// let exit = rectangle_exit_point(
///     Point::new(100.0, 100.0),
///     Size::new(90.0, 40.0),
///     Point::new(100.0, 0.0),
/// );
/// assert!((exit.x() - 100.0).abs() < 1e-3);
/// assert!((exit.y() - 80.0).abs() < 1e-3);
/// ```
pub fn rectangle_exit_point(center: Point, size: Size, toward: Point) -> Point {
    let delta = toward.sub_point(center);
    if delta.is_zero() {
        return center;
    }

    let angle = delta.y.atan2(delta.x);
    let (sin, cos) = angle.sin_cos();
    let half = size.half_extent();

    let along_x = if cos.abs() > f32::EPSILON {
        half.x / cos.abs()
    } else {
        f32::INFINITY
    };
    let along_y = if sin.abs() > f32::EPSILON {
        half.y / sin.abs()
    } else {
        f32::INFINITY
    };
    let distance = along_x.min(along_y);

    Point::new(
        cos.mul_add(distance, center.x),
        sin.mul_add(distance, center.y),
    )
}
