//! Mask geometry for the notched panels.
//!
//! Each panel is clipped by a six-vertex closed polygon: a rectangle with a
//! triangular notch (or tip) cut into the edge facing the gap. The tip is
//! always vertex 2, and every polygon is star-shaped around it.

use crate::direction::{ArrowDirection, ArrowPosition};
use kurbo::{BezPath, Point, Rect, Size, Vec2};

/// Number of vertices in a mask polygon, closing vertex included.
pub const MASK_VERTEX_COUNT: usize = 6;

/// Index of the notch tip within [`NotchPolygon::points`].
pub const TIP_INDEX: usize = 2;

/// A closed mask polygon in panel-local coordinates.
///
/// The last vertex repeats the first so the outline is explicitly closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotchPolygon {
    points: [Point; MASK_VERTEX_COUNT],
}

impl NotchPolygon {
    /// Create a polygon from five corners, appending the closing vertex.
    pub fn from_corners(corners: [Point; 5]) -> Self {
        let [a, b, c, d, e] = corners;
        Self {
            points: [a, b, c, d, e, a],
        }
    }

    /// All vertices, closing vertex included.
    pub fn points(&self) -> &[Point; MASK_VERTEX_COUNT] {
        &self.points
    }

    /// The notch tip (deepest point of the arrow cut).
    pub fn tip(&self) -> Point {
        self.points[TIP_INDEX]
    }

    /// Whether the first and last vertex coincide.
    pub fn is_closed(&self) -> bool {
        self.points[0] == self.points[MASK_VERTEX_COUNT - 1]
    }

    /// Mirror horizontally about the vertical line `x = width / 2`.
    pub fn mirrored(&self, width: f64) -> Self {
        Self {
            points: self.points.map(|p| Point::new(width - p.x, p.y)),
        }
    }

    /// Translate every vertex.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            points: self.points.map(|p| p + offset),
        }
    }

    /// Vertex-wise linear interpolation (`t = 0` is `self`, `t = 1` is `other`).
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let mut points = self.points;
        for (p, q) in points.iter_mut().zip(other.points.iter()) {
            *p = p.lerp(*q, t);
        }
        Self { points }
    }

    /// Axis-aligned bounds of the polygon.
    pub fn bounding_box(&self) -> Rect {
        let first = self.points[0];
        self.points
            .iter()
            .fold(Rect::from_points(first, first), |r, p| r.union_pt(*p))
    }

    /// Convert to a closed path.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.points[0]);
        for p in &self.points[1..] {
            path.line_to(*p);
        }
        path.close_path();
        path
    }

    /// Fan triangles around the tip, as index triples into [`Self::points`].
    ///
    /// Valid because the polygon is star-shaped around its tip.
    pub fn fan_triangles() -> [[usize; 3]; 3] {
        [[TIP_INDEX, 3, 4], [TIP_INDEX, 4, 0], [TIP_INDEX, 0, 1]]
    }
}

/// Build the clip polygon for a panel of the given size.
///
/// `RightSide` polygons have their notch on the left edge: the tip sits at
/// `x = depth` when pointing right and retracts to `x = 0` when pointing
/// left. `LeftSide` polygons are the mirror, with the tip flush at `x = W`
/// when pointing right and retracted to `x = W - depth` when pointing left.
pub fn mask_path(
    size: Size,
    position: ArrowPosition,
    direction: ArrowDirection,
    depth_of_cut: f64,
) -> NotchPolygon {
    let w = size.width;
    let h = size.height;
    let half = depth_of_cut / 2.0;

    match position {
        ArrowPosition::RightSide => {
            let tip_x = match direction {
                ArrowDirection::PointingRight => depth_of_cut,
                ArrowDirection::PointingLeft => 0.0,
            };
            NotchPolygon::from_corners([
                Point::new(w, 0.0),
                Point::new(half, 0.0),
                Point::new(tip_x, h / 2.0),
                Point::new(half, h),
                Point::new(w, h),
            ])
        }
        ArrowPosition::LeftSide => {
            let tip_x = match direction {
                ArrowDirection::PointingRight => w,
                ArrowDirection::PointingLeft => w - depth_of_cut,
            };
            NotchPolygon::from_corners([
                Point::new(0.0, 0.0),
                Point::new(w - half, 0.0),
                Point::new(tip_x, h / 2.0),
                Point::new(w - half, h),
                Point::new(0.0, h),
            ])
        }
    }
}
