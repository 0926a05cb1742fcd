//! Geometric primitives shared by the packing engine.
//!
//! Covers axis-aligned overlap with padding and the rounded-corner exclusion
//! test. Both operate on plain floating point coordinates rather than a
//! vector type, since the engine always reasons in terms of the bed's
//! length/width/height axes rather than a generic 3D space.

/// Tolerance used when deduplicating orientations with equal placed
/// dimensions (e.g. cubes, or boxes square in one plane).
pub const EPSILON_ORIENTATION: f64 = 1e-3;

/// Tolerance used when deciding whether a candidate sits directly on top of
/// a placed box (z-alignment) and for minimize_holes adjacency scoring.
pub const EPSILON_SUPPORT: f64 = 0.1;

/// Tolerance used to decide whether a candidate is resting on the bed floor.
pub const EPSILON_FLOOR: f64 = 1e-3;

/// General-purpose numerical tolerance for bounds and containment checks.
pub const EPSILON_GENERAL: f64 = 1e-6;

/// An axis-aligned footprint or cuboid, described by its origin and extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Cuboid {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, length: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            z,
            length,
            width,
            height,
        }
    }

    #[inline]
    pub fn x_end(&self) -> f64 {
        self.x + self.length
    }

    #[inline]
    pub fn y_end(&self) -> f64 {
        self.y + self.width
    }

    #[inline]
    pub fn z_end(&self) -> f64 {
        self.z + self.height
    }
}

/// Length of the overlap between two 1D intervals, at least 0.
#[inline]
pub fn overlap_1d(a1: f64, a2: f64, b1: f64, b2: f64) -> f64 {
    (a2.min(b2) - a1.max(b1)).max(0.0)
}

/// Overlap area of two footprints in the XY plane.
#[inline]
pub fn overlap_area_xy(a: &Cuboid, b: &Cuboid) -> f64 {
    let over_x = overlap_1d(a.x, a.x_end(), b.x, b.x_end());
    let over_y = overlap_1d(a.y, a.y_end(), b.y, b.y_end());
    over_x * over_y
}

/// Checks whether two cuboids collide given a uniform padding `p` applied on
/// every axis (spec.md §4.2). They do NOT collide iff they are separated on
/// at least one axis once the padding is accounted for.
#[inline]
pub fn collides_with_padding(a: &Cuboid, b: &Cuboid, padding: f64) -> bool {
    !(a.x_end() + padding <= b.x
        || b.x_end() + padding <= a.x
        || a.y_end() + padding <= b.y
        || b.y_end() + padding <= a.y
        || a.z_end() + padding <= b.z
        || b.z_end() + padding <= a.z)
}

/// One of the four interior corners of the bed, used for rounded-corner
/// exclusion sampling.
#[derive(Clone, Copy, Debug)]
enum Corner {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Corner {
    /// Whether point (px, py) lies in this corner's outer square, i.e. the
    /// quadrant cut off by the arc center.
    fn in_outer_square(self, px: f64, py: f64, cx: f64, cy: f64) -> bool {
        match self {
            Corner::BottomLeft => px < cx && py < cy,
            Corner::BottomRight => px > cx && py < cy,
            Corner::TopLeft => px < cx && py > cy,
            Corner::TopRight => px > cx && py > cy,
        }
    }
}

/// Checks whether a candidate footprint intersects any rounded interior
/// corner's exclusion zone (spec.md §4.2).
///
/// Samples the four corners of the footprint plus the midpoint of each edge
/// (eight points total — a conservative approximation that callers must not
/// sample more sparsely than). `total_margin` is the bed margin plus the
/// settings-level extra margin, and `bed_length`/`bed_width` are the full
/// (unshrunk) bed dimensions.
pub fn intersects_rounded_corner(
    footprint_x: f64,
    footprint_y: f64,
    footprint_length: f64,
    footprint_width: f64,
    bed_length: f64,
    bed_width: f64,
    corner_radius: f64,
    total_margin: f64,
) -> bool {
    if corner_radius <= 0.0 {
        return false;
    }

    let corners = [
        (
            total_margin + corner_radius,
            total_margin + corner_radius,
            Corner::BottomLeft,
        ),
        (
            bed_length - total_margin - corner_radius,
            total_margin + corner_radius,
            Corner::BottomRight,
        ),
        (
            total_margin + corner_radius,
            bed_width - total_margin - corner_radius,
            Corner::TopLeft,
        ),
        (
            bed_length - total_margin - corner_radius,
            bed_width - total_margin - corner_radius,
            Corner::TopRight,
        ),
    ];

    let x0 = footprint_x;
    let x1 = footprint_x + footprint_length;
    let y0 = footprint_y;
    let y1 = footprint_y + footprint_width;
    let xm = footprint_x + footprint_length / 2.0;
    let ym = footprint_y + footprint_width / 2.0;

    let sample_points = [
        (x0, y0),
        (x1, y0),
        (x0, y1),
        (x1, y1),
        (xm, y0),
        (xm, y1),
        (x0, ym),
        (x1, ym),
    ];

    for (px, py) in sample_points {
        for (cx, cy, corner) in corners {
            if !corner.in_outer_square(px, py, cx, cy) {
                continue;
            }
            let dx = px - cx;
            let dy = py - cy;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance > corner_radius {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_1d_basic() {
        assert!((overlap_1d(0.0, 5.0, 3.0, 8.0) - 2.0).abs() < EPSILON_GENERAL);
        assert!((overlap_1d(0.0, 3.0, 5.0, 8.0) - 0.0).abs() < EPSILON_GENERAL);
    }

    #[test]
    fn collides_with_padding_respects_gap() {
        let a = Cuboid::new(0.0, 0.0, 0.0, 10.0, 10.0, 10.0);
        let b = Cuboid::new(10.0, 0.0, 0.0, 10.0, 10.0, 10.0);
        assert!(!collides_with_padding(&a, &b, 0.0));
        assert!(collides_with_padding(&a, &b, 0.5));
    }

    #[test]
    fn collides_with_padding_overlapping() {
        let a = Cuboid::new(0.0, 0.0, 0.0, 10.0, 10.0, 10.0);
        let b = Cuboid::new(5.0, 5.0, 5.0, 10.0, 10.0, 10.0);
        assert!(collides_with_padding(&a, &b, 0.0));
    }

    #[test]
    fn rounded_corner_rejects_outer_square_points() {
        // Bed 100x100, radius 10, no margin. Bottom-left arc centered at (10, 10).
        // A 1x1 footprint sitting right at the origin has its (0,0) corner in
        // the exclusion zone (distance from (10,10) to (0,0) is ~14.1 > 10).
        let hit = intersects_rounded_corner(0.0, 0.0, 1.0, 1.0, 100.0, 100.0, 10.0, 0.0);
        assert!(hit);
    }

    #[test]
    fn rounded_corner_accepts_footprint_inside_arc() {
        // A footprint entirely within the arc radius from the corner center.
        let hit = intersects_rounded_corner(9.5, 9.5, 1.0, 1.0, 100.0, 100.0, 10.0, 0.0);
        assert!(!hit);
    }

    #[test]
    fn rounded_corner_skipped_when_radius_zero() {
        let hit = intersects_rounded_corner(0.0, 0.0, 1.0, 1.0, 100.0, 100.0, 0.0, 0.0);
        assert!(!hit);
    }
}
