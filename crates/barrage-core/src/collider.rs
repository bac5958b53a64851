//! Collider shapes and pairwise overlap tests.
//!
//! Pure geometry: no object state, no allocation. The matcher calls
//! [`overlap`] once per candidate pair; every test starts with a
//! bounding-circle reject so the exact math only runs for near pairs.
//!
//! Circle and rect pairs are exact (closest-point and separating-axis
//! tests). Pairs involving an ellipse are tested in the frame that maps
//! the ellipse to the unit circle, with the partner reduced to its
//! bounding circle scaled by the geometric mean of the ellipse axes;
//! when the ellipse is circular (`a == b`) this degenerates to the exact
//! circle test.

use std::fmt;

/// Collider shape kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColliderShape {
    /// Circle of radius `a`.
    #[default]
    Circle,
    /// Rectangle with half extents `(a, b)`, oriented by object rotation.
    Rect,
    /// Ellipse with semi-axes `(a, b)`, oriented by object rotation.
    Ellipse,
}

impl fmt::Display for ColliderShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle => write!(f, "circle"),
            Self::Rect => write!(f, "rect"),
            Self::Ellipse => write!(f, "ellipse"),
        }
    }
}

/// A collider: shape kind plus half extents.
///
/// Circles use `a` as the radius and carry `b` unused; rects and
/// ellipses use both. Extents are world units and must be non-negative
/// (the attribute surface rejects negative writes).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Collider {
    /// Shape kind.
    pub shape: ColliderShape,
    /// Half extent / radius / semi-axis a.
    pub a: f64,
    /// Half extent / semi-axis b.
    pub b: f64,
}

impl Collider {
    /// A circle collider of radius `r`.
    pub fn circle(r: f64) -> Self {
        Self {
            shape: ColliderShape::Circle,
            a: r,
            b: r,
        }
    }

    /// A rect collider with half extents `(a, b)`.
    pub fn rect(a: f64, b: f64) -> Self {
        Self {
            shape: ColliderShape::Rect,
            a,
            b,
        }
    }

    /// An ellipse collider with semi-axes `(a, b)`.
    pub fn ellipse(a: f64, b: f64) -> Self {
        Self {
            shape: ColliderShape::Ellipse,
            a,
            b,
        }
    }

    /// Radius of the smallest origin-centred circle containing the shape.
    pub fn bounding_radius(&self) -> f64 {
        match self.shape {
            ColliderShape::Circle => self.a,
            ColliderShape::Rect => self.a.hypot(self.b),
            ColliderShape::Ellipse => self.a.max(self.b),
        }
    }
}

/// World placement of a collider: centre position and rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    /// Centre x.
    pub x: f64,
    /// Centre y.
    pub y: f64,
    /// Rotation in radians.
    pub rot: f64,
}

impl Pose {
    /// A placement at `(x, y)` with rotation `rot`.
    pub fn new(x: f64, y: f64, rot: f64) -> Self {
        Self { x, y, rot }
    }
}

/// Whether two placed colliders overlap.
///
/// Symmetric in its arguments. Touching boundaries count as overlap.
pub fn overlap(a: Collider, pa: Pose, b: Collider, pb: Pose) -> bool {
    let dx = pb.x - pa.x;
    let dy = pb.y - pa.y;
    let reach = a.bounding_radius() + b.bounding_radius();
    if dx * dx + dy * dy > reach * reach {
        return false;
    }
    match (a.shape, b.shape) {
        // For two circles the bounding reject above is already the exact test.
        (ColliderShape::Circle, ColliderShape::Circle) => true,
        (ColliderShape::Rect, ColliderShape::Rect) => obb_obb(a, pa, b, pb),
        (ColliderShape::Circle, ColliderShape::Rect) => circle_obb(pa.x, pa.y, a.a, b, pb),
        (ColliderShape::Rect, ColliderShape::Circle) => circle_obb(pb.x, pb.y, b.a, a, pa),
        (ColliderShape::Ellipse, ColliderShape::Ellipse) => {
            scaled_circle(a, pa, b, pb) || scaled_circle(b, pb, a, pa)
        }
        (ColliderShape::Ellipse, _) => scaled_circle(a, pa, b, pb),
        (_, ColliderShape::Ellipse) => scaled_circle(b, pb, a, pa),
    }
}

/// Rotate `(x, y)` into the frame of a pose centred at `(px, py)` with
/// rotation `rot`.
fn into_frame(x: f64, y: f64, px: f64, py: f64, rot: f64) -> (f64, f64) {
    let (s, c) = rot.sin_cos();
    let tx = x - px;
    let ty = y - py;
    (tx * c + ty * s, ty * c - tx * s)
}

/// Exact circle-vs-oriented-rect test via closest point.
fn circle_obb(cx: f64, cy: f64, r: f64, rect: Collider, rp: Pose) -> bool {
    let (lx, ly) = into_frame(cx, cy, rp.x, rp.y, rp.rot);
    let qx = lx.clamp(-rect.a, rect.a);
    let qy = ly.clamp(-rect.b, rect.b);
    let dx = lx - qx;
    let dy = ly - qy;
    dx * dx + dy * dy <= r * r
}

/// Half projection of an oriented rect onto a unit axis at angle `axis`.
fn half_extent_on_axis(c: Collider, rot: f64, axis: f64) -> f64 {
    let rel = rot - axis;
    c.a * rel.cos().abs() + c.b * rel.sin().abs()
}

/// Exact oriented-rect-vs-oriented-rect test via separating axes.
fn obb_obb(a: Collider, pa: Pose, b: Collider, pb: Pose) -> bool {
    let dx = pb.x - pa.x;
    let dy = pb.y - pa.y;
    let axes = [
        pa.rot,
        pa.rot + std::f64::consts::FRAC_PI_2,
        pb.rot,
        pb.rot + std::f64::consts::FRAC_PI_2,
    ];
    for axis in axes {
        let (s, c) = axis.sin_cos();
        let dist = (dx * c + dy * s).abs();
        let ra = half_extent_on_axis(a, pa.rot, axis);
        let rb = half_extent_on_axis(b, pb.rot, axis);
        if dist > ra + rb {
            return false;
        }
    }
    true
}

/// Ellipse-vs-anything in the frame that maps the ellipse to the unit
/// circle; the partner becomes its bounding circle scaled by the
/// geometric mean of the ellipse axes.
fn scaled_circle(e: Collider, pe: Pose, other: Collider, po: Pose) -> bool {
    if e.a <= 0.0 || e.b <= 0.0 {
        return false;
    }
    let (lx, ly) = into_frame(po.x, po.y, pe.x, pe.y, pe.rot);
    let ux = lx / e.a;
    let uy = ly / e.b;
    let ur = other.bounding_radius() / (e.a * e.b).sqrt();
    let reach = 1.0 + ur;
    ux * ux + uy * uy <= reach * reach
}

// ── Tests ───────────────────────────────────────────────────────────
