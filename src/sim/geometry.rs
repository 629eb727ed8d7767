//! Geometry kernel for convex polygons
//!
//! Polygons are plain corner slices wound counter-clockwise. Every function is
//! pure and returns a neutral value (zero, `false`) for degenerate input rather
//! than letting NaN or infinity escape.

use glam::Vec2;

use crate::consts::EPSILON;

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.dot(b)
}

/// Z component of the 3-D cross product of `a` and `b`
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// `v` rotated a quarter turn counter-clockwise: `(-v.y, v.x)`
#[inline]
pub fn perp(v: Vec2) -> Vec2 {
    v.perp()
}

/// Consecutive `(curr, next)` corner pairs, closing back onto the first corner
pub fn edges(vertices: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    vertices
        .iter()
        .copied()
        .zip(vertices.iter().copied().cycle().skip(1))
}

/// Check whether `p` lies within roughly one unit of the segment `v0 -> v1`
///
/// The projection of `p - v0` must land inside the segment and the squared
/// cross product (area of the parallelogram spanned with the segment) must not
/// exceed `|v1 - v0|²`.
pub fn point_on_segment(p: Vec2, v0: Vec2, v1: Vec2) -> bool {
    let dv = v1 - v0;
    let q = p - v0;
    let norm_dv2 = dv.length_squared();

    if norm_dv2 <= EPSILON {
        return false; // Degenerate segment
    }

    let t = dot(q, dv);
    let s = cross(q, dv);
    t >= 0.0 && t <= norm_dv2 && s * s <= norm_dv2 * (1.0 + EPSILON)
}

/// Check whether `p` lies inside the triangle `v0, v1, v2` (either winding)
pub fn point_on_triangle(p: Vec2, v0: Vec2, v1: Vec2, v2: Vec2) -> bool {
    let w1 = v1 - v0;
    let w2 = v2 - v0;
    let q = p - v0;

    let det = cross(w1, w2);
    if det.abs() < EPSILON {
        return false;
    }

    // Invert the edge matrix and check for an image inside the unit simplex
    let inv_det = 1.0 / det;
    let x = cross(q, w2) * inv_det;
    let y = cross(w1, q) * inv_det;
    x >= 0.0 && y >= 0.0 && x + y <= 1.0
}

/// Check whether segments `p0 -> p1` and `q0 -> q1` intersect (endpoints included)
///
/// Collinear segments intersect when their spans overlap; a zero-length
/// segment behaves as a point.
pub fn segment_on_segment(p0: Vec2, p1: Vec2, q0: Vec2, q1: Vec2) -> bool {
    // Solve p0 + a*dp == q0 + b*dq and require a, b in [0, 1]
    let dp = p1 - p0;
    let dq = q1 - q0;
    let r = q0 - p0;

    let mut s = cross(r, dq);
    let mut t = cross(r, dp);
    let mut u = cross(dp, dq);

    // Parallel relative to the segment lengths, not an absolute threshold
    if u * u <= EPSILON * dp.length_squared() * dq.length_squared() {
        return collinear_overlap(p0, p1, q0, q1);
    }
    if u < 0.0 {
        s = -s;
        t = -t;
        u = -u;
    }
    s >= 0.0 && t >= 0.0 && s <= u && t <= u
}

/// Parallel segments touch only when all four points share a line and the
/// projected spans overlap
fn collinear_overlap(p0: Vec2, p1: Vec2, q0: Vec2, q1: Vec2) -> bool {
    let (base, axis) = if (p1 - p0).length_squared() >= (q1 - q0).length_squared() {
        (p0, p1 - p0)
    } else {
        (q0, q1 - q0)
    };
    let norm = axis.length_squared();
    if norm <= EPSILON {
        // Both segments are points
        return p0.distance_squared(q0) <= EPSILON;
    }

    let on_line = |w: Vec2| {
        let off = cross(w - base, axis);
        off * off <= EPSILON * norm * norm
    };
    if ![p0, p1, q0, q1].into_iter().all(on_line) {
        return false;
    }

    let span = |a: Vec2, b: Vec2| {
        let (ta, tb) = (dot(a - base, axis), dot(b - base, axis));
        (ta.min(tb), ta.max(tb))
    };
    let (p_min, p_max) = span(p0, p1);
    let (q_min, q_max) = span(q0, q1);
    p_min.max(q_min) <= p_max.min(q_max)
}

/// Zeroth area moment: twice the enclosed area (always non-negative)
pub fn polygon_area_moment_0(vertices: &[Vec2]) -> f32 {
    edges(vertices)
        .map(|(curr, next)| cross(curr, next))
        .sum::<f32>()
        .abs()
}

/// First area moment normalised by area: the centroid
pub fn polygon_area_moment_1(vertices: &[Vec2]) -> Vec2 {
    let mut moment_1 = Vec2::ZERO;
    let mut denominator = 0.0;

    for (curr, next) in edges(vertices) {
        let factor = cross(curr, next);
        moment_1 += (curr + next) * factor;
        denominator += factor;
    }

    if denominator.abs() <= EPSILON {
        return Vec2::ZERO;
    }
    moment_1 / (3.0 * denominator)
}

/// Second area moment about the origin, normalised by area
///
/// Multiply by density times area for a mass moment; the body model uses
/// `density * moment_2` directly.
pub fn polygon_area_moment_2(vertices: &[Vec2]) -> f32 {
    let mut moment_2 = 0.0;
    let mut denominator = 0.0;

    for (curr, next) in edges(vertices) {
        let factor = cross(curr, next);
        moment_2 += factor * (curr.length_squared() + dot(curr, next) + next.length_squared());
        denominator += factor;
    }

    if denominator.abs() <= EPSILON {
        return 0.0;
    }
    moment_2 / (6.0 * denominator)
}

/// Check whether some edge normal of `a` separates `b` from it
///
/// `a` must be wound counter-clockwise. Polygons with fewer than three corners
/// (or an empty `b`) count as separated.
pub fn is_axis_separate(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.len() < 3 || b.is_empty() {
        return true;
    }

    edges(a).any(|(curr, next)| {
        // Inward normal for counter-clockwise winding
        let normal = perp(next - curr);
        let base = dot(normal, curr);
        b.iter().all(|&v| dot(normal, v) < base)
    })
}

/// Separating-axis test: convex polygons intersect iff no edge normal of
/// either polygon separates them. Touching counts as intersecting.
pub fn polygon_on_polygon(a: &[Vec2], b: &[Vec2]) -> bool {
    !is_axis_separate(a, b) && !is_axis_separate(b, a)
}
