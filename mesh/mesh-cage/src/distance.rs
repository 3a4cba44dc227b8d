//! Point-to-segment and point-to-triangle squared distances.
//!
//! Both queries return squared distances so callers can compare them
//! without a square root.

use nalgebra::{Matrix3, Point3};

/// Below this squared normal length a triangle is treated as a point.
const DEGENERATE_NORMAL_SQ: f64 = 1e-5;

/// Squared distance from `p` to the segment `ab`.
///
/// The projection parameter `t = (a - b)·(p - b) / |a - b|²` is clamped
/// to the segment: `t > 1` measures to `a`, `t < 0` measures to `b`.
///
/// A zero-length segment (`a == b`) is treated as the point `a`.
///
/// # Example
///
/// ```
/// use mesh_cage::point_segment_distance_squared;
/// use nalgebra::Point3;
///
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(2.0, 0.0, 0.0);
///
/// let d = point_segment_distance_squared(&Point3::new(1.0, 3.0, 0.0), &a, &b);
/// assert!((d - 9.0).abs() < 1e-12);
///
/// // Beyond the endpoint: measured to b.
/// let d = point_segment_distance_squared(&Point3::new(3.0, 0.0, 0.0), &a, &b);
/// assert!((d - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn point_segment_distance_squared(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let ab = a - b;
    let len_sq = ab.norm_squared();
    if len_sq < f64::EPSILON {
        return (p - a).norm_squared();
    }

    let t = ab.dot(&(p - b)) / len_sq;
    if t > 1.0 {
        (p - a).norm_squared()
    } else if t < 0.0 {
        (p - b).norm_squared()
    } else {
        (p - (b + ab * t)).norm_squared()
    }
}

/// One-sided squared distance from `p` to the triangle `abc`.
///
/// The front side is the one `n = (b - a) x (c - a)` points into. Points
/// strictly behind the plane get [`f64::INFINITY`]; points on the plane
/// count as in front. For front points the result is the smallest of the
/// three edge distances and, when the projection of `p` lands strictly
/// inside the triangle, the distance to the plane.
///
/// A triangle with a near-zero normal is treated as the point `a`.
///
/// # Example
///
/// ```
/// use mesh_cage::point_triangle_distance_squared;
/// use nalgebra::Point3;
///
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(1.0, 0.0, 0.0);
/// let c = Point3::new(0.0, 1.0, 0.0);
///
/// let front = point_triangle_distance_squared(&Point3::new(0.25, 0.25, 2.0), &a, &b, &c);
/// assert!((front - 4.0).abs() < 1e-12);
///
/// let back = point_triangle_distance_squared(&Point3::new(0.25, 0.25, -2.0), &a, &b, &c);
/// assert!(back.is_infinite());
/// ```
#[must_use]
pub fn point_triangle_distance_squared(
    p: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
) -> f64 {
    let e1 = b - a;
    let e2 = c - a;
    let n = e1.cross(&e2);
    let n_sq = n.norm_squared();

    if n_sq < DEGENERATE_NORMAL_SQ {
        return (p - a).norm_squared();
    }

    let ap = p - a;
    if n.dot(&ap) < 0.0 {
        return f64::INFINITY;
    }

    let mut best = point_segment_distance_squared(p, a, b)
        .min(point_segment_distance_squared(p, b, c))
        .min(point_segment_distance_squared(p, c, a));

    // p - a = u * e1 + v * e2 + k * n
    if let Some(inv) = Matrix3::from_columns(&[e1, e2, n]).try_inverse() {
        let coords = inv * ap;
        let (u, v, k) = (coords.x, coords.y, coords.z);
        if u > 0.0 && v > 0.0 && u + v < 1.0 {
            best = best.min(k * k * n_sq);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> (Point3<f64>, Point3<f64>, Point3<f64>) {
        (
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_segment_interior_projection() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(4.0, 0.0, 0.0);
        let d = point_segment_distance_squared(&Point3::new(1.0, 2.0, 2.0), &a, &b);
        assert_relative_eq!(d, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_clamps_to_endpoints() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        // Past a.
        let d = point_segment_distance_squared(&Point3::new(-2.0, 1.0, 0.0), &a, &b);
        assert_relative_eq!(d, 5.0, epsilon = 1e-12);
        // Past b.
        let d = point_segment_distance_squared(&Point3::new(3.0, 0.0, 1.0), &a, &b);
        assert_relative_eq!(d, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_zero_length() {
        let a = Point3::new(1.0, 1.0, 1.0);
        let d = point_segment_distance_squared(&Point3::new(1.0, 1.0, 4.0), &a, &a);
        assert!(d.is_finite());
        assert_relative_eq!(d, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_front_and_back() {
        let (a, b, c) = unit_triangle();

        let front = point_triangle_distance_squared(&Point3::new(0.0, 0.0, 1.0), &a, &b, &c);
        assert!(front.is_finite());
        assert_relative_eq!(front, 1.0, epsilon = 1e-12);

        let back = point_triangle_distance_squared(&Point3::new(0.0, 0.0, -1.0), &a, &b, &c);
        assert!(back.is_infinite());
    }

    #[test]
    fn test_triangle_interior_uses_plane_distance() {
        let (a, b, c) = unit_triangle();
        let d = point_triangle_distance_squared(&Point3::new(0.2, 0.3, 0.5), &a, &b, &c);
        assert_relative_eq!(d, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_outside_uses_edges() {
        let (a, b, c) = unit_triangle();
        // Projects beyond the hypotenuse; nearest feature is its midpoint.
        let d = point_triangle_distance_squared(&Point3::new(1.0, 1.0, 0.0), &a, &b, &c);
        assert_relative_eq!(d, 0.5, epsilon = 1e-12);
        // Near a vertex, above the plane.
        let d = point_triangle_distance_squared(&Point3::new(2.0, 0.0, 1.0), &a, &b, &c);
        assert_relative_eq!(d, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_on_plane_is_front() {
        let (a, b, c) = unit_triangle();
        let d = point_triangle_distance_squared(&Point3::new(0.25, 0.25, 0.0), &a, &b, &c);
        assert!(d.is_finite());
        assert_relative_eq!(d, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_triangle_measures_to_a() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(2.0, 0.0, 0.0);
        // Would be behind any plane; degenerate triangles have no back side.
        let d = point_triangle_distance_squared(&Point3::new(0.0, 0.0, -3.0), &a, &b, &c);
        assert_relative_eq!(d, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reversed_winding_flips_sides() {
        let (a, b, c) = unit_triangle();
        let p = Point3::new(0.2, 0.2, 1.0);
        assert!(point_triangle_distance_squared(&p, &a, &b, &c).is_finite());
        assert!(point_triangle_distance_squared(&p, &a, &c, &b).is_infinite());
    }
}
