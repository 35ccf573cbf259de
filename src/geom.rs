//! Geometric primitives used by the intersection preprocessor.

use nalgebra::Vector3;

pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// True iff `point` lies strictly interior to segment `start..end`, within
/// `tolerance`. Points within `tolerance` of either endpoint are treated as
/// already-connected, not as a new intersection.
pub fn point_on_segment(point: Vector3<f64>, start: Vector3<f64>, end: Vector3<f64>, tolerance: f64) -> bool {
    if (point - start).norm() < tolerance || (point - end).norm() < tolerance {
        return false;
    }

    let ab = end - start;
    let len_ab = ab.norm();
    if len_ab < tolerance {
        return false;
    }

    let ap = point - start;
    let t = ap.dot(&ab) / (len_ab * len_ab);
    if t <= tolerance || t >= 1.0 - tolerance {
        return false;
    }

    let closest = start + ab * t;
    (point - closest).norm() < tolerance
}

/// Closest point of approach between two 3D segments, if both parametric
/// coordinates land strictly inside both segments and the segments pass
/// within `tolerance` of each other. Parallel or skew-beyond-tolerance
/// segments return `None`.
pub fn segment_intersection(
    p1: Vector3<f64>,
    p2: Vector3<f64>,
    p3: Vector3<f64>,
    p4: Vector3<f64>,
    tolerance: f64,
) -> Option<Vector3<f64>> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;

    if d1.norm() < tolerance || d2.norm() < tolerance {
        return None;
    }

    let u = d1.cross(&d2);
    let denom = u.norm();
    if denom < tolerance {
        return None;
    }

    let v = p3 - p1;
    let t1 = v.dot(&d2.cross(&u)) / (denom * denom);
    let t2 = v.dot(&d1.cross(&u)) / (denom * denom);

    if t1 > tolerance && t1 < 1.0 - tolerance && t2 > tolerance && t2 < 1.0 - tolerance {
        let c1 = p1 + d1 * t1;
        let c2 = p3 + d2 * t2;
        if (c1 - c2).norm() < tolerance {
            return Some(c1);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_on_segment() {
        let p = Vector3::new(5.0, 0.0, 0.0);
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(10.0, 0.0, 0.0);
        assert!(point_on_segment(p, a, b, DEFAULT_TOLERANCE));
    }

    #[test]
    fn endpoint_is_not_on_segment() {
        let p = Vector3::new(0.0, 0.0, 0.0);
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(10.0, 0.0, 0.0);
        assert!(!point_on_segment(p, a, b, DEFAULT_TOLERANCE));
    }

    #[test]
    fn off_axis_point_is_rejected() {
        let p = Vector3::new(5.0, 0.2, 0.0);
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(10.0, 0.0, 0.0);
        assert!(!point_on_segment(p, a, b, DEFAULT_TOLERANCE));
    }

    #[test]
    fn crossing_segments_intersect_at_midpoint() {
        let p1 = Vector3::new(0.0, 0.0, 0.0);
        let p2 = Vector3::new(10.0, 0.0, 0.0);
        let p3 = Vector3::new(5.0, -5.0, 0.0);
        let p4 = Vector3::new(5.0, 5.0, 0.0);
        let hit = segment_intersection(p1, p2, p3, p4, DEFAULT_TOLERANCE).expect("should intersect");
        assert!((hit - Vector3::new(5.0, 0.0, 0.0)).norm() < 1e-8);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let p1 = Vector3::new(0.0, 0.0, 0.0);
        let p2 = Vector3::new(10.0, 0.0, 0.0);
        let p3 = Vector3::new(0.0, 1.0, 0.0);
        let p4 = Vector3::new(10.0, 1.0, 0.0);
        assert!(segment_intersection(p1, p2, p3, p4, DEFAULT_TOLERANCE).is_none());
    }

    #[test]
    fn skew_segments_beyond_tolerance_do_not_intersect() {
        let p1 = Vector3::new(0.0, 0.0, 0.0);
        let p2 = Vector3::new(10.0, 0.0, 0.0);
        let p3 = Vector3::new(5.0, -5.0, 1.0);
        let p4 = Vector3::new(5.0, 5.0, 1.0);
        assert!(segment_intersection(p1, p2, p3, p4, DEFAULT_TOLERANCE).is_none());
    }
}
