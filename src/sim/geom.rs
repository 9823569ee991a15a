//! Segment and sweep geometry
//!
//! The primitives behind swept collision detection: plain parametric
//! segment intersection, and a quadrilateral sweep test that catches a
//! fast-moving rectangle tunneling across a travel segment.

use glam::Vec2;

/// Parametric line-segment intersection test for `p1->p2` vs `p3->p4`.
///
/// Parallel segments (zero determinant) report no intersection; collinear
/// overlap is intentionally not handled.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let d1 = p2 - p1;
    let d2 = p4 - p3;

    let denom = d1.perp_dot(d2);
    if denom.abs() < 1e-6 {
        return false;
    }

    let diff = p3 - p1;
    let t = diff.perp_dot(d2) / denom;
    let u = diff.perp_dot(d1) / denom;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Test the segment `a->b` against the region swept by a rectangle moving
/// from `prev_pos` to `curr_pos` (both centers, `size` = full extents).
///
/// The sweep is approximated by a convex quadrilateral connecting the
/// rectangle's previous and current corners, oriented along the dominant
/// motion axis, and the segment is tested against each of its four edges.
/// A segment lying entirely inside the quad produces no edge crossing;
/// callers pair this with an end-of-step overlap check.
pub fn swept_quad_intersects_segment(
    prev_pos: Vec2,
    curr_pos: Vec2,
    size: Vec2,
    a: Vec2,
    b: Vec2,
) -> bool {
    let half = size * 0.5;
    let delta = curr_pos - prev_pos;

    // Corners ordered tl, tr, br, bl so the quad stays convex
    let quad = if delta.y.abs() >= delta.x.abs() {
        let (top, bot) = if delta.y >= 0.0 {
            (prev_pos, curr_pos)
        } else {
            (curr_pos, prev_pos)
        };
        [
            top - half,
            Vec2::new(top.x + half.x, top.y - half.y),
            bot + half,
            Vec2::new(bot.x - half.x, bot.y + half.y),
        ]
    } else {
        let (left, right) = if delta.x >= 0.0 {
            (prev_pos, curr_pos)
        } else {
            (curr_pos, prev_pos)
        };
        [
            left - half,
            Vec2::new(right.x + half.x, right.y - half.y),
            right + half,
            Vec2::new(left.x - half.x, left.y + half.y),
        ]
    };

    for i in 0..4 {
        if segments_intersect(a, b, quad[i], quad[(i + 1) % 4]) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_crossing() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        ));
    }

    #[test]
    fn test_segments_disjoint() {
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 5.0),
            Vec2::new(10.0, 5.0),
        ));
    }

    #[test]
    fn test_segments_parallel_report_no_hit() {
        // Collinear overlapping segments have a zero determinant
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(15.0, 0.0),
        ));
    }

    #[test]
    fn test_swept_quad_catches_fast_vertical_sweep() {
        // Rectangle jumps from above the segment to below it in one step;
        // neither endpoint rectangle touches the segment
        let seg_a = Vec2::new(-50.0, 100.0);
        let seg_b = Vec2::new(50.0, 100.0);
        let size = Vec2::new(20.0, 40.0);
        let prev = Vec2::new(0.0, 0.0);
        let curr = Vec2::new(0.0, 200.0);
        assert!(swept_quad_intersects_segment(prev, curr, size, seg_a, seg_b));
        // Without the sweep the move would tunnel clean through
        assert!(!swept_quad_intersects_segment(prev, prev, size, seg_a, seg_b));
    }

    #[test]
    fn test_swept_quad_horizontal_sweep() {
        let seg_a = Vec2::new(100.0, -50.0);
        let seg_b = Vec2::new(100.0, 50.0);
        let size = Vec2::new(30.0, 30.0);
        assert!(swept_quad_intersects_segment(
            Vec2::new(200.0, 0.0),
            Vec2::new(0.0, 0.0),
            size,
            seg_a,
            seg_b,
        ));
    }

    #[test]
    fn test_swept_quad_miss() {
        let seg_a = Vec2::new(500.0, 500.0);
        let seg_b = Vec2::new(600.0, 500.0);
        assert!(!swept_quad_intersects_segment(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 100.0),
            Vec2::new(20.0, 40.0),
            seg_a,
            seg_b,
        ));
    }
}
