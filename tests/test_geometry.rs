use swarm::geometry::*;

const EPS: f32 = 1e-5;

// ── Vec2 ──────────────────────────────────────────────────────────────────────

#[test]
fn vec2_add_sub_scale() {
    let a = Vec2::new(3.0, 4.0);
    let b = Vec2::new(1.0, -2.0);
    assert_eq!(a.add(b), Vec2::new(4.0, 2.0));
    assert_eq!(a.sub(b), Vec2::new(2.0, 6.0));
    assert_eq!(a.scale(2.0), Vec2::new(6.0, 8.0));
}

#[test]
fn vec2_length() {
    assert!((Vec2::new(3.0, 4.0).length() - 5.0).abs() < EPS);
    assert_eq!(Vec2::ZERO.length(), 0.0);
}

#[test]
fn normalized_is_unit_length() {
    let v = Vec2::new(10.0, -7.0).normalized();
    assert!((v.length() - 1.0).abs() < EPS);
}

#[test]
fn normalized_preserves_direction() {
    let v = Vec2::new(3.0, 4.0).normalized();
    assert!((v.x - 0.6).abs() < EPS);
    assert!((v.y - 0.8).abs() < EPS);
}

#[test]
fn normalized_zero_vector_is_zero() {
    // Aiming at your own position must not produce NaN
    assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
}

// ── Rect overlap ──────────────────────────────────────────────────────────────

#[test]
fn rects_overlap_when_intersecting() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn rects_do_not_overlap_when_apart() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(20.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&b));
}

#[test]
fn rects_touching_edges_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&b));
}

#[test]
fn rect_contained_in_other_overlaps() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

// ── Circle vs rect ────────────────────────────────────────────────────────────

#[test]
fn circle_center_inside_rect_overlaps() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(circle_overlaps_rect(Vec2::new(5.0, 5.0), 1.0, &r));
}

#[test]
fn circle_near_edge_overlaps_within_radius() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    // Center 14 units right of the rect's right edge, radius 15
    assert!(circle_overlaps_rect(Vec2::new(24.0, 5.0), 15.0, &r));
}

#[test]
fn circle_far_away_does_not_overlap() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!circle_overlaps_rect(Vec2::new(26.0, 5.0), 15.0, &r));
}

#[test]
fn circle_near_corner_uses_true_distance() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    // 12 units diagonally off the corner: sqrt(72) ≈ 8.49
    assert!(circle_overlaps_rect(Vec2::new(16.0, 16.0), 9.0, &r));
    assert!(!circle_overlaps_rect(Vec2::new(16.0, 16.0), 8.0, &r));
}
