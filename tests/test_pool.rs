use swarm::entities::Entity;
use swarm::geometry::{Rect, Vec2};
use swarm::pool::Pool;

fn make_entity(x: f32) -> Entity {
    Entity {
        health: 1,
        speed: 0.0,
        body: Rect::new(x, 0.0, 10.0, 10.0),
        direction: Vec2::ZERO,
    }
}

// ── Allocation ────────────────────────────────────────────────────────────────

#[test]
fn allocate_fills_first_free_slot() {
    let mut pool = Pool::new(4, 4);
    assert_eq!(pool.allocate(make_entity(0.0)), Some(0));
    assert_eq!(pool.allocate(make_entity(1.0)), Some(1));
    pool.release(0);
    // Slot 0 is free again and must be reused before slot 2
    assert_eq!(pool.allocate(make_entity(2.0)), Some(0));
}

#[test]
fn allocate_fails_silently_at_watermark() {
    let mut pool = Pool::new(4, 1);
    assert_eq!(pool.allocate(make_entity(0.0)), Some(0));
    // Second allocation is a no-op: slot 1 exists physically but is
    // above the active watermark
    assert_eq!(pool.allocate(make_entity(1.0)), None);
    assert_eq!(pool.active_count(), 1);
}

#[test]
fn occupancy_never_exceeds_watermark() {
    let mut pool = Pool::new(10, 3);
    for i in 0..10 {
        pool.allocate(make_entity(i as f32));
    }
    assert_eq!(pool.active_count(), 3);
    assert!(pool.active_count() <= pool.watermark());
    assert!(pool.watermark() <= pool.capacity());
}

// ── Release ───────────────────────────────────────────────────────────────────

#[test]
fn release_frees_the_slot() {
    let mut pool = Pool::new(2, 2);
    pool.allocate(make_entity(0.0));
    assert!(pool.release(0));
    assert!(pool.get(0).is_none());
    assert_eq!(pool.active_count(), 0);
}

#[test]
fn releasing_empty_slot_is_noop() {
    let mut pool = Pool::new(2, 2);
    assert!(!pool.release(0));
    pool.allocate(make_entity(0.0));
    assert!(pool.release(0));
    assert!(!pool.release(0)); // double release
}

#[test]
fn releasing_out_of_range_is_noop() {
    let mut pool = Pool::new(2, 2);
    assert!(!pool.release(99));
}

// ── Traversal ─────────────────────────────────────────────────────────────────

#[test]
fn iter_active_skips_empty_slots_in_index_order() {
    let mut pool = Pool::new(5, 5);
    pool.allocate(make_entity(0.0));
    pool.allocate(make_entity(1.0));
    pool.allocate(make_entity(2.0));
    pool.release(1);

    let seen: Vec<usize> = pool.iter_active().map(|(i, _)| i).collect();
    assert_eq!(seen, vec![0, 2]);
}

#[test]
fn iter_active_mut_allows_in_place_updates() {
    let mut pool = Pool::new(3, 3);
    pool.allocate(make_entity(0.0));
    pool.allocate(make_entity(0.0));
    for (_, e) in pool.iter_active_mut() {
        e.body.x += 5.0;
    }
    assert!(pool.iter_active().all(|(_, e)| e.body.x == 5.0));
}

// ── Clear ─────────────────────────────────────────────────────────────────────

#[test]
fn clear_releases_everything_and_reports_count() {
    let mut pool = Pool::new(5, 5);
    for i in 0..3 {
        pool.allocate(make_entity(i as f32));
    }
    assert_eq!(pool.clear(), 3);
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.clear(), 0);
}

// ── Watermark ─────────────────────────────────────────────────────────────────

#[test]
fn raise_watermark_opens_a_slot() {
    let mut pool = Pool::new(3, 1);
    pool.allocate(make_entity(0.0));
    assert_eq!(pool.allocate(make_entity(1.0)), None);
    assert!(pool.raise_watermark());
    assert_eq!(pool.allocate(make_entity(1.0)), Some(1));
}

#[test]
fn raise_watermark_clamps_at_capacity() {
    let mut pool = Pool::new(2, 1);
    assert!(pool.raise_watermark());
    assert!(!pool.raise_watermark()); // already at capacity
    assert_eq!(pool.watermark(), 2);
}

#[test]
fn construction_clamps_watermark_to_capacity() {
    let pool = Pool::new(2, 10);
    assert_eq!(pool.watermark(), 2);
}

#[test]
fn reset_watermark_shrinks_active_range() {
    let mut pool = Pool::new(10, 7);
    pool.reset_watermark(1);
    assert_eq!(pool.watermark(), 1);
    pool.reset_watermark(99); // clamped
    assert_eq!(pool.watermark(), 10);
}
