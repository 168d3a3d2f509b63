// Wild-colors burst and pulse behavior against the headless surface.

use heading_burst::backdrop::burst::{FLASH, PARTICLE, RING};
use heading_burst::backdrop::{Backdrop, COLOR_SEQUENCE};
use heading_burst::config::BackdropConfig;
use heading_burst::random::seeded;
use heading_burst::surface::{MemorySurface, Point, TargetKind};

fn setup(seed: u64) -> (MemorySurface, Backdrop<rand_chacha::ChaCha8Rng>) {
    let mut s = MemorySurface::new(1200.0, 800.0);
    let mut b = Backdrop::new(BackdropConfig::default(), seeded(seed));
    b.start(&mut s);
    (s, b)
}

const CENTER: Point = Point { x: 600.0, y: 400.0 };

#[test]
fn second_trigger_while_busy_creates_nothing() {
    let (mut s, mut b) = setup(21);
    assert!(b.trigger_wild_colors(CENTER, 0.0, &mut s));
    assert_eq!(s.spawned_with_class(PARTICLE), 60);
    assert_eq!(s.spawned_with_class(RING), 3);
    assert_eq!(s.spawned_with_class(FLASH), 3);
    let end = b.background();

    b.tick(1_500.0, &mut s);
    let history = s.background_history.len();
    let spawned = s.spawned.len();
    assert!(!b.trigger_wild_colors(Point { x: 5.0, y: 5.0 }, 1_500.0, &mut s));
    assert_eq!(s.spawned.len(), spawned);
    assert_eq!(s.spawned_with_class(PARTICLE), 60);
    assert_eq!(s.background_history.len(), history);
    assert_eq!(b.background(), end);
}

#[test]
fn busy_clears_after_the_sequence() {
    let (mut s, mut b) = setup(22);
    b.trigger_wild_colors(CENTER, 0.0, &mut s);
    b.tick(2_999.0, &mut s);
    assert!(b.is_busy());
    b.tick(3_000.0, &mut s);
    assert!(!b.is_busy());
    assert!(b.trigger_wild_colors(CENTER, 3_100.0, &mut s));
    assert_eq!(s.spawned_with_class(PARTICLE), 120);
}

#[test]
fn stepped_colors_follow_the_sequence() {
    let (mut s, mut b) = setup(23);
    let before = s.background_history.len();
    b.trigger_wild_colors(CENTER, 0.0, &mut s);
    b.tick(3_000.0, &mut s);
    let steps = &s.background_history[before..before + COLOR_SEQUENCE.len()];
    assert_eq!(steps, COLOR_SEQUENCE);
    let end = b.background().unwrap().to_string();
    assert_eq!(s.body.style("background-color"), Some(end.as_str()));
}

#[test]
fn every_decoration_is_removed() {
    let (mut s, mut b) = setup(24);
    b.trigger_wild_colors(CENTER, 0.0, &mut s);
    assert_eq!(s.live.len(), 66);
    b.tick(10_000.0, &mut s);
    assert!(s.live.is_empty());
    assert_eq!(s.body.style("animation"), None);
    assert_eq!(b.pending_cues(), 0);
}

#[test]
fn particles_start_at_the_pointer() {
    let (mut s, mut b) = setup(25);
    b.trigger_wild_colors(Point { x: 123.0, y: 45.0 }, 0.0, &mut s);
    let particle = s
        .spawned
        .iter()
        .find(|r| r.decoration.class == PARTICLE)
        .unwrap();
    assert!(particle.decoration.style.contains("left: 123"));
    assert!(particle.decoration.style.contains("top: 45"));
}

#[test]
fn pointer_routing_respects_targets() {
    let (mut s, mut b) = setup(26);
    assert!(!b.on_double_click(TargetKind::Heading, CENTER, 0.0, &mut s));
    assert!(!b.on_context_menu(TargetKind::Letter, CENTER, 0.0, &mut s));
    assert!(!b.is_busy());
    assert!(b.on_context_menu(TargetKind::Body, CENTER, 0.0, &mut s));
    assert!(b.is_busy());
    assert!(!b.on_double_click(TargetKind::Body, CENTER, 100.0, &mut s));
}

#[test]
fn pulse_toggles_body_class() {
    let (mut s, mut b) = setup(27);
    assert!(b.on_click(TargetKind::Body, 0.0, &mut s));
    assert!(s.body.has_class("pulsing"));
    b.tick(500.0, &mut s);
    assert!(!s.body.has_class("pulsing"));
}
