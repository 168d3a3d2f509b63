// Full explode / reform / reposition runs against the headless surface.

use heading_burst::config::{LetterConfig, OverlapPolicy};
use heading_burst::letters::orientation::parse_rotation;
use heading_burst::letters::sparkle::{ENHANCED_SPARKLE, MINI_SPARKLE};
use heading_burst::letters::{LetterAnimator, LetterPhase, NBSP};
use heading_burst::random::{Scripted, seeded};
use heading_burst::surface::{Anchor, MemorySurface};

// Past the last settle, reposition and sparkle despawn.
const DONE_MS: f64 = 8_000.0;

fn page(text: &str) -> MemorySurface {
    MemorySurface::new(1000.0, 700.0).with_heading(text, 300.0, 60.0)
}

#[test]
fn hi_decomposes_and_moves_once() {
    let mut s = page("Hi");
    let mut a = LetterAnimator::new(LetterConfig::default(), seeded(7));
    assert_eq!(a.adopt(&mut s), 1);
    assert_eq!(a.heading(0).unwrap().letters.len(), 2);

    assert!(a.activate(0, 0.0, &mut s));
    a.tick(2_199.0, &mut s);
    assert_eq!(s.reposition_count(0), 0);
    a.tick(2_200.0, &mut s);
    assert_eq!(s.reposition_count(0), 1);
    a.tick(DONE_MS, &mut s);
    assert_eq!(s.reposition_count(0), 1);

    let orientation = a.heading(0).unwrap().orientation.unwrap();
    let transform = s.heading(0).node.style("transform").unwrap();
    let angle = parse_rotation(transform).unwrap();
    let (lo, hi) = orientation.kind.angle_range();
    assert!(angle >= lo - 0.01 && angle <= hi + 0.01, "{angle} outside {lo}..{hi}");
}

#[test]
fn finished_activation_leaves_only_color_and_size() {
    for seed in 0..16 {
        let mut s = page("Dog Man");
        let mut a = LetterAnimator::new(LetterConfig::default(), seeded(seed));
        a.adopt(&mut s);
        a.activate(0, 0.0, &mut s);
        a.tick(DONE_MS, &mut s);

        assert!(a.is_idle());
        assert_eq!(a.pending_cues(), 0);
        let heading = a.heading(0).unwrap();
        assert_eq!(heading.in_flight, 0);
        assert_eq!(heading.unsettled, 0);
        for (i, unit) in heading.letters.iter().enumerate() {
            let node = s.letter(0, i);
            assert!(!node.has_class("exploding"), "seed {seed} letter {i}");
            assert!(!node.has_class("reforming"), "seed {seed} letter {i}");
            assert_eq!(unit.phase, LetterPhase::Idle);
            assert_eq!(node.style("color"), unit.color.as_deref());
            let size = unit.font_size_px.map(|v| format!("{v:.2}px"));
            assert_eq!(node.style("font-size"), size.as_deref());
            assert_eq!(node.style("text-shadow"), None);
            assert_eq!(node.style("animation"), None);
        }
        assert!(!s.heading(0).node.has_class("glowing"));
        assert!(!s.heading(0).node.has_class("repositioning"));
        assert_eq!(s.body.style("animation"), None);
    }
}

#[test]
fn text_and_order_survive_an_explosion() {
    let mut s = page("Dog Man");
    let mut a = LetterAnimator::new(LetterConfig::default(), seeded(3));
    a.adopt(&mut s);
    a.activate(0, 0.0, &mut s);
    a.tick(DONE_MS, &mut s);
    let glyphs: Vec<&str> = s.heading(0).letters.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(glyphs, vec!["D", "o", "g", NBSP, "M", "a", "n"]);
    assert_eq!(a.decompose(0, &mut s), 7);
}

#[test]
fn new_position_stays_inside_the_viewport() {
    for seed in 0..32 {
        let mut s = page("Wanderer");
        let mut a = LetterAnimator::new(LetterConfig::default(), seeded(seed));
        a.adopt(&mut s);
        a.activate(0, 0.0, &mut s);
        a.tick(DONE_MS, &mut s);
        let (top, left) = a.heading(0).unwrap().position.unwrap();
        assert!((20.0..=620.0).contains(&top), "seed {seed}: top {top}");
        assert!((20.0..=680.0).contains(&left), "seed {seed}: left {left}");
    }
}

#[test]
fn overlapping_clicks_each_reposition() {
    let mut s = page("Twice");
    let mut a = LetterAnimator::new(LetterConfig::default(), seeded(11));
    a.adopt(&mut s);
    assert!(a.activate(0, 0.0, &mut s));
    assert!(a.activate(0, 500.0, &mut s));
    assert_eq!(a.heading(0).unwrap().in_flight, 2);
    a.tick(2_200.0, &mut s);
    assert_eq!(s.reposition_count(0), 1);
    a.tick(2_700.0, &mut s);
    assert_eq!(s.reposition_count(0), 2);
    a.tick(DONE_MS, &mut s);
    assert_eq!(a.heading(0).unwrap().in_flight, 0);
    assert!(a.is_idle());
}

#[test]
fn suppressed_overlap_moves_once() {
    let mut s = page("Once");
    let cfg = LetterConfig {
        overlap: OverlapPolicy::Suppress,
        ..LetterConfig::default()
    };
    let mut a = LetterAnimator::new(cfg, seeded(5));
    a.adopt(&mut s);
    assert!(a.activate(0, 0.0, &mut s));
    assert!(!a.activate(0, 100.0, &mut s));
    a.tick(DONE_MS, &mut s);
    assert_eq!(s.reposition_count(0), 1);
}

#[test]
fn sparkles_are_cleaned_up() {
    let mut s = page("Shine");
    let mut a = LetterAnimator::new(LetterConfig::default(), seeded(9));
    a.adopt(&mut s);
    a.activate(0, 0.0, &mut s);
    assert_eq!(s.spawned_with_class(ENHANCED_SPARKLE), 30);
    a.tick(DONE_MS, &mut s);
    assert!(s.live.is_empty());
}

#[test]
fn detached_sparkle_is_skipped() {
    let mut s = page("Gone");
    let mut a = LetterAnimator::new(LetterConfig::default(), seeded(13));
    a.adopt(&mut s);
    a.activate(0, 0.0, &mut s);
    let first = s.spawned[0].id;
    s.detach(first);
    a.tick(DONE_MS, &mut s);
    assert!(s.live.is_empty());
    assert!(a.is_idle());
}

#[test]
fn unknown_heading_is_ignored() {
    let mut s = page("Only");
    let mut a = LetterAnimator::new(LetterConfig::default(), seeded(1));
    a.adopt(&mut s);
    assert!(!a.activate(4, 0.0, &mut s));
    assert_eq!(a.pending_cues(), 0);
}

#[test]
fn suppress_holds_until_the_last_letter_settles() {
    let mut s = page("Hell Watcher");
    let cfg = LetterConfig {
        overlap: OverlapPolicy::Suppress,
        ..LetterConfig::default()
    };
    let mut a = LetterAnimator::new(cfg, seeded(17));
    a.adopt(&mut s);
    assert!(a.activate(0, 0.0, &mut s));
    a.tick(2_300.0, &mut s);
    assert_eq!(s.reposition_count(0), 1);
    assert_eq!(a.heading(0).unwrap().letters[11].phase, LetterPhase::Reforming);
    let before = s.letter(0, 11).style("--random-x").map(str::to_string);
    assert!(!a.activate(0, 2_300.0, &mut s));
    assert_eq!(s.letter(0, 11).style("--random-x").map(str::to_string), before);

    // Letter 11 settles at 1000 + 40 * 11 + 1000 ms.
    a.tick(2_440.0, &mut s);
    assert_eq!(a.heading(0).unwrap().unsettled, 0);
    assert!(a.activate(0, 2_500.0, &mut s));
}

fn ambient_only_sparkles() -> LetterConfig {
    LetterConfig {
        ambient_flicker_chance: 0.0,
        ambient_sparkle_chance: 1.0,
        ..LetterConfig::default()
    }
}

#[test]
fn ambient_sparkles_land_on_an_existing_heading() {
    let mut s = MemorySurface::new(1000.0, 700.0);
    for text in ["One", "Two", "Three", "Four", "Five"] {
        s = s.with_heading(text, 200.0, 40.0);
    }
    // Low draws: first slot, fewest sparkles.
    let mut a = LetterAnimator::new(ambient_only_sparkles(), Scripted::constant(0.0));
    a.adopt(&mut s);
    a.start_ambient();
    a.tick(2_000.0, &mut s);
    assert_eq!(s.spawned_with_class(MINI_SPARKLE), 3);
    assert!(s.spawned.iter().all(|r| r.anchor == Anchor::Heading(0)));

    // High draws: last slot, most sparkles.
    let mut s2 = s.clone();
    s2.spawned.clear();
    let mut b = LetterAnimator::new(ambient_only_sparkles(), Scripted::constant(0.99));
    b.adopt(&mut s2);
    b.start_ambient();
    b.tick(2_000.0, &mut s2);
    assert_eq!(s2.spawned_with_class(MINI_SPARKLE), 6);
    assert!(s2.spawned.iter().all(|r| r.anchor == Anchor::Heading(4)));
}

#[test]
fn ambient_sparkles_skip_an_empty_slot() {
    let mut s = page("Lonely");
    let mut a = LetterAnimator::new(ambient_only_sparkles(), Scripted::constant(0.99));
    a.adopt(&mut s);
    a.start_ambient();
    a.tick(2_000.0, &mut s);
    assert_eq!(s.spawned_with_class(MINI_SPARKLE), 0);
    assert_eq!(a.pending_cues(), 1);
}

#[test]
fn ambient_sparkle_bursts_stay_in_range() {
    for seed in 0..20 {
        let mut s = page("Glitter");
        let mut a = LetterAnimator::new(ambient_only_sparkles(), seeded(seed));
        a.adopt(&mut s);
        a.start_ambient();
        a.tick(2_000.0, &mut s);
        let n = s.spawned_with_class(MINI_SPARKLE);
        assert!(n == 0 || (3..=6).contains(&n), "seed {seed}: {n}");
    }
}

#[test]
fn inverted_flicker_range_does_not_panic() {
    let mut s = page("Odd");
    let cfg = LetterConfig {
        flicker_min: 8,
        flicker_max: 2,
        ..LetterConfig::default()
    };
    let mut a = LetterAnimator::new(cfg, seeded(2));
    a.adopt(&mut s);
    assert!(a.activate(0, 0.0, &mut s));
    a.tick(DONE_MS, &mut s);
    assert!(a.is_idle());
    assert!(a.heading(0).unwrap().letters.iter().all(|u| u.phase == LetterPhase::Idle));
}
