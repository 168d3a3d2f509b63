//! Letter animator: splits headings into per-letter spans and runs the
//! explode → reform → settle sequence when a heading is clicked, then drops
//! the heading somewhere else on screen at a new angle.
//!
//! All timing goes through the animator's own [`Timeline`]; nothing here
//! touches the browser directly. Letter state is tracked per unit so overlapping
//! clicks behave the way the page always has: a second click layers another
//! independent sequence over the first (see [`OverlapPolicy`]).

pub mod orientation;
pub mod palette;
pub mod sparkle;

use tracing::{debug, info};

use crate::config::{LetterConfig, OverlapPolicy};
use crate::random::RandomSource;
use crate::surface::{Anchor, DecorationId, HeadingId, LetterGlyph, Surface, Viewport};
use crate::timeline::Timeline;

use orientation::Orientation;
use palette::{BRIGHT, PALETTES};

pub const NBSP: &str = "\u{00A0}";

// --- Letter units -------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterPhase {
    Idle,
    Exploding,
    Reforming,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LetterUnit {
    pub glyph: String,
    pub delay_s: f64,
    pub phase: LetterPhase,
    /// Color and size left behind by the last reform.
    pub color: Option<String>,
    pub font_size_px: Option<f64>,
}

/// One unit per `char`, whitespace replaced by a non-breaking space.
pub fn split_letters(text: &str, delay_step_s: f64) -> Vec<LetterUnit> {
    text.chars()
        .enumerate()
        .map(|(i, c)| LetterUnit {
            glyph: if c.is_whitespace() {
                NBSP.to_string()
            } else {
                c.to_string()
            },
            delay_s: i as f64 * delay_step_s,
            phase: LetterPhase::Idle,
            color: None,
            font_size_px: None,
        })
        .collect()
}

#[derive(Clone, Debug, Default)]
pub struct Heading {
    pub text: String,
    pub letters: Vec<LetterUnit>,
    /// Activations whose reposition has not fired yet.
    pub in_flight: u32,
    /// Letters scheduled to reform that have not settled yet.
    pub unsettled: u32,
    pub position: Option<(f64, f64)>,
    pub orientation: Option<Orientation>,
}

// --- Cues ----------------------------------------------------------------------

/// Random values drawn for one letter at click time.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Burst {
    final_size: f64,
}

#[derive(Clone, Debug, PartialEq)]
enum LetterCue {
    Explode { heading: HeadingId, letter: usize },
    ShakeEnd { heading: HeadingId, letter: usize },
    Reform { heading: HeadingId, letter: usize, palette: usize, burst: Burst },
    Flicker { heading: HeadingId, letter: usize, palette: usize, base_size: f64, hold_ms: f64 },
    FlickerEnd { heading: HeadingId, letter: usize, base_size: f64 },
    Settle { heading: HeadingId, letter: usize },
    Reposition { heading: HeadingId },
    RepositionEnd { heading: HeadingId },
    FlashEnd { heading: HeadingId, letter: usize, restore: String },
    BodyShakeEnd,
    Despawn(DecorationId),
    Ambient,
}

// --- Animator ------------------------------------------------------------------

pub struct LetterAnimator<R: RandomSource> {
    config: LetterConfig,
    rng: R,
    timeline: Timeline<LetterCue>,
    headings: Vec<Heading>,
    ambient_running: bool,
}

impl<R: RandomSource> LetterAnimator<R> {
    pub fn new(config: LetterConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            timeline: Timeline::default(),
            headings: Vec::new(),
            ambient_running: false,
        }
    }

    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn heading(&self, heading: HeadingId) -> Option<&Heading> {
        self.headings.get(heading)
    }

    pub fn pending_cues(&self) -> usize {
        self.timeline.pending()
    }

    /// No explosion work left; the ambient loop's own cue does not count.
    pub fn is_idle(&self) -> bool {
        self.timeline.pending() <= usize::from(self.ambient_running)
    }

    /// Register every heading the surface exposes and split each into letters.
    pub fn adopt(&mut self, surface: &mut impl Surface) -> usize {
        let count = surface.heading_count();
        self.headings = (0..count).map(|_| Heading::default()).collect();
        for h in 0..count {
            self.decompose(h, surface);
        }
        count
    }

    /// Rebuild the heading's letter units from its current text. Returns the unit count.
    pub fn decompose(&mut self, heading: HeadingId, surface: &mut impl Surface) -> usize {
        if heading >= self.headings.len() {
            self.headings.resize_with(heading + 1, Heading::default);
        }
        let text = surface.heading_text(heading);
        let letters = split_letters(&text, self.config.letter_delay_step_s);
        let glyphs: Vec<LetterGlyph<'_>> = letters
            .iter()
            .map(|l| LetterGlyph {
                text: &l.glyph,
                delay_s: l.delay_s,
            })
            .collect();
        surface.render_letters(heading, &glyphs);
        let h = &mut self.headings[heading];
        h.text = text;
        h.letters = letters;
        h.letters.len()
    }

    /// Fire every cue due at or before `now`.
    pub fn tick(&mut self, now: f64, surface: &mut impl Surface) {
        while let Some(cue) = self.timeline.pop_due(now) {
            self.apply(cue, surface);
        }
        self.timeline.finish(now);
    }

    /// Explode the heading's letters. Returns `false` when the click was ignored.
    pub fn activate(&mut self, heading: HeadingId, now: f64, surface: &mut impl Surface) -> bool {
        self.tick(now, surface);
        let Some(h) = self.headings.get(heading) else {
            return false;
        };
        let busy = h.in_flight > 0 || h.unsettled > 0;
        if self.config.overlap == OverlapPolicy::Suppress && busy {
            debug!(heading, "explosion already running; click ignored");
            return false;
        }
        let letter_count = h.letters.len();
        let palette = self.rng.index(PALETTES.len());
        let colors = &PALETTES[palette];

        surface.toggle_heading_class(heading, "glowing", true);
        self.spawn_sparkles(heading, surface);
        surface.set_body_style("animation", "letterShake 0.4s ease-out");
        self.timeline
            .schedule(self.config.body_shake_ms, LetterCue::BodyShakeEnd);

        let c = &self.config;
        for i in 0..letter_count {
            let dx = self.rng.signed(c.displacement_span_px);
            let dy = self.rng.signed(c.displacement_span_px);
            let rotation = self.rng.signed(c.rotation_span_deg);
            let base = surface
                .letter_font_size(heading, i)
                .unwrap_or(c.fallback_font_px);
            let explosion_size = base * self.rng.between(c.explosion_scale.lo, c.explosion_scale.hi);
            let final_size = base * self.rng.between(c.final_scale.lo, c.final_scale.hi);
            let glow = colors[self.rng.index(colors.len())];

            surface.set_letter_style(heading, i, "--random-x", &px(dx));
            surface.set_letter_style(heading, i, "--random-y", &px(dy));
            surface.set_letter_style(heading, i, "--random-rotation", &deg(rotation));
            surface.set_letter_style(heading, i, "--explosion-size", &px(explosion_size));
            surface.set_letter_style(heading, i, "--final-size", &px(final_size));
            surface.set_letter_style(heading, i, "--glow-color", glow);

            let offset = i as f64;
            self.timeline.schedule(
                offset * c.explode_stagger_ms,
                LetterCue::Explode { heading, letter: i },
            );
            self.timeline.schedule(
                c.explode_hold_ms + offset * c.reform_stagger_ms,
                LetterCue::Reform {
                    heading,
                    letter: i,
                    palette,
                    burst: Burst { final_size },
                },
            );
        }
        self.timeline
            .schedule(self.config.reposition_after_ms, LetterCue::Reposition { heading });
        let h = &mut self.headings[heading];
        h.in_flight += 1;
        h.unsettled += letter_count as u32;
        true
    }

    /// Start the low-probability ambient flourish loop.
    pub fn start_ambient(&mut self) {
        if self.ambient_running {
            return;
        }
        self.ambient_running = true;
        self.timeline
            .schedule(self.config.ambient_interval_ms, LetterCue::Ambient);
    }

    fn spawn_sparkles(&mut self, heading: HeadingId, surface: &mut impl Surface) {
        let rect = surface.heading_rect(heading);
        for _ in 0..self.config.sparkle_count {
            let s = sparkle::enhanced(rect, &mut self.rng);
            let id = surface.spawn(Anchor::Heading(heading), &s.decoration);
            self.timeline.schedule(s.lifetime_ms, LetterCue::Despawn(id));
        }
    }

    fn spawn_mini_sparkles(&mut self, heading: HeadingId, surface: &mut impl Surface) {
        let rect = surface.heading_rect(heading);
        let count = 3 + self.rng.below(4);
        for _ in 0..count {
            let s = sparkle::mini(rect, &mut self.rng);
            let id = surface.spawn(Anchor::Heading(heading), &s.decoration);
            self.timeline.schedule(s.lifetime_ms, LetterCue::Despawn(id));
        }
    }

    fn release_letter(&mut self, heading: HeadingId) {
        if let Some(h) = self.headings.get_mut(heading) {
            h.unsettled = h.unsettled.saturating_sub(1);
        }
    }

    fn letter_mut(&mut self, heading: HeadingId, letter: usize) -> Option<&mut LetterUnit> {
        self.headings.get_mut(heading)?.letters.get_mut(letter)
    }

    fn apply(&mut self, cue: LetterCue, surface: &mut impl Surface) {
        match cue {
            LetterCue::Explode { heading, letter } => {
                let Some(unit) = self.letter_mut(heading, letter) else {
                    return;
                };
                unit.phase = LetterPhase::Exploding;
                surface.toggle_letter_class(heading, letter, "exploding", true);
                surface.set_letter_style(heading, letter, "animation", "individualLetterShake 0.3s ease-out");
                self.timeline
                    .schedule(self.config.letter_shake_ms, LetterCue::ShakeEnd { heading, letter });
            }
            LetterCue::ShakeEnd { heading, letter } => {
                surface.set_letter_style(heading, letter, "animation", "");
            }
            LetterCue::Reform {
                heading,
                letter,
                palette,
                burst,
            } => self.reform(heading, letter, palette, burst, surface),
            LetterCue::Flicker {
                heading,
                letter,
                palette,
                base_size,
                hold_ms,
            } => {
                let colors = &PALETTES[palette];
                let color = colors[self.rng.index(colors.len())];
                let glow = self
                    .rng
                    .between(self.config.flicker_glow_px.lo, self.config.flicker_glow_px.hi);
                let scale = self
                    .rng
                    .between(self.config.flicker_scale.lo, self.config.flicker_scale.hi);
                let Some(unit) = self.letter_mut(heading, letter) else {
                    return;
                };
                unit.color = Some(color.to_string());
                surface.set_letter_style(heading, letter, "color", color);
                surface.set_letter_style(
                    heading,
                    letter,
                    "text-shadow",
                    &format!(
                        "0 0 {:.1}px {color}, 0 0 {:.1}px {color}, 0 0 {:.1}px {color}",
                        glow,
                        glow * 1.5,
                        glow * 2.0
                    ),
                );
                surface.set_letter_style(heading, letter, "font-size", &px(base_size * scale));
                self.timeline.schedule(
                    hold_ms,
                    LetterCue::FlickerEnd {
                        heading,
                        letter,
                        base_size,
                    },
                );
            }
            LetterCue::FlickerEnd {
                heading,
                letter,
                base_size,
            } => {
                surface.set_letter_style(heading, letter, "text-shadow", "");
                surface.set_letter_style(heading, letter, "font-size", &px(base_size));
            }
            LetterCue::Settle { heading, letter } => {
                self.release_letter(heading);
                let Some(unit) = self.letter_mut(heading, letter) else {
                    return;
                };
                if unit.phase == LetterPhase::Reforming {
                    unit.phase = LetterPhase::Idle;
                }
                surface.toggle_letter_class(heading, letter, "reforming", false);
            }
            LetterCue::Reposition { heading } => {
                if let Some(h) = self.headings.get_mut(heading) {
                    h.in_flight = h.in_flight.saturating_sub(1);
                }
                surface.toggle_heading_class(heading, "glowing", false);
                self.reposition(heading, surface);
            }
            LetterCue::RepositionEnd { heading } => {
                surface.toggle_heading_class(heading, "repositioning", false);
            }
            LetterCue::FlashEnd {
                heading,
                letter,
                restore,
            } => {
                surface.set_letter_style(heading, letter, "color", &restore);
                surface.set_letter_style(heading, letter, "text-shadow", "");
            }
            LetterCue::BodyShakeEnd => surface.set_body_style("animation", ""),
            LetterCue::Despawn(id) => {
                if !surface.despawn(id) {
                    debug!(?id, "sparkle already detached");
                }
            }
            LetterCue::Ambient => self.ambient(surface),
        }
    }

    fn reform(
        &mut self,
        heading: HeadingId,
        letter: usize,
        palette: usize,
        burst: Burst,
        surface: &mut impl Surface,
    ) {
        let c = self.config.clone();
        let colors = &PALETTES[palette];
        let start_x = self.rng.signed(c.reform_offset_span_px);
        let start_y = self.rng.signed(c.reform_offset_span_px);
        let start_rotation = self.rng.signed(c.reform_rotation_span_deg);
        let start_scale = self.rng.between(c.reform_scale.lo, c.reform_scale.hi);
        let color = colors[self.rng.index(colors.len())];
        let flickers =
            c.flicker_min + self.rng.below(c.flicker_max.saturating_sub(c.flicker_min) + 1);

        let Some(unit) = self.letter_mut(heading, letter) else {
            self.release_letter(heading);
            return;
        };
        unit.phase = LetterPhase::Reforming;
        unit.color = Some(color.to_string());
        unit.font_size_px = Some(burst.final_size);

        surface.toggle_letter_class(heading, letter, "exploding", false);
        surface.toggle_letter_class(heading, letter, "reforming", true);
        surface.set_letter_style(heading, letter, "--reform-start-x", &px(start_x));
        surface.set_letter_style(heading, letter, "--reform-start-y", &px(start_y));
        surface.set_letter_style(heading, letter, "--reform-start-rotation", &deg(start_rotation));
        surface.set_letter_style(heading, letter, "--reform-start-scale", &format!("{start_scale:.3}"));
        surface.set_letter_style(heading, letter, "color", color);
        surface.set_letter_style(heading, letter, "font-size", &px(burst.final_size));

        let spacing = c.flicker_window_ms / flickers as f64;
        for n in 0..flickers {
            self.timeline.schedule(
                n as f64 * spacing,
                LetterCue::Flicker {
                    heading,
                    letter,
                    palette,
                    base_size: burst.final_size,
                    hold_ms: spacing / 2.0,
                },
            );
        }
        self.timeline
            .schedule(c.settle_ms, LetterCue::Settle { heading, letter });
    }

    /// Move the heading to a random spot inside the viewport and tilt it.
    pub fn reposition(&mut self, heading: HeadingId, surface: &mut impl Surface) {
        let Some(h) = self.headings.get(heading) else {
            return;
        };
        info!(text = %h.text, "repositioning heading");
        let count = h.letters.len();

        surface.toggle_heading_class(heading, "repositioning", true);
        let rect = surface.heading_rect(heading);
        let (top, left) = random_position(
            surface.viewport(),
            rect.width,
            rect.height,
            self.config.margin_px,
            &mut self.rng,
        );
        surface.set_heading_style(heading, "top", &px(top));
        surface.set_heading_style(heading, "left", &px(left));

        let chosen = Orientation::choose(&mut self.rng);
        match orientation::layout(chosen.kind, count, &mut self.rng) {
            Some(placements) => {
                for (i, p) in placements.iter().enumerate() {
                    surface.set_letter_style(heading, i, "position", "relative");
                    surface.set_letter_style(heading, i, "display", p.display);
                    surface.set_letter_style(heading, i, "top", &px(p.top_px));
                    surface.set_letter_style(heading, i, "left", &px(p.left_px));
                    surface.set_letter_style(heading, i, "line-height", if p.stacked { "1" } else { "" });
                }
            }
            None => {
                for i in 0..count {
                    for prop in ["position", "display", "top", "left", "line-height"] {
                        surface.set_letter_style(heading, i, prop, "");
                    }
                }
            }
        }
        surface.set_heading_style(heading, "transform", &chosen.transform());
        self.timeline
            .schedule(self.config.reposition_class_ms, LetterCue::RepositionEnd { heading });

        let h = &mut self.headings[heading];
        h.position = Some((top, left));
        h.orientation = Some(chosen);
    }

    fn ambient(&mut self, surface: &mut impl Surface) {
        self.timeline
            .schedule(self.config.ambient_interval_ms, LetterCue::Ambient);

        let total: usize = self.headings.iter().map(|h| h.letters.len()).sum();
        if total == 0 {
            return;
        }
        if self.rng.chance(self.config.ambient_flicker_chance) {
            let mut pick = self.rng.index(total);
            let mut target = None;
            for (h, heading) in self.headings.iter().enumerate() {
                if pick < heading.letters.len() {
                    target = Some((h, pick));
                    break;
                }
                pick -= heading.letters.len();
            }
            if let Some((heading, letter)) = target {
                self.subtle_flicker(heading, letter, surface);
            }
        }
        if self.rng.chance(self.config.ambient_sparkle_chance) {
            // Slot among the first five headings; an empty slot skips the burst.
            let slot = self.rng.index(5);
            if slot < self.headings.len() {
                self.spawn_mini_sparkles(slot, surface);
            }
        }
    }

    fn subtle_flicker(&mut self, heading: HeadingId, letter: usize, surface: &mut impl Surface) {
        let color = BRIGHT[self.rng.index(BRIGHT.len())];
        let hold = self
            .rng
            .between(self.config.ambient_flash_ms.lo, self.config.ambient_flash_ms.hi);
        let restore = self.headings[heading].letters[letter]
            .color
            .clone()
            .unwrap_or_default();
        surface.set_letter_style(heading, letter, "color", color);
        surface.set_letter_style(heading, letter, "text-shadow", &format!("0 0 6px {color}"));
        self.timeline.schedule(
            hold,
            LetterCue::FlashEnd {
                heading,
                letter,
                restore,
            },
        );
    }
}

/// `(top, left)` inside `[margin, viewport - size - margin]` on both axes,
/// pinned to `margin` when the element does not fit.
pub fn random_position(
    viewport: Viewport,
    width: f64,
    height: f64,
    margin: f64,
    rng: &mut impl RandomSource,
) -> (f64, f64) {
    let mut axis = |extent: f64, size: f64| {
        let max = extent - size - margin;
        if max > margin {
            margin + rng.unit() * (max - margin)
        } else {
            margin
        }
    };
    let top = axis(viewport.height, height);
    let left = axis(viewport.width, width);
    (top, left)
}

fn px(v: f64) -> String {
    format!("{v:.2}px")
}

fn deg(v: f64) -> String {
    format!("{v:.2}deg")
}
