//! Background effects: random page colors, the wild-colors burst and the
//! click pulse.
//!
//! A single busy flag gates the burst. While a burst runs, further bursts and
//! pulses are no-ops; the flag clears only when the full color sequence has
//! played out.

pub mod burst;
pub mod strategies;

use tracing::{debug, info};

use crate::config::{BackdropConfig, TransitionMode};
use crate::random::RandomSource;
use crate::surface::{Anchor, DecorationId, Point, Surface, TargetKind};
use crate::timeline::Timeline;

pub use strategies::{ColorStrategy, Rgb, generate_color};

/// Colors the stepped transition walks through before landing on the end color.
pub const COLOR_SEQUENCE: [&str; 24] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#ff9ff3", "#54a0ff", "#5f27cd", "#ff6348", "#2ed573",
    "#3742fa", "#f368e0", "#ffa502", "#ff4757", "#2ecc71", "#3498db", "#9b59b6", "#ff3838",
    "#f39c12", "#e74c3c", "#1abc9c", "#3498db", "#9b59b6", "#e67e22", "#e74c3c", "#8e44ad",
];

#[derive(Clone, Debug, PartialEq)]
enum BackdropCue {
    /// Step `n` of the stepped transition; the last step is the end color.
    Step { index: usize, color: String, step_ms: f64 },
    Settle { color: String },
    Release { color: String },
    ShakeEnd,
    PulseEnd,
    Despawn(DecorationId),
}

pub struct Backdrop<R: RandomSource> {
    config: BackdropConfig,
    rng: R,
    timeline: Timeline<BackdropCue>,
    busy: bool,
    background: Option<Rgb>,
}

impl<R: RandomSource> Backdrop<R> {
    pub fn new(config: BackdropConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            timeline: Timeline::default(),
            busy: false,
            background: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Most recent color the page was set to (end color of a running burst).
    pub fn background(&self) -> Option<Rgb> {
        self.background
    }

    pub fn pending_cues(&self) -> usize {
        self.timeline.pending()
    }

    /// Paint the initial random background.
    pub fn start(&mut self, surface: &mut impl Surface) -> Rgb {
        info!("background effects initialized");
        let color = generate_color(&mut self.rng);
        surface.set_body_style("background-color", &color.to_string());
        self.background = Some(color);
        info!(%color, "initial random background set");
        color
    }

    pub fn tick(&mut self, now: f64, surface: &mut impl Surface) {
        while let Some(cue) = self.timeline.pop_due(now) {
            self.apply(cue, surface);
        }
        self.timeline.finish(now);
    }

    /// Single click on the page: pulse unless a burst is running.
    pub fn on_click(&mut self, target: TargetKind, now: f64, surface: &mut impl Surface) -> bool {
        if !target.is_backdrop() {
            return false;
        }
        self.pulse(now, surface)
    }

    pub fn on_double_click(
        &mut self,
        target: TargetKind,
        at: Point,
        now: f64,
        surface: &mut impl Surface,
    ) -> bool {
        if !target.is_backdrop() {
            debug!(?target, "double-click on content; background untouched");
            return false;
        }
        self.trigger_wild_colors(at, now, surface)
    }

    pub fn on_context_menu(
        &mut self,
        target: TargetKind,
        at: Point,
        now: f64,
        surface: &mut impl Surface,
    ) -> bool {
        if !target.is_backdrop() {
            debug!(?target, "right-click on content; background untouched");
            return false;
        }
        self.trigger_wild_colors(at, now, surface)
    }

    pub fn pulse(&mut self, now: f64, surface: &mut impl Surface) -> bool {
        self.tick(now, surface);
        if self.busy {
            return false;
        }
        surface.toggle_body_class("pulsing", true);
        self.timeline.schedule(self.config.pulse_ms, BackdropCue::PulseEnd);
        true
    }

    /// Run the full burst from `at`. Returns `false` if one is already running.
    pub fn trigger_wild_colors(&mut self, at: Point, now: f64, surface: &mut impl Surface) -> bool {
        self.tick(now, surface);
        if self.busy {
            return false;
        }
        self.busy = true;
        let end = generate_color(&mut self.rng);
        self.background = Some(end);
        info!(%end, "wild colors triggered");

        self.run_transition(end.to_string(), surface);
        self.spawn_particles(at, surface);
        self.spawn_rings(at, surface);
        self.shake(surface);
        self.flash(surface);

        self.timeline.schedule(
            self.config.sequence_ms,
            BackdropCue::Release {
                color: end.to_string(),
            },
        );
        true
    }

    fn run_transition(&mut self, end: String, surface: &mut impl Surface) {
        let total = self.config.sequence_ms;
        match self.config.transition {
            TransitionMode::Stepped => {
                let steps = COLOR_SEQUENCE.len() + 1;
                let step_ms = total / steps as f64;
                for index in 0..steps {
                    let color = COLOR_SEQUENCE
                        .get(index)
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| end.clone());
                    self.timeline.schedule(
                        (index + 1) as f64 * step_ms,
                        BackdropCue::Step {
                            index,
                            color,
                            step_ms,
                        },
                    );
                }
            }
            TransitionMode::Smooth => {
                surface.set_body_style(
                    "transition",
                    &format!("background-color {total}ms ease-in-out"),
                );
                surface.set_body_style("background-color", &end);
            }
        }
        self.timeline.schedule(total, BackdropCue::Settle { color: end });
    }

    fn spawn_particles(&mut self, at: Point, surface: &mut impl Surface) {
        let count = self.config.particle_count;
        for i in 0..count {
            let p = burst::particle(i, count, at, &self.config, &mut self.rng);
            let id = surface.spawn(Anchor::Body, &p.decoration);
            self.timeline.schedule(p.lifetime_ms, BackdropCue::Despawn(id));
        }
    }

    fn spawn_rings(&mut self, at: Point, surface: &mut impl Surface) {
        for i in 0..self.config.ring_count {
            let p = burst::ring(i, at);
            let id = surface.spawn(Anchor::Body, &p.decoration);
            self.timeline.schedule(p.lifetime_ms, BackdropCue::Despawn(id));
        }
    }

    fn shake(&mut self, surface: &mut impl Surface) {
        surface.set_body_style(
            "animation",
            &format!("screenShake {}s ease-out", self.config.shake_ms / 1000.0),
        );
        self.timeline.schedule(self.config.shake_ms, BackdropCue::ShakeEnd);
    }

    fn flash(&mut self, surface: &mut impl Surface) {
        for i in 0..self.config.flash_count {
            let p = burst::flash(i);
            let id = surface.spawn(Anchor::Body, &p.decoration);
            self.timeline.schedule(p.lifetime_ms, BackdropCue::Despawn(id));
        }
        surface.ensure_stylesheet(burst::FLASH_KEYFRAMES_ID, burst::FLASH_KEYFRAMES);
    }

    fn apply(&mut self, cue: BackdropCue, surface: &mut impl Surface) {
        match cue {
            BackdropCue::Step {
                index,
                color,
                step_ms,
            } => {
                surface.set_body_style(
                    "transition",
                    &format!("background-color {step_ms:.0}ms ease-out"),
                );
                surface.set_body_style("background-color", &color);
                debug!(index, %color, "color step");
            }
            BackdropCue::Settle { color } => {
                surface.set_body_style("background-color", &color);
                surface.set_body_style("transition", "all 0.3s ease");
            }
            BackdropCue::Release { color } => {
                self.busy = false;
                info!(%color, "wild colors completed");
            }
            BackdropCue::ShakeEnd => surface.set_body_style("animation", ""),
            BackdropCue::PulseEnd => surface.toggle_body_class("pulsing", false),
            BackdropCue::Despawn(id) => {
                if !surface.despawn(id) {
                    debug!(?id, "decoration already detached");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;
    use crate::surface::MemorySurface;

    fn backdrop() -> Backdrop<rand_chacha::ChaCha8Rng> {
        Backdrop::new(BackdropConfig::default(), seeded(42))
    }

    #[test]
    fn start_paints_a_background() {
        let mut s = MemorySurface::new(800.0, 600.0);
        let mut b = backdrop();
        let c = b.start(&mut s);
        assert_eq!(s.body.style("background-color"), Some(c.to_string().as_str()));
    }

    #[test]
    fn stepped_sequence_ends_on_the_end_color() {
        let mut s = MemorySurface::new(800.0, 600.0);
        let mut b = backdrop();
        assert!(b.trigger_wild_colors(Point { x: 10.0, y: 10.0 }, 0.0, &mut s));
        let end = b.background().unwrap().to_string();
        b.tick(3000.0, &mut s);
        assert_eq!(s.background_history.len(), 26);
        assert_eq!(s.background_history[0], COLOR_SEQUENCE[0]);
        assert_eq!(s.background_history.last(), Some(&end));
        assert_eq!(s.body.style("transition"), Some("all 0.3s ease"));
        assert!(!b.is_busy());
    }

    #[test]
    fn smooth_transition_sets_end_color_at_once() {
        let mut s = MemorySurface::new(800.0, 600.0);
        let cfg = BackdropConfig {
            transition: TransitionMode::Smooth,
            ..BackdropConfig::default()
        };
        let mut b = Backdrop::new(cfg, seeded(1));
        b.trigger_wild_colors(Point::default(), 0.0, &mut s);
        let end = b.background().unwrap().to_string();
        assert_eq!(s.body.style("background-color"), Some(end.as_str()));
        assert_eq!(s.body.style("transition"), Some("background-color 3000ms ease-in-out"));
    }

    #[test]
    fn pulse_is_blocked_while_busy() {
        let mut s = MemorySurface::new(800.0, 600.0);
        let mut b = backdrop();
        b.trigger_wild_colors(Point::default(), 0.0, &mut s);
        assert!(!b.on_click(TargetKind::Body, 100.0, &mut s));
        assert!(!s.body.has_class("pulsing"));
        assert!(b.on_click(TargetKind::Body, 3000.0, &mut s));
        assert!(s.body.has_class("pulsing"));
        b.tick(3500.0, &mut s);
        assert!(!s.body.has_class("pulsing"));
    }

    #[test]
    fn content_targets_are_ignored() {
        let mut s = MemorySurface::new(800.0, 600.0);
        let mut b = backdrop();
        assert!(!b.on_double_click(TargetKind::Letter, Point::default(), 0.0, &mut s));
        assert!(!b.on_context_menu(TargetKind::Button, Point::default(), 0.0, &mut s));
        assert!(!b.on_click(TargetKind::Heading, 0.0, &mut s));
        assert!(s.spawned.is_empty());
        assert!(!b.is_busy());
    }

    #[test]
    fn flash_keyframes_installed_once() {
        let mut s = MemorySurface::new(800.0, 600.0);
        let mut b = backdrop();
        b.trigger_wild_colors(Point::default(), 0.0, &mut s);
        b.trigger_wild_colors(Point::default(), 4000.0, &mut s);
        assert_eq!(s.stylesheets.len(), 1);
        assert!(s.stylesheets.contains_key(burst::FLASH_KEYFRAMES_ID));
    }
}
