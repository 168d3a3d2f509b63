//! Tunables for both effect components.
//!
//! Defaults reproduce the stock page behavior. With the `serde` feature every
//! struct deserializes with per-field defaults, so a partial JSON object only
//! overrides what it names.

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::error::{EffectsError, Result};

/// Numeric range `lo..=hi` for randomized values; draws land in `[lo, hi)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Span {
    pub lo: f64,
    pub hi: f64,
}

impl Span {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.lo && v <= self.hi
    }
}

/// What a click does to a heading whose previous explosion is still running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(rename_all = "snake_case"))]
pub enum OverlapPolicy {
    /// Layer another independent explosion on top (stock behavior).
    #[default]
    Allow,
    /// Ignore clicks until the running sequence has repositioned the heading.
    Suppress,
}

/// How the wild-colors background sequence reaches its end color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(rename_all = "snake_case"))]
pub enum TransitionMode {
    /// Timed walk through the fixed color list, ending at the chosen color.
    #[default]
    Stepped,
    /// One CSS transition straight to the chosen color.
    Smooth,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct LetterConfig {
    pub letter_delay_step_s: f64,
    pub explode_stagger_ms: f64,
    pub explode_hold_ms: f64,
    pub reform_stagger_ms: f64,
    pub settle_ms: f64,
    pub reposition_after_ms: f64,
    pub reposition_class_ms: f64,
    pub displacement_span_px: f64,
    pub rotation_span_deg: f64,
    pub explosion_scale: Span,
    pub final_scale: Span,
    pub reform_offset_span_px: f64,
    pub reform_rotation_span_deg: f64,
    pub reform_scale: Span,
    pub flicker_min: u32,
    pub flicker_max: u32,
    pub flicker_window_ms: f64,
    pub flicker_glow_px: Span,
    pub flicker_scale: Span,
    pub letter_shake_ms: f64,
    pub body_shake_ms: f64,
    pub sparkle_count: u32,
    pub margin_px: f64,
    pub ambient_interval_ms: f64,
    pub ambient_flicker_chance: f64,
    pub ambient_sparkle_chance: f64,
    pub ambient_flash_ms: Span,
    pub fallback_font_px: f64,
    pub overlap: OverlapPolicy,
}

impl Default for LetterConfig {
    fn default() -> Self {
        Self {
            letter_delay_step_s: 0.05,
            explode_stagger_ms: 30.0,
            explode_hold_ms: 1000.0,
            reform_stagger_ms: 40.0,
            settle_ms: 1000.0,
            reposition_after_ms: 2200.0,
            reposition_class_ms: 1500.0,
            displacement_span_px: 800.0,
            rotation_span_deg: 1440.0,
            explosion_scale: Span::new(1.5, 3.5),
            final_scale: Span::new(0.8, 1.4),
            reform_offset_span_px: 600.0,
            reform_rotation_span_deg: 1080.0,
            reform_scale: Span::new(0.1, 0.5),
            flicker_min: 5,
            flicker_max: 10,
            flicker_window_ms: 1000.0,
            flicker_glow_px: Span::new(15.0, 35.0),
            flicker_scale: Span::new(0.8, 1.4),
            letter_shake_ms: 300.0,
            body_shake_ms: 400.0,
            sparkle_count: 30,
            margin_px: 20.0,
            ambient_interval_ms: 2000.0,
            ambient_flicker_chance: 0.05,
            ambient_sparkle_chance: 0.02,
            ambient_flash_ms: Span::new(150.0, 350.0),
            fallback_font_px: 16.0,
            overlap: OverlapPolicy::Allow,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct BackdropConfig {
    pub sequence_ms: f64,
    pub particle_count: u32,
    pub particle_distance_px: Span,
    pub particle_angle_jitter: f64,
    pub particle_size_px: Span,
    pub particle_lifetime_ms: f64,
    pub ring_count: u32,
    pub flash_count: u32,
    pub shake_ms: f64,
    pub pulse_ms: f64,
    pub transition: TransitionMode,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            sequence_ms: 3000.0,
            particle_count: 60,
            particle_distance_px: Span::new(150.0, 550.0),
            particle_angle_jitter: 1.0,
            particle_size_px: Span::new(4.0, 12.0),
            particle_lifetime_ms: 5000.0,
            ring_count: 3,
            flash_count: 3,
            shake_ms: 600.0,
            pulse_ms: 500.0,
            transition: TransitionMode::Stepped,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct EffectsConfig {
    pub letters: LetterConfig,
    pub backdrop: BackdropConfig,
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub log_level: String,
    /// Inject the built-in stylesheet on start.
    pub inject_styles: bool,
    /// Heading selector the page binds to.
    pub heading_selector: String,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            letters: LetterConfig::default(),
            backdrop: BackdropConfig::default(),
            log_level: "info".to_string(),
            inject_styles: true,
            heading_selector: "h1, h2, h3, h4, h5, h6".to_string(),
        }
    }
}

impl EffectsConfig {
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| EffectsError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let l = &self.letters;
        let spans = [
            ("letters.explosion_scale", l.explosion_scale),
            ("letters.final_scale", l.final_scale),
            ("letters.reform_scale", l.reform_scale),
            ("letters.flicker_glow_px", l.flicker_glow_px),
            ("letters.flicker_scale", l.flicker_scale),
            ("letters.ambient_flash_ms", l.ambient_flash_ms),
            ("backdrop.particle_distance_px", self.backdrop.particle_distance_px),
            ("backdrop.particle_size_px", self.backdrop.particle_size_px),
        ];
        for (name, span) in spans {
            if !(span.lo.is_finite() && span.hi.is_finite()) || span.lo > span.hi {
                return Err(invalid(format!("{name} must satisfy lo <= hi")));
            }
        }
        let positive = [
            ("letters.flicker_window_ms", l.flicker_window_ms),
            ("letters.ambient_interval_ms", l.ambient_interval_ms),
            ("letters.fallback_font_px", l.fallback_font_px),
            ("backdrop.sequence_ms", self.backdrop.sequence_ms),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(format!("{name} must be positive")));
            }
        }
        for (name, p) in [
            ("letters.ambient_flicker_chance", l.ambient_flicker_chance),
            ("letters.ambient_sparkle_chance", l.ambient_sparkle_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{name} must be within [0, 1]")));
            }
        }
        if l.flicker_min == 0 || l.flicker_min > l.flicker_max {
            return Err(invalid(
                "letters.flicker_min must be >= 1 and <= flicker_max".to_string(),
            ));
        }
        if l.margin_px < 0.0 {
            return Err(invalid("letters.margin_px must not be negative".to_string()));
        }
        if self.log_level.parse::<tracing::Level>().is_err() {
            return Err(invalid(format!("unknown log_level '{}'", self.log_level)));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> EffectsError {
    EffectsError::InvalidConfig(msg)
}
