// Full-page decorations spawned by a wild-colors burst.

use std::f64::consts::TAU;

use crate::config::BackdropConfig;
use crate::random::RandomSource;
use crate::surface::{Decoration, Point};

pub const PARTICLE: &str = "bg-particle";
pub const RING: &str = "explosion-ring";
pub const FLASH: &str = "screen-flash";

pub const FLASH_KEYFRAMES_ID: &str = "dramaticFlashStyle";
pub const FLASH_KEYFRAMES: &str = "@keyframes dramaticFlash {
  0% { opacity: 0; transform: scale(0.8); }
  20% { opacity: 1; transform: scale(1.1); }
  40% { opacity: 0.8; transform: scale(1.05); }
  60% { opacity: 1; transform: scale(1.02); }
  80% { opacity: 0.6; transform: scale(1.01); }
  100% { opacity: 0; transform: scale(1); }
}";

const PARTICLE_COLORS: [&str; 10] = [
    "rgba(255, 107, 107, 0.95)",
    "rgba(78, 205, 196, 0.95)",
    "rgba(69, 183, 209, 0.95)",
    "rgba(150, 206, 180, 0.95)",
    "rgba(254, 202, 87, 0.95)",
    "rgba(255, 0, 255, 0.9)",
    "rgba(0, 255, 255, 0.9)",
    "rgba(255, 255, 0, 0.9)",
    "rgba(255, 0, 128, 0.9)",
    "rgba(128, 255, 0, 0.9)",
];

/// Decoration plus its removal delay in ms.
pub struct Piece {
    pub decoration: Decoration,
    pub lifetime_ms: f64,
}

/// Particle `index` of `count`, flying outward from `origin`. Its angle is the
/// evenly spaced slot plus a random jitter so the ring looks ragged.
pub fn particle(
    index: u32,
    count: u32,
    origin: Point,
    cfg: &BackdropConfig,
    rng: &mut impl RandomSource,
) -> Piece {
    let slot = TAU * index as f64 / count.max(1) as f64;
    let angle = slot + rng.unit() * cfg.particle_angle_jitter;
    let distance = rng.between(cfg.particle_distance_px.lo, cfg.particle_distance_px.hi);
    let (dx, dy) = (angle.cos() * distance, angle.sin() * distance);
    let color = PARTICLE_COLORS[rng.index(PARTICLE_COLORS.len())];
    let size = rng.between(cfg.particle_size_px.lo, cfg.particle_size_px.hi);
    let style = format!(
        "left: {:.1}px; top: {:.1}px; --particle-x: {dx:.2}px; --particle-y: {dy:.2}px; \
         background: {color}; width: {size:.2}px; height: {size:.2}px; box-shadow: 0 0 {glow:.2}px {color};",
        origin.x,
        origin.y,
        glow = size * 2.0,
    );
    Piece {
        decoration: Decoration {
            class: PARTICLE,
            style,
        },
        lifetime_ms: cfg.particle_lifetime_ms,
    }
}

/// Expanding ring `index`; later rings start later and last longer.
pub fn ring(index: u32, origin: Point) -> Piece {
    let i = index as f64;
    let style = format!(
        "position: fixed; left: {:.1}px; top: {:.1}px; width: 0px; height: 0px; \
         border: 3px solid rgba(255, 255, 255, 0.8); border-radius: 50%; pointer-events: none; z-index: 9998; \
         animation: explosionRing {:.1}s ease-out forwards; animation-delay: {:.1}s;",
        origin.x,
        origin.y,
        1.5 + i * 0.3,
        i * 0.2,
    );
    Piece {
        decoration: Decoration { class: RING, style },
        lifetime_ms: 2500.0 + i * 300.0,
    }
}

/// Full-viewport flash layer `index`; each layer is fainter and later.
pub fn flash(index: u32) -> Piece {
    let i = index as f64;
    let intensity = (0.4 - i * 0.1).max(0.0);
    let delay_ms = i * 100.0;
    let style = format!(
        "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; \
         background: radial-gradient(circle, rgba(255,255,255,{intensity:.2}) 0%, rgba(255,255,255,{soft:.2}) 30%, transparent 70%); \
         pointer-events: none; z-index: 9999; animation: dramaticFlash {dur:.1}s ease-out forwards; animation-delay: {delay_ms}ms;",
        soft = intensity * 0.3,
        dur = 0.8 + i * 0.2,
    );
    Piece {
        decoration: Decoration { class: FLASH, style },
        lifetime_ms: 1200.0 + delay_ms,
    }
}
