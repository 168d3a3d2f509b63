// Decorative sparkles dropped inside a heading's box.

use crate::random::RandomSource;
use crate::surface::{Decoration, Rect};

pub const ENHANCED_SPARKLE: &str = "enhanced-sparkle";
pub const MINI_SPARKLE: &str = "mini-sparkle";

const MINI_LIFETIME_MS: f64 = 1300.0;

/// A decoration and how long it stays attached.
pub struct Sparkle {
    pub decoration: Decoration,
    pub lifetime_ms: f64,
}

/// Glowing white dot, 2–8 px, animated for 0.8–1.6 s after up to 0.5 s delay.
pub fn enhanced(rect: Rect, rng: &mut impl RandomSource) -> Sparkle {
    let x = rng.unit() * rect.width;
    let y = rng.unit() * rect.height;
    let size = rng.between(2.0, 8.0);
    let duration_s = rng.between(0.8, 1.6);
    let delay_s = rng.unit() * 0.5;
    let style = format!(
        "position: absolute; left: {x:.1}px; top: {y:.1}px; width: {size:.2}px; height: {size:.2}px; \
         background: radial-gradient(circle, #fff, transparent); border-radius: 50%; pointer-events: none; \
         animation: enhancedSparkle {duration_s:.2}s ease-out forwards; animation-delay: {delay_s:.2}s; \
         box-shadow: 0 0 {glow:.2}px rgba(255, 255, 255, 0.8);",
        glow = size * 2.0,
    );
    Sparkle {
        decoration: Decoration {
            class: ENHANCED_SPARKLE,
            style,
        },
        lifetime_ms: (duration_s + 0.5) * 1000.0,
    }
}

/// Plain 2 px dot for the ambient loop.
pub fn mini(rect: Rect, rng: &mut impl RandomSource) -> Sparkle {
    let x = rng.unit() * rect.width;
    let y = rng.unit() * rect.height;
    let delay_s = rng.unit() * 0.3;
    let style = format!(
        "position: absolute; left: {x:.1}px; top: {y:.1}px; width: 2px; height: 2px; background: #fff; \
         border-radius: 50%; pointer-events: none; animation: miniSparkle 1s ease-out forwards; \
         animation-delay: {delay_s:.2}s;"
    );
    Sparkle {
        decoration: Decoration {
            class: MINI_SPARKLE,
            style,
        },
        lifetime_ms: MINI_LIFETIME_MS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{Scripted, seeded};

    const BOX: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 200.0,
        height: 40.0,
    };

    #[test]
    fn enhanced_lifetime_covers_animation_plus_grace() {
        let mut rng = seeded(5);
        for _ in 0..200 {
            let s = enhanced(BOX, &mut rng);
            assert!(s.lifetime_ms >= 1300.0 && s.lifetime_ms <= 2100.0);
            assert_eq!(s.decoration.class, ENHANCED_SPARKLE);
        }
    }

    #[test]
    fn enhanced_is_placed_inside_the_box() {
        let mut rng = Scripted::constant(0.5);
        let s = enhanced(BOX, &mut rng);
        assert!(s.decoration.style.contains("left: 100.0px"));
        assert!(s.decoration.style.contains("top: 20.0px"));
        assert!(s.decoration.style.contains("enhancedSparkle 1.20s"));
    }

    #[test]
    fn mini_has_fixed_lifetime() {
        let mut rng = seeded(1);
        let s = mini(BOX, &mut rng);
        assert_eq!(s.lifetime_ms, 1300.0);
        assert!(s.decoration.style.contains("miniSparkle 1s"));
    }
}
