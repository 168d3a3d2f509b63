//! Injectable randomness for every effect decision.
//!
//! Components are generic over [`RandomSource`] so tests can pin outcomes with
//! [`Scripted`] or a fixed seed, while the page uses a ChaCha8 stream seeded
//! from the browser.

use rand::SeedableRng;
use rand::distributions::{Distribution, Standard};
use rand_chacha::ChaCha8Rng;

/// Source of uniform values in `[0, 1)` plus the derived helpers the effects use.
pub trait RandomSource {
    fn unit(&mut self) -> f64;

    /// Uniform in `[lo, hi)`.
    fn between(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }

    /// Uniform in `[-span/2, span/2)`.
    fn signed(&mut self, span: f64) -> f64 {
        (self.unit() - 0.5) * span
    }

    /// Uniform integer in `[0, n)`; 0 when `n == 0`.
    fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        ((self.unit() * n as f64) as u32).min(n - 1)
    }

    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.unit() * len as f64) as usize).min(len - 1)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.index(items.len()))
        }
    }
}

impl RandomSource for ChaCha8Rng {
    fn unit(&mut self) -> f64 {
        Standard.sample(self)
    }
}

/// Replays a fixed list of unit values, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct Scripted {
    values: Vec<f64>,
    cursor: usize,
}

impl Scripted {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        for v in &mut values {
            *v = v.clamp(0.0, 0.999_999_999);
        }
        Self { values, cursor: 0 }
    }

    /// Every draw returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for Scripted {
    fn unit(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Fresh generator for the page: browser crypto when the `rng` feature is on,
/// otherwise a performance-clock derived seed.
pub fn from_entropy() -> ChaCha8Rng {
    #[cfg(feature = "rng")]
    {
        let mut seed = [0u8; 32];
        if getrandom::getrandom(&mut seed).is_ok() {
            return ChaCha8Rng::from_seed(seed);
        }
    }
    seeded(clock_seed())
}

fn clock_seed() -> u64 {
    crate::performance_now()
        .to_bits()
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_cycles_through_values() {
        let mut r = Scripted::new(vec![0.1, 0.9]);
        assert_eq!(r.unit(), 0.1);
        assert_eq!(r.unit(), 0.9);
        assert_eq!(r.unit(), 0.1);
    }

    #[test]
    fn helpers_stay_in_range() {
        let mut r = seeded(7);
        for _ in 0..1000 {
            let v = r.between(2.0, 8.0);
            assert!((2.0..8.0).contains(&v));
            let s = r.signed(20.0);
            assert!((-10.0..10.0).contains(&s));
            assert!(r.below(6) < 6);
            assert!(r.index(5) < 5);
        }
    }

    #[test]
    fn top_of_range_never_overflows_index() {
        let mut r = Scripted::constant(1.0);
        assert_eq!(r.index(4), 3);
        assert_eq!(r.below(10), 9);
        assert_eq!(r.index(0), 0);
    }

    #[test]
    fn pick_on_empty_slice_is_none() {
        let mut r = Scripted::constant(0.5);
        let empty: [u8; 0] = [];
        assert!(r.pick(&empty).is_none());
        assert_eq!(r.pick(&["a", "b"]), Some(&"b"));
    }
}
