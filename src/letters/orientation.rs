// Heading orientation after an explosion settles.
//
// A single uniform roll picks the category; the angle inside the category is a
// second draw. Vertical and diagonal also rearrange the letters themselves.

use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrientationKind {
    Vertical,
    Diagonal,
    Steep,
    Inverted,
    Slight,
}

/// Cumulative roll thresholds: `roll < bound` selects the kind.
pub const ORIENTATION_WEIGHTS: [(f64, OrientationKind); 5] = [
    (0.30, OrientationKind::Vertical),
    (0.50, OrientationKind::Diagonal),
    (0.70, OrientationKind::Steep),
    (0.85, OrientationKind::Inverted),
    (1.00, OrientationKind::Slight),
];

impl OrientationKind {
    pub fn from_roll(roll: f64) -> Self {
        ORIENTATION_WEIGHTS
            .iter()
            .find(|(bound, _)| roll < *bound)
            .map(|(_, kind)| *kind)
            .unwrap_or(OrientationKind::Slight)
    }

    /// Closed range of rotation angles (degrees) this kind produces.
    pub fn angle_range(self) -> (f64, f64) {
        match self {
            OrientationKind::Vertical => (-10.0, 10.0),
            OrientationKind::Diagonal => (0.0, 60.0),
            OrientationKind::Steep => (60.0, 120.0),
            OrientationKind::Inverted => (150.0, 210.0),
            OrientationKind::Slight => (-15.0, 15.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub kind: OrientationKind,
    pub angle_deg: f64,
}

impl Orientation {
    pub fn choose(rng: &mut impl RandomSource) -> Self {
        let kind = OrientationKind::from_roll(rng.unit());
        let angle_deg = match kind {
            OrientationKind::Vertical => rng.signed(20.0),
            OrientationKind::Diagonal => 30.0 + rng.signed(60.0),
            OrientationKind::Steep => rng.between(60.0, 120.0),
            OrientationKind::Inverted => rng.between(150.0, 210.0),
            OrientationKind::Slight => rng.signed(30.0),
        };
        Self { kind, angle_deg }
    }

    pub fn transform(&self) -> String {
        format!("rotate({:.2}deg)", self.angle_deg)
    }
}

/// Per-letter inline placement for a layout-changing orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct LetterPlacement {
    pub display: &'static str,
    pub top_px: f64,
    pub left_px: f64,
    pub stacked: bool,
}

/// Placement for each of `count` letters, or `None` when the letters keep
/// their normal inline flow.
pub fn layout(
    kind: OrientationKind,
    count: usize,
    rng: &mut impl RandomSource,
) -> Option<Vec<LetterPlacement>> {
    match kind {
        OrientationKind::Vertical => Some(
            (0..count)
                .map(|i| LetterPlacement {
                    display: "block",
                    top_px: i as f64 * rng.between(20.0, 30.0),
                    left_px: rng.signed(10.0),
                    stacked: true,
                })
                .collect(),
        ),
        OrientationKind::Diagonal => Some(
            (0..count)
                .map(|i| {
                    let across = i as f64 * rng.between(15.0, 23.0);
                    let down = i as f64 * rng.between(12.0, 18.0);
                    let jitter = rng.signed(8.0);
                    LetterPlacement {
                        display: "inline-block",
                        top_px: down + jitter,
                        left_px: across + jitter,
                        stacked: false,
                    }
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Parse the angle back out of a `rotate(<deg>deg)` transform.
pub fn parse_rotation(transform: &str) -> Option<f64> {
    transform
        .trim()
        .strip_prefix("rotate(")?
        .strip_suffix("deg)")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{Scripted, seeded};

    #[test]
    fn roll_boundaries_map_to_categories() {
        assert_eq!(OrientationKind::from_roll(0.0), OrientationKind::Vertical);
        assert_eq!(OrientationKind::from_roll(0.299), OrientationKind::Vertical);
        assert_eq!(OrientationKind::from_roll(0.30), OrientationKind::Diagonal);
        assert_eq!(OrientationKind::from_roll(0.55), OrientationKind::Steep);
        assert_eq!(OrientationKind::from_roll(0.70), OrientationKind::Inverted);
        assert_eq!(OrientationKind::from_roll(0.85), OrientationKind::Slight);
        assert_eq!(OrientationKind::from_roll(0.999), OrientationKind::Slight);
    }

    #[test]
    fn angles_stay_inside_their_category() {
        let mut rng = seeded(11);
        for _ in 0..2000 {
            let o = Orientation::choose(&mut rng);
            let (lo, hi) = o.kind.angle_range();
            assert!(o.angle_deg >= lo && o.angle_deg <= hi, "{o:?}");
        }
    }

    #[test]
    fn pinned_roll_gives_inverted() {
        let mut rng = Scripted::new(vec![0.8, 0.5]);
        let o = Orientation::choose(&mut rng);
        assert_eq!(o.kind, OrientationKind::Inverted);
        assert_eq!(o.angle_deg, 180.0);
        assert_eq!(o.transform(), "rotate(180.00deg)");
        assert_eq!(parse_rotation(&o.transform()), Some(180.0));
    }

    #[test]
    fn vertical_layout_stacks_downwards() {
        let mut rng = Scripted::constant(0.5);
        let placed = layout(OrientationKind::Vertical, 3, &mut rng).unwrap();
        assert_eq!(placed.len(), 3);
        assert_eq!(placed[0].top_px, 0.0);
        assert_eq!(placed[2].top_px, 50.0);
        assert!(placed.iter().all(|p| p.display == "block" && p.left_px == 0.0));
    }

    #[test]
    fn rotations_keep_inline_flow() {
        let mut rng = seeded(3);
        assert!(layout(OrientationKind::Steep, 4, &mut rng).is_none());
        assert!(layout(OrientationKind::Slight, 4, &mut rng).is_none());
    }
}
