//! Fill-color assignment for clusters.
//!
//! Every confidence ring of one cluster shares a single fill color; only the
//! opacity varies per ring. Selection is injected through [`ColorPicker`] so
//! the geometry pipeline stays deterministic and testable. The randomized
//! behavior of the reference visualisation is available via
//! [`SeededPicker`], reproducible across runs for a fixed seed.

use crate::types::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ellipse surface colors of the reference visualisation.
pub const DEFAULT_PALETTE: [&str; 5] = [
    "gold",
    "mediumseagreen",
    "cornflowerblue",
    "lightblue",
    "peru",
];

pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE.iter().map(|&name| Color::from(name)).collect()
}

/// Chooses the fill color for the cluster with the given ordinal.
pub trait ColorPicker {
    fn pick(&mut self, cluster_index: usize) -> Color;
}

/// Deterministic picker: cluster ordinal modulo palette length.
#[derive(Clone, Debug)]
pub struct CyclingPicker {
    palette: Vec<Color>,
}

impl CyclingPicker {
    /// Panics if `palette` is empty.
    pub fn new(palette: Vec<Color>) -> Self {
        assert!(!palette.is_empty(), "palette must not be empty");
        Self { palette }
    }

    pub fn with_default_palette() -> Self {
        Self::new(default_palette())
    }
}

impl ColorPicker for CyclingPicker {
    fn pick(&mut self, cluster_index: usize) -> Color {
        self.palette[cluster_index % self.palette.len()].clone()
    }
}

/// Draws an independent palette color per cluster from a seeded generator.
#[derive(Clone, Debug)]
pub struct SeededPicker {
    palette: Vec<Color>,
    rng: StdRng,
}

impl SeededPicker {
    /// Panics if `palette` is empty.
    pub fn new(palette: Vec<Color>, seed: u64) -> Self {
        assert!(!palette.is_empty(), "palette must not be empty");
        Self {
            palette,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ColorPicker for SeededPicker {
    fn pick(&mut self, _cluster_index: usize) -> Color {
        let index = self.rng.gen_range(0..self.palette.len());
        self.palette[index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_picker_wraps_around() {
        let mut picker = CyclingPicker::with_default_palette();
        assert_eq!(picker.pick(0), Color::from("gold"));
        assert_eq!(picker.pick(4), Color::from("peru"));
        assert_eq!(picker.pick(5), Color::from("gold"));
    }

    #[test]
    fn seeded_picker_is_reproducible() {
        let mut a = SeededPicker::new(default_palette(), 42);
        let mut b = SeededPicker::new(default_palette(), 42);
        for i in 0..16 {
            assert_eq!(a.pick(i), b.pick(i));
        }
    }

    #[test]
    fn seeded_picker_stays_in_palette() {
        let palette = default_palette();
        let mut picker = SeededPicker::new(palette.clone(), 7);
        for i in 0..32 {
            assert!(palette.contains(&picker.pick(i)));
        }
    }
}
