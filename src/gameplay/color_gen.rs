//! Round color generation.
//!
//! Every round is one base color repeated across the grid plus a single target swatch
//! shifted by `delta` on one HSL channel. `delta` shrinks in steps as the level rises,
//! bottoming out at the configured floor (never below 1) so the target always exists.

use rand::Rng;

use crate::core::color::{Channel, HslColor, HUE_MAX, PERCENT_MAX};
use crate::core::config::{ChannelRange, DifficultyConfig, PaletteConfig};

pub const GRID_SIDE: usize = 5;
pub const GRID_SIZE: usize = GRID_SIDE * GRID_SIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn value(self) -> i32 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }
}

/// Channel offset for `level`. Non-increasing in `level` and always >= 1.
pub fn delta_for_level(level: u32, difficulty: &DifficultyConfig) -> u32 {
    let step = difficulty.step_levels.max(1);
    let floor = difficulty.min_delta.max(1);
    difficulty.base_delta.saturating_sub(level / step).max(floor)
}

/// Shift one channel of `base` by `delta` in direction `sign`. Hue wraps around the
/// wheel; saturation and lightness clamp to [0,100].
pub fn offset(base: HslColor, channel: Channel, sign: Sign, delta: u32) -> HslColor {
    let shift = sign.value() * delta as i32;
    match channel {
        Channel::Hue => HslColor::new(
            base.hue as i32 + shift,
            base.saturation as i32,
            base.lightness as i32,
        ),
        Channel::Saturation => HslColor::new(
            base.hue as i32,
            base.saturation as i32 + shift,
            base.lightness as i32,
        ),
        Channel::Lightness => HslColor::new(
            base.hue as i32,
            base.saturation as i32,
            base.lightness as i32 + shift,
        ),
    }
}

/// One grid instance. `swatches[target_index]` is the only entry not equal to `base`.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub swatches: [HslColor; GRID_SIZE],
    pub target_index: usize,
    pub base: HslColor,
    pub target: HslColor,
    pub level: u32,
    pub delta: u32,
}

impl Round {
    pub fn is_target(&self, index: usize) -> bool {
        index == self.target_index
    }

    /// The channel the target was shifted on.
    pub fn odd_channel(&self) -> Option<Channel> {
        self.base.differing_channels(&self.target).first().copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorGenerator {
    pub difficulty: DifficultyConfig,
    pub palette: PaletteConfig,
}

impl ColorGenerator {
    pub fn new(difficulty: DifficultyConfig, palette: PaletteConfig) -> Self {
        Self { difficulty, palette }
    }

    pub fn delta(&self, level: u32) -> u32 {
        delta_for_level(level, &self.difficulty)
    }

    pub fn generate_base<R: Rng + ?Sized>(&self, rng: &mut R) -> HslColor {
        let hue = sample(rng, self.palette.hue, HUE_MAX - 1);
        let saturation = sample(rng, self.palette.saturation, PERCENT_MAX);
        let lightness = sample(rng, self.palette.lightness, PERCENT_MAX);
        HslColor { hue, saturation, lightness }
    }

    pub fn generate_target<R: Rng + ?Sized>(&self, base: HslColor, level: u32, rng: &mut R) -> HslColor {
        let channel = Channel::ALL[rng.gen_range(0..Channel::ALL.len())];
        let sign = if rng.gen_bool(0.5) { Sign::Plus } else { Sign::Minus };
        let delta = self.delta(level);
        let target = offset(base, channel, sign, delta);
        if target != base {
            return target;
        }
        // Clamped against a bound (e.g. lightness 100 going up): go the other way instead.
        offset(base, channel, sign.flipped(), delta)
    }

    pub fn build_round<R: Rng + ?Sized>(&self, level: u32, rng: &mut R) -> Round {
        let base = self.generate_base(rng);
        let target = self.generate_target(base, level, rng);
        let target_index = rng.gen_range(0..GRID_SIZE);
        let mut swatches = [base; GRID_SIZE];
        swatches[target_index] = target;
        Round {
            swatches,
            target_index,
            base,
            target,
            level,
            delta: self.delta(level),
        }
    }
}

fn sample<T, R>(rng: &mut R, range: ChannelRange<T>, upper: T) -> T
where
    T: rand::distributions::uniform::SampleUniform + PartialOrd + Copy,
    R: Rng + ?Sized,
{
    let clamp = |v: T| if v > upper { upper } else { v };
    let (lo, hi) = if range.min <= range.max {
        (clamp(range.min), clamp(range.max))
    } else {
        (clamp(range.max), clamp(range.min))
    };
    rng.gen_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn delta_follows_staircase_and_floors_at_one() {
        let d = DifficultyConfig::default();
        assert_eq!(delta_for_level(1, &d), 15);
        assert_eq!(delta_for_level(3, &d), 15);
        assert_eq!(delta_for_level(4, &d), 14);
        assert_eq!(delta_for_level(8, &d), 13);
        assert_eq!(delta_for_level(56, &d), 1);
        assert_eq!(delta_for_level(10_000, &d), 1);
        let mut prev = u32::MAX;
        for level in 1..500 {
            let delta = delta_for_level(level, &d);
            assert!(delta >= 1);
            assert!(delta <= prev, "delta grew at level {level}");
            prev = delta;
        }
    }

    #[test]
    fn zero_floor_and_step_are_sanitized() {
        let d = DifficultyConfig { base_delta: 3, step_levels: 0, min_delta: 0 };
        assert_eq!(delta_for_level(2, &d), 1);
        assert_eq!(delta_for_level(100, &d), 1);
    }

    #[test]
    fn hue_offset_wraps_around_wheel() {
        let base = HslColor::new(5, 50, 50);
        assert_eq!(offset(base, Channel::Hue, Sign::Minus, 15).hue, 350);
        let base = HslColor::new(355, 50, 50);
        assert_eq!(offset(base, Channel::Hue, Sign::Plus, 15).hue, 10);
    }

    #[test]
    fn saturation_and_lightness_offsets_clamp() {
        let base = HslColor::new(120, 95, 3);
        assert_eq!(offset(base, Channel::Saturation, Sign::Plus, 15).saturation, 100);
        assert_eq!(offset(base, Channel::Lightness, Sign::Minus, 15).lightness, 0);
    }

    #[test]
    fn target_differs_in_exactly_one_channel() {
        let generator = ColorGenerator::default();
        let mut rng = StdRng::seed_from_u64(7);
        for level in 1..80 {
            let base = generator.generate_base(&mut rng);
            let target = generator.generate_target(base, level, &mut rng);
            assert_eq!(base.differing_channels(&target).len(), 1);
        }
    }

    #[test]
    fn clamped_target_flips_direction() {
        let generator = ColorGenerator::default();
        let base = HslColor::new(0, 100, 100);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..64 {
            assert_ne!(generator.generate_target(base, 1, &mut rng), base);
        }
    }

    #[test]
    fn base_stays_inside_palette() {
        let generator = ColorGenerator::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let c = generator.generate_base(&mut rng);
            assert!(c.hue < 360);
            assert!((40..=80).contains(&c.saturation));
            assert!((40..=70).contains(&c.lightness));
        }
    }

    #[test]
    fn round_has_single_odd_swatch_at_target_index() {
        let generator = ColorGenerator::default();
        let mut rng = StdRng::seed_from_u64(42);
        for level in [1, 5, 20, 60] {
            let round = generator.build_round(level, &mut rng);
            assert_eq!(round.swatches.len(), GRID_SIZE);
            let odd: Vec<usize> = (0..GRID_SIZE)
                .filter(|&i| round.swatches[i] != round.base)
                .collect();
            assert_eq!(odd, vec![round.target_index]);
            assert_eq!(round.swatches[round.target_index], round.target);
            assert_eq!(round.delta, delta_for_level(level, &generator.difficulty));
            assert!(round.odd_channel().is_some());
        }
    }

    #[test]
    fn same_seed_same_round() {
        let generator = ColorGenerator::default();
        let a = generator.build_round(9, &mut StdRng::seed_from_u64(99));
        let b = generator.build_round(9, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
