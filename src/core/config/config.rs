use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["assets/config/game.ron", "assets/config/game.local.ron"];

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 860.0,
            title: "Swatch Hunt".into(),
            auto_close: 0.0,
        }
    }
}

/// Time budget and scoring rules for one session. All values are whole seconds.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub initial_time: u32,
    /// Upper bound for the countdown; correct-guess bonuses never push past it.
    pub max_time: u32,
    pub correct_bonus: u32,
    pub wrong_penalty: u32,
    /// End the session in the same step when a wrong-guess penalty empties the clock.
    pub penalty_ends_game: bool,
}
impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            initial_time: 30,
            max_time: 30,
            correct_bonus: 2,
            wrong_penalty: 3,
            penalty_ends_game: true,
        }
    }
}

/// Staircase difficulty curve: `max(min_delta, base_delta - level / step_levels)`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DifficultyConfig {
    pub base_delta: u32,
    pub step_levels: u32,
    pub min_delta: u32,
}
impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            base_delta: 15,
            step_levels: 4,
            min_delta: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ChannelRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for ChannelRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

/// Inclusive ranges the base color of each round is drawn from.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub hue: ChannelRange<u16>,
    pub saturation: ChannelRange<u8>,
    pub lightness: ChannelRange<u8>,
}
impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            hue: ChannelRange { min: 0, max: 359 },
            saturation: ChannelRange { min: 40, max: 80 },
            lightness: ChannelRange { min: 40, max: 70 },
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub rules: RulesConfig,
    pub difficulty: DifficultyConfig,
    pub palette: PaletteConfig,
    /// Fixed RNG seed for reproducible sessions; entropy-seeded when absent.
    pub seed: Option<u64>,
    pub best_score_path: String,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            rules: Default::default(),
            difficulty: Default::default(),
            palette: Default::default(),
            seed: None,
            best_score_path: "best_score.ron".into(),
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Merge every readable RON file in order (later files override earlier keys) and
    /// deserialize the result. Returns the config, the paths that were applied, and the
    /// problems encountered. Never fails: defaults stand in for anything unusable.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match &mut merged {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!("failed to deserialize merged config; using defaults: {e}"));
                (GameConfig::default(), used, errors)
            }
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        let r = &self.rules;
        if r.max_time == 0 {
            w.push("rules.max_time is 0; every session ends on the first tick".into());
        }
        if r.initial_time > r.max_time {
            w.push(format!(
                "rules.initial_time {} exceeds rules.max_time {}; clamped at start",
                r.initial_time, r.max_time
            ));
        }
        if r.initial_time == 0 {
            w.push("rules.initial_time is 0; sessions end immediately".into());
        }
        if r.wrong_penalty == 0 {
            w.push("rules.wrong_penalty is 0; wrong guesses are free".into());
        }
        let d = &self.difficulty;
        if d.min_delta == 0 {
            w.push("difficulty.min_delta 0 -> raised to 1 so the odd swatch stays visible".into());
        }
        if d.step_levels == 0 {
            w.push("difficulty.step_levels 0 -> treated as 1".into());
        }
        if d.base_delta < d.min_delta {
            w.push(format!(
                "difficulty.base_delta {} below min_delta {}; curve is flat",
                d.base_delta, d.min_delta
            ));
        }
        if d.base_delta >= u32::from(crate::core::color::HUE_MAX) {
            w.push(format!(
                "difficulty.base_delta {} spans a full hue turn; hue targets can wrap back onto the base",
                d.base_delta
            ));
        }
        fn check_range<T: PartialOrd + std::fmt::Display + Copy>(
            w: &mut Vec<String>,
            label: &str,
            r: &ChannelRange<T>,
            upper: T,
        ) {
            if r.min > r.max {
                w.push(format!("{label} min ({}) greater than max ({})", r.min, r.max));
            }
            if r.max > upper {
                w.push(format!("{label} max ({}) above {upper}; clamped", r.max));
            }
        }
        check_range(&mut w, "palette.hue", &self.palette.hue, 359);
        check_range(&mut w, "palette.saturation", &self.palette.saturation, 100);
        check_range(&mut w, "palette.lightness", &self.palette.lightness, 100);
        if self.best_score_path.trim().is_empty() {
            w.push("best_score_path empty; best score will not persist".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_rules() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.rules.initial_time, 30);
        assert_eq!(cfg.rules.max_time, 30);
        assert_eq!(cfg.rules.correct_bonus, 2);
        assert_eq!(cfg.rules.wrong_penalty, 3);
        assert_eq!(cfg.difficulty, DifficultyConfig { base_delta: 15, step_levels: 4, min_delta: 1 });
        assert_eq!(cfg.palette.saturation, ChannelRange { min: 40, max: 80 });
        assert_eq!(cfg.palette.lightness, ChannelRange { min: 40, max: 70 });
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn partial_ron_keeps_defaults_for_missing_keys() {
        let cfg: GameConfig = ron::from_str("(rules: (wrong_penalty: 5), seed: Some(9))").unwrap();
        assert_eq!(cfg.rules.wrong_penalty, 5);
        assert_eq!(cfg.rules.initial_time, 30);
        assert_eq!(cfg.seed, Some(9));
    }

    #[test]
    fn validate_flags_full_turn_hue_delta() {
        let mut cfg = GameConfig::default();
        cfg.difficulty.base_delta = 360;
        assert!(cfg.validate().iter().any(|w| w.contains("difficulty.base_delta")));
        cfg.difficulty.base_delta = 359;
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn validate_flags_inverted_ranges() {
        let mut cfg = GameConfig::default();
        cfg.palette.lightness = ChannelRange { min: 80, max: 20 };
        cfg.rules.initial_time = 45;
        let warns = cfg.validate();
        assert!(warns.iter().any(|w| w.contains("palette.lightness")));
        assert!(warns.iter().any(|w| w.contains("initial_time")));
    }
}
