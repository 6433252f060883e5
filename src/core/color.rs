use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hue is degrees on the color wheel; saturation and lightness are whole percentages.
pub const HUE_MAX: u16 = 360;
pub const PERCENT_MAX: u8 = 100;

/// Integer HSL swatch color. Plain value, no identity beyond its channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HslColor {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl HslColor {
    /// Builds a color, wrapping hue into [0,360) and clamping the percentages to [0,100].
    pub fn new(hue: i32, saturation: i32, lightness: i32) -> Self {
        Self {
            hue: hue.rem_euclid(HUE_MAX as i32) as u16,
            saturation: saturation.clamp(0, PERCENT_MAX as i32) as u8,
            lightness: lightness.clamp(0, PERCENT_MAX as i32) as u8,
        }
    }

    pub fn channel(&self, channel: Channel) -> i32 {
        match channel {
            Channel::Hue => self.hue as i32,
            Channel::Saturation => self.saturation as i32,
            Channel::Lightness => self.lightness as i32,
        }
    }

    /// Channels on which `self` and `other` disagree.
    pub fn differing_channels(&self, other: &HslColor) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|c| self.channel(*c) != other.channel(*c))
            .collect()
    }

    pub fn to_bevy(self) -> Color {
        Color::hsl(
            self.hue as f32,
            self.saturation as f32 / PERCENT_MAX as f32,
            self.lightness as f32 / PERCENT_MAX as f32,
        )
    }
}

impl From<HslColor> for Color {
    fn from(c: HslColor) -> Self {
        c.to_bevy()
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Hue,
    Saturation,
    Lightness,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Hue, Channel::Saturation, Channel::Lightness];
}
