use bevy::prelude::*;

/// Clickable grid cell. `index` is row-major in [0,25).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub index: usize,
}

/// Root node of the swatch grid.
#[derive(Component)]
pub struct GridRoot;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Score,
    Level,
    Time,
    Best,
    Status,
}
