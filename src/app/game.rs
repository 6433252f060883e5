// This file is part of Swatch Hunt.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::debug::DebugPlugin;
use crate::gameplay::session::RoundEnginePlugin;
use crate::interaction::input::swatch_input::SwatchInputPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::heartbeat::HeartbeatPlugin;
use crate::rendering::celebration::CelebrationPlugin;
use crate::rendering::grid::GridUiPlugin;

/// Everything the windowed game needs on top of `DefaultPlugins`.
/// Expects `GameConfig` (and optionally a prebuilt `RoundEngine`) to be inserted first.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            RoundEnginePlugin,
            HeartbeatPlugin,
            SwatchInputPlugin,
            GridUiPlugin,
            CelebrationPlugin,
            DebugPlugin,
            AutoClosePlugin,
        ));
    }
}
