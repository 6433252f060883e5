//! Debug module: feature gated session logging & cheat keys.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
pub mod keys; // pub for testing
#[cfg(feature = "debug")]
mod logging;

#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
pub struct DebugState {
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
    /// Last target index revealed with F1, for tests and repeated presses.
    pub last_revealed: Option<usize>,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            log_interval: 5.0,
            time_accum: 0.0,
            frame_counter: 0,
            last_revealed: None,
        }
    }
}

#[cfg(feature = "debug")]
pub struct DebugPlugin;
#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use crate::gameplay::session::SessionSet;
        use keys::debug_key_input_system;
        use logging::debug_logging_system;

        app.init_resource::<DebugState>().add_systems(
            Update,
            (debug_key_input_system, debug_logging_system).after(SessionSet::Present),
        );
    }
}

#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;
#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}
