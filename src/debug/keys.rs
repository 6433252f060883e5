#[cfg(feature = "debug")]
use super::DebugState;
#[cfg(feature = "debug")]
use crate::gameplay::engine::RoundEngine;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub const REVEAL_TARGET_KEY: KeyCode = KeyCode::F1;

/// F1 logs where the odd swatch is and how it was shifted.
#[cfg(feature = "debug")]
pub fn debug_key_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    engine: Res<RoundEngine>,
    mut state: ResMut<DebugState>,
) {
    if !keys.just_pressed(REVEAL_TARGET_KEY) {
        return;
    }
    let Some(round) = engine.round() else {
        info!("REVEAL no round yet");
        return;
    };
    state.last_revealed = Some(round.target_index);
    info!(
        "REVEAL target={} row={} col={} channel={:?} delta={} base={} target_color={}",
        round.target_index,
        round.target_index / crate::gameplay::color_gen::GRID_SIDE,
        round.target_index % crate::gameplay::color_gen::GRID_SIDE,
        round.odd_channel(),
        round.delta,
        round.base,
        round.target
    );
}
