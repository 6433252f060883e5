use bevy::prelude::*;

use crate::core::components::Swatch;
use crate::gameplay::engine::{Phase, RoundEngine};
use crate::gameplay::session::{GuessRequested, SessionSet, StartRequested};

/// Keys that start (or restart) a session.
pub const START_KEYS: [KeyCode; 3] = [KeyCode::Space, KeyCode::Enter, KeyCode::NumpadEnter];

pub struct SwatchInputPlugin;

impl Plugin for SwatchInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (start_from_keyboard, swatch_clicks).in_set(SessionSet::Input),
        );
    }
}

pub fn start_from_keyboard(keys: Res<ButtonInput<KeyCode>>, mut start: EventWriter<StartRequested>) {
    if keys.any_just_pressed(START_KEYS) {
        info!(target: "input", "start requested from keyboard");
        start.write(StartRequested);
    }
}

/// A press on a swatch is a guess while a session runs and starts the first session.
/// After game over presses are ignored; restarting takes a start key.
pub fn swatch_clicks(
    q: Query<(&Interaction, &Swatch), Changed<Interaction>>,
    engine: Res<RoundEngine>,
    mut guesses: EventWriter<GuessRequested>,
    mut start: EventWriter<StartRequested>,
) {
    for (interaction, swatch) in &q {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match engine.phase() {
            Phase::Active => {
                guesses.write(GuessRequested { index: swatch.index });
            }
            Phase::Idle => {
                start.write(StartRequested);
                // One start per frame is enough.
                break;
            }
            // Late clicks from the previous session must not wipe its result.
            Phase::GameOver => {}
        }
    }
}
