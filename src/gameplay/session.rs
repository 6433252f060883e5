use bevy::prelude::*;

use super::engine::{EngineSignal, GuessOutcome, RoundEngine};

/// Frame phases for one session update. Each runs after the previous one.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum SessionSet {
    /// Raw device input -> request events.
    Input,
    /// Requests applied to the engine.
    Apply,
    /// Engine signals published as events.
    Signals,
    /// Heartbeat start/stop and countdown ticks.
    Heartbeat,
    /// Renderer reads the new state.
    Present,
}

/// Player picked swatch `index`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessRequested {
    pub index: usize,
}

/// Player asked for a new game.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartRequested;

/// Result of an accepted guess, for feedback rendering.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessFeedback {
    pub index: usize,
    pub outcome: GuessOutcome,
}

/// Session ended on a new best score.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Celebrate {
    pub score: u32,
}

/// Wires [`RoundEngine`] into the schedule. Uses an engine already present in the world
/// or builds one from `GameConfig`.
pub struct RoundEnginePlugin;

impl Plugin for RoundEnginePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoundEngine>()
            .add_event::<GuessRequested>()
            .add_event::<StartRequested>()
            .add_event::<GuessFeedback>()
            .add_event::<Celebrate>()
            .add_event::<EngineSignal>()
            .configure_sets(
                Update,
                (
                    SessionSet::Input,
                    SessionSet::Apply,
                    SessionSet::Signals,
                    SessionSet::Heartbeat,
                    SessionSet::Present,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    (apply_start_requests, apply_guesses)
                        .chain()
                        .in_set(SessionSet::Apply),
                    publish_signals.in_set(SessionSet::Signals),
                ),
            );
    }
}

fn apply_start_requests(mut requests: EventReader<StartRequested>, mut engine: ResMut<RoundEngine>) {
    // Several presses in one frame still mean one new session.
    if requests.read().count() > 0 {
        engine.start();
    }
}

fn apply_guesses(
    mut requests: EventReader<GuessRequested>,
    mut engine: ResMut<RoundEngine>,
    mut feedback: EventWriter<GuessFeedback>,
) {
    for req in requests.read() {
        if let Some(outcome) = engine.submit_guess(req.index) {
            feedback.write(GuessFeedback {
                index: req.index,
                outcome,
            });
        }
    }
}

fn publish_signals(
    mut engine: ResMut<RoundEngine>,
    mut signals: EventWriter<EngineSignal>,
    mut celebrate: EventWriter<Celebrate>,
) {
    // Read-only check first so idle frames don't flag the engine as changed.
    if !engine.has_pending_signals() {
        return;
    }
    for signal in engine.drain_signals() {
        if let EngineSignal::NewBest { score, .. } = signal {
            celebrate.write(Celebrate { score });
        }
        signals.write(signal);
    }
}
