use bevy::prelude::*;
use std::time::Duration;

use crate::gameplay::engine::{EngineSignal, RoundEngine, TickOutcome};
use crate::gameplay::session::SessionSet;

/// One-second countdown source. Runs only between `StartHeartbeat` and `StopHeartbeat`.
#[derive(Resource, Debug)]
pub struct Heartbeat {
    timer: Timer,
    running: bool,
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
            running: false,
        }
    }
}

impl Heartbeat {
    /// (Re)start from a full second; any partial second from a previous session is dropped.
    pub fn start(&mut self) {
        self.timer.reset();
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.timer.reset();
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Advance by `delta`; returns how many whole seconds elapsed.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.timer.tick(delta);
        self.timer.times_finished_this_tick()
    }
}

pub struct HeartbeatPlugin;

impl Plugin for HeartbeatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Heartbeat>().add_systems(
            Update,
            (sync_heartbeat, drive_heartbeat)
                .chain()
                .in_set(SessionSet::Heartbeat),
        );
    }
}

pub fn sync_heartbeat(mut signals: EventReader<EngineSignal>, mut heartbeat: ResMut<Heartbeat>) {
    for signal in signals.read() {
        match signal {
            EngineSignal::StartHeartbeat => {
                info!(target: "heartbeat", "countdown started");
                heartbeat.start();
            }
            EngineSignal::StopHeartbeat => {
                info!(target: "heartbeat", "countdown stopped");
                heartbeat.stop();
            }
            _ => {}
        }
    }
}

pub fn drive_heartbeat(
    time: Res<Time>,
    mut heartbeat: ResMut<Heartbeat>,
    mut engine: ResMut<RoundEngine>,
) {
    let seconds = heartbeat.advance(time.delta());
    for _ in 0..seconds {
        if engine.tick() == TickOutcome::Inactive {
            // Expired earlier in this batch of seconds; nothing left to count.
            heartbeat.stop();
            break;
        }
    }
}
