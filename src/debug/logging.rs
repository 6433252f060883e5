#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::DebugState;
#[cfg(feature = "debug")]
use crate::gameplay::engine::{Phase, RoundEngine};

#[cfg(feature = "debug")]
pub fn debug_logging_system(time: Res<Time>, mut state: ResMut<DebugState>, engine: Res<RoundEngine>) {
    state.frame_counter += 1;
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    if engine.phase() != Phase::Active {
        return;
    }
    let s = engine.session();
    info!("SESSION frame={} elapsed={:.1}s score={} level={} time={} best={} delta={}",
        state.frame_counter,
        engine.elapsed().unwrap_or_default().as_secs_f32(),
        s.score,
        s.level,
        s.time_remaining,
        s.best_score,
        engine.round().map(|r| r.delta).unwrap_or_default());
}
