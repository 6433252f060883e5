//! Session state machine.
//!
//! `Idle -> Active -> GameOver`, and `start()` from any phase re-enters `Active` with a
//! fresh session. The engine owns its RNG and best-score store; it never touches a timer.
//! Instead it queues [`EngineSignal`]s that the host drains and acts on (heartbeat
//! start/stop, grid redraw, celebration).

use bevy::platform::time::Instant;
use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

use crate::core::color::HslColor;
use crate::core::config::{GameConfig, RulesConfig};
use crate::gameplay::color_gen::{ColorGenerator, Round, GRID_SIZE};
use crate::persistence::best_score::{read_or_zero, store_for_config, BestScoreStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Active,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session not active; nothing changed.
    Inactive,
    Running { time_remaining: u32 },
    /// This tick emptied the clock and ended the session.
    Expired,
}

/// Side effects requested from the host, in the order they happened.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum EngineSignal {
    StartHeartbeat,
    StopHeartbeat,
    RoundChanged { level: u32 },
    NewBest { score: u32, previous: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub score: u32,
    pub level: u32,
    pub time_remaining: u32,
    pub phase: Phase,
    pub best_score: u32,
}

impl Session {
    fn idle(best_score: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            time_remaining: 0,
            phase: Phase::Idle,
            best_score,
        }
    }

    pub fn active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

/// What the renderer gets to see: everything except the target index.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub score: u32,
    pub level: u32,
    pub time_remaining: u32,
    pub max_time: u32,
    pub best_score: u32,
    pub phase: Phase,
    pub active: bool,
    pub over: bool,
    pub swatches: Option<[HslColor; GRID_SIZE]>,
}

#[derive(Resource)]
pub struct RoundEngine {
    rules: RulesConfig,
    generator: ColorGenerator,
    rng: StdRng,
    store: Box<dyn BestScoreStore>,
    session: Session,
    round: Option<Round>,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    signals: Vec<EngineSignal>,
}

impl RoundEngine {
    /// Engine for `cfg`. Seeds from `cfg.seed` when present, otherwise from entropy.
    /// The best score is read from `store` once, here.
    pub fn new(cfg: &GameConfig, store: Box<dyn BestScoreStore>) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(
            cfg.rules.clone(),
            ColorGenerator::new(cfg.difficulty.clone(), cfg.palette.clone()),
            rng,
            store,
        )
    }

    pub fn with_rng(
        rules: RulesConfig,
        generator: ColorGenerator,
        rng: StdRng,
        store: Box<dyn BestScoreStore>,
    ) -> Self {
        let best_score = read_or_zero(store.as_ref());
        info!(target: "engine", "best score {best_score} loaded from {}", store.describe());
        Self {
            rules,
            generator,
            rng,
            store,
            session: Session::idle(best_score),
            round: None,
            started_at: None,
            ended_at: None,
            signals: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        let initial = self.rules.initial_time.min(self.rules.max_time);
        self.session = Session {
            score: 0,
            level: 1,
            time_remaining: initial,
            phase: Phase::Active,
            best_score: self.session.best_score,
        };
        self.started_at = Some(Instant::now());
        self.ended_at = None;
        self.signals.push(EngineSignal::StartHeartbeat);
        self.next_round();
        info!(target: "engine", "session started: {initial}s on the clock, best {}", self.session.best_score);
    }

    /// One heartbeat second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.session.active() {
            return TickOutcome::Inactive;
        }
        self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
        if self.session.time_remaining == 0 {
            self.finish();
            return TickOutcome::Expired;
        }
        debug!(target: "engine", "tick: {}s left", self.session.time_remaining);
        TickOutcome::Running {
            time_remaining: self.session.time_remaining,
        }
    }

    /// Evaluate a click on swatch `index`. `None` when no session is active.
    pub fn submit_guess(&mut self, index: usize) -> Option<GuessOutcome> {
        if !self.session.active() {
            debug!(target: "engine", "guess {index} ignored in {:?}", self.session.phase);
            return None;
        }
        let correct = self.round.as_ref().is_some_and(|r| r.is_target(index));
        if correct {
            let s = &mut self.session;
            s.score += 1;
            s.level += 1;
            s.time_remaining = (s.time_remaining + self.rules.correct_bonus).min(self.rules.max_time);
            debug!(target: "engine", "correct: score {} level {} time {}", s.score, s.level, s.time_remaining);
            self.next_round();
            Some(GuessOutcome::Correct)
        } else {
            let s = &mut self.session;
            s.time_remaining = s.time_remaining.saturating_sub(self.rules.wrong_penalty);
            debug!(target: "engine", "incorrect guess {index}: time {}", s.time_remaining);
            if s.time_remaining == 0 && self.rules.penalty_ends_game {
                self.finish();
            }
            Some(GuessOutcome::Incorrect)
        }
    }

    fn next_round(&mut self) {
        let round = self.generator.build_round(self.session.level, &mut self.rng);
        debug!(target: "engine", "level {} round: delta {} base {}", round.level, round.delta, round.base);
        self.signals.push(EngineSignal::RoundChanged { level: round.level });
        self.round = Some(round);
    }

    fn finish(&mut self) {
        let s = &mut self.session;
        s.phase = Phase::GameOver;
        s.time_remaining = 0;
        self.ended_at = Some(Instant::now());
        self.signals.push(EngineSignal::StopHeartbeat);
        let elapsed = self.elapsed().unwrap_or_default();
        info!(
            target: "engine",
            "game over: score {} level {} after {:.1}s",
            self.session.score,
            self.session.level,
            elapsed.as_secs_f32()
        );
        let score = self.session.score;
        let previous = self.session.best_score;
        if score > previous {
            self.session.best_score = score;
            match self.store.write(score) {
                Ok(()) => info!(target: "best_score", "new best {score} (was {previous})"),
                Err(e) => warn!(target: "best_score", "new best {score} not persisted to {}: {e:#}", self.store.describe()),
            }
            self.signals.push(EngineSignal::NewBest { score, previous });
        }
    }

    pub fn has_pending_signals(&self) -> bool {
        !self.signals.is_empty()
    }

    /// Signals queued since the last drain.
    pub fn drain_signals(&mut self) -> Vec<EngineSignal> {
        std::mem::take(&mut self.signals)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn best_score(&self) -> u32 {
        self.session.best_score
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Time since `start()`, frozen at game over. `None` before the first session.
    pub fn elapsed(&self) -> Option<Duration> {
        let start = self.started_at?;
        Some(match self.ended_at {
            Some(end) => end.saturating_duration_since(start),
            None => start.elapsed(),
        })
    }

    pub fn view(&self) -> SessionView {
        let s = &self.session;
        SessionView {
            score: s.score,
            level: s.level,
            time_remaining: s.time_remaining,
            max_time: self.rules.max_time,
            best_score: s.best_score,
            phase: s.phase,
            active: s.active(),
            over: s.over(),
            swatches: self.round.as_ref().map(|r| r.swatches),
        }
    }
}

impl FromWorld for RoundEngine {
    fn from_world(world: &mut World) -> Self {
        let cfg = world.get_resource::<GameConfig>().cloned().unwrap_or_default();
        let store = store_for_config(&cfg);
        RoundEngine::new(&cfg, store)
    }
}
