use swatch_hunt::core::config::{GameConfig, RulesConfig};
use swatch_hunt::{
    EngineSignal, GuessOutcome, MemoryBestScoreStore, Phase, RoundEngine, TickOutcome, GRID_SIZE,
};

fn engine_with(best: u32, seed: u64) -> (RoundEngine, MemoryBestScoreStore) {
    let store = MemoryBestScoreStore::with_value(best);
    let cfg = GameConfig {
        seed: Some(seed),
        ..Default::default()
    };
    (RoundEngine::new(&cfg, Box::new(store.clone())), store)
}

fn hit(e: &mut RoundEngine) -> Option<GuessOutcome> {
    let target = e.round().expect("active round").target_index;
    e.submit_guess(target)
}

fn miss(e: &mut RoundEngine) -> Option<GuessOutcome> {
    let target = e.round().expect("active round").target_index;
    e.submit_guess((target + 1) % GRID_SIZE)
}

fn run_out_clock(e: &mut RoundEngine) -> u32 {
    let mut ticks = 0;
    while e.tick() != TickOutcome::Expired {
        ticks += 1;
        assert!(ticks < 1_000, "clock never expired");
    }
    ticks + 1
}

#[test]
fn untouched_session_expires_after_initial_time() {
    let (mut e, _) = engine_with(0, 1);
    e.start();
    assert_eq!(run_out_clock(&mut e), 30);
    let s = e.session();
    assert_eq!(s.phase, Phase::GameOver);
    assert!(!s.active());
    assert_eq!(s.time_remaining, 0);
}

#[test]
fn correct_guess_below_cap_adds_bonus() {
    let (mut e, _) = engine_with(0, 2);
    e.start();
    for _ in 0..10 {
        e.tick();
    }
    let old_round = e.round().cloned();
    assert_eq!(hit(&mut e), Some(GuessOutcome::Correct));
    let s = e.session();
    assert_eq!((s.score, s.level, s.time_remaining), (1, 2, 22));
    assert_ne!(e.round().cloned(), old_round);
}

#[test]
fn repeated_misses_floor_at_zero() {
    let cfg = GameConfig {
        seed: Some(3),
        rules: RulesConfig {
            penalty_ends_game: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut e = RoundEngine::new(&cfg, Box::new(MemoryBestScoreStore::default()));
    e.start();
    for _ in 0..15 {
        assert_eq!(miss(&mut e), Some(GuessOutcome::Incorrect));
    }
    assert_eq!(e.session().time_remaining, 0);
    assert_eq!(e.session().score, 0);
    assert_eq!(e.session().level, 1);
    assert_eq!(e.tick(), TickOutcome::Expired);
}

#[test]
fn difficulty_tightens_as_levels_climb() {
    let (mut e, _) = engine_with(0, 4);
    e.start();
    let mut deltas = Vec::new();
    for _ in 0..70 {
        deltas.push(e.round().unwrap().delta);
        hit(&mut e);
    }
    assert_eq!(deltas[0], 15);
    assert!(deltas.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(*deltas.last().unwrap(), 1);
}

#[test]
fn new_best_then_tie_across_sessions() {
    let (mut e, store) = engine_with(5, 5);

    e.start();
    for _ in 0..10 {
        hit(&mut e);
    }
    e.drain_signals();
    run_out_clock(&mut e);
    assert_eq!(e.best_score(), 10);
    let first: Vec<_> = e
        .drain_signals()
        .into_iter()
        .filter(|s| matches!(s, EngineSignal::NewBest { .. }))
        .collect();
    assert_eq!(first, vec![EngineSignal::NewBest { score: 10, previous: 5 }]);
    assert_eq!(store.write_count(), 1);

    e.start();
    for _ in 0..10 {
        hit(&mut e);
    }
    run_out_clock(&mut e);
    assert_eq!(e.best_score(), 10);
    assert!(!e
        .drain_signals()
        .iter()
        .any(|s| matches!(s, EngineSignal::NewBest { .. })));
    assert_eq!(store.write_count(), 1);
}

#[test]
fn restart_mid_session_resets_everything() {
    let (mut e, _) = engine_with(0, 6);
    e.start();
    hit(&mut e);
    miss(&mut e);
    e.tick();
    e.drain_signals();
    e.start();
    let s = e.session();
    assert_eq!((s.score, s.level, s.time_remaining), (0, 1, 30));
    assert_eq!(e.round().unwrap().level, 1);
    assert_eq!(e.drain_signals()[0], EngineSignal::StartHeartbeat);
}

#[test]
fn same_seed_replays_same_rounds() {
    let (mut a, _) = engine_with(0, 77);
    let (mut b, _) = engine_with(0, 77);
    a.start();
    b.start();
    for _ in 0..20 {
        assert_eq!(a.round(), b.round());
        hit(&mut a);
        hit(&mut b);
    }
}
