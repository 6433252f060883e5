use std::fs;

use swatch_hunt::core::config::GameConfig;
use swatch_hunt::{BestScoreStore, FileBestScoreStore, RoundEngine, TickOutcome};

#[test]
fn missing_file_reads_zero() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileBestScoreStore::new(dir.path().join("nope.ron"));
    assert_eq!(store.read().unwrap(), 0);
}

#[test]
fn write_creates_parent_dirs_and_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("best.ron");
    let mut store = FileBestScoreStore::new(&path);
    store.write(42).unwrap();
    assert!(path.exists());
    assert_eq!(FileBestScoreStore::new(&path).read().unwrap(), 42);
}

#[test]
fn corrupt_file_falls_back_to_zero_in_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best.ron");
    fs::write(&path, "definitely not ron {").unwrap();
    let store = FileBestScoreStore::new(&path);
    assert!(store.read().is_err());

    let cfg = GameConfig {
        seed: Some(1),
        ..Default::default()
    };
    let engine = RoundEngine::new(&cfg, Box::new(store));
    assert_eq!(engine.best_score(), 0);
}

#[test]
fn engine_persists_new_best_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best.ron");
    let cfg = GameConfig {
        seed: Some(8),
        ..Default::default()
    };
    let mut engine = RoundEngine::new(&cfg, Box::new(FileBestScoreStore::new(&path)));
    engine.start();
    for _ in 0..3 {
        let target = engine.round().unwrap().target_index;
        engine.submit_guess(target);
    }
    while engine.tick() != TickOutcome::Expired {}
    assert_eq!(FileBestScoreStore::new(&path).read().unwrap(), 3);

    // A fresh engine picks it up at construction.
    let reloaded = RoundEngine::new(&cfg, Box::new(FileBestScoreStore::new(&path)));
    assert_eq!(reloaded.best_score(), 3);
}
