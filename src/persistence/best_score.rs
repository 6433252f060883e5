use anyhow::{Context, Result};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicU32, AtomicUsize, Ordering},
        Arc,
    },
};

use crate::core::config::GameConfig;

/// Single-scalar persistence seam for the best score.
pub trait BestScoreStore: Send + Sync {
    /// Stored best score. A store that has never been written reports `Ok(0)`.
    fn read(&self) -> Result<u32>;
    fn write(&mut self, score: u32) -> Result<()>;
    fn describe(&self) -> String;
}

/// Read the store, logging and falling back to 0 on any failure.
pub fn read_or_zero(store: &dyn BestScoreStore) -> u32 {
    match store.read() {
        Ok(v) => v,
        Err(e) => {
            warn!(target: "best_score", "could not read best score from {}: {e:#}; using 0", store.describe());
            0
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct BestScoreRecord {
    best_score: u32,
}

/// RON file holding `(best_score: N)`.
#[derive(Debug, Clone)]
pub struct FileBestScoreStore {
    path: PathBuf,
}

impl FileBestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileBestScoreStore {
    fn read(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }
        let txt = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        let record: BestScoreRecord =
            ron::from_str(&txt).with_context(|| format!("parse {}", self.path.display()))?;
        Ok(record.best_score)
    }

    fn write(&mut self, score: u32) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let txt = ron::ser::to_string_pretty(
            &BestScoreRecord { best_score: score },
            ron::ser::PrettyConfig::default(),
        )
        .context("serialize best score")?;
        fs::write(&self.path, txt).with_context(|| format!("write {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("file '{}'", self.path.display())
    }
}

/// In-process store. Clones share the same cell, so a test can keep a handle after
/// moving a clone into the engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryBestScoreStore {
    value: Arc<AtomicU32>,
    writes: Arc<AtomicUsize>,
}

impl MemoryBestScoreStore {
    pub fn with_value(value: u32) -> Self {
        let store = Self::default();
        store.value.store(value, Ordering::Relaxed);
        store
    }

    pub fn value(&self) -> u32 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl BestScoreStore for MemoryBestScoreStore {
    fn read(&self) -> Result<u32> {
        Ok(self.value())
    }

    fn write(&mut self, score: u32) -> Result<()> {
        self.value.store(score, Ordering::Relaxed);
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}

/// Browser `localStorage` entry holding the score as a decimal string.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageBestScoreStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageBestScoreStore {
    pub const DEFAULT_KEY: &'static str = "swatch_hunt.best_score";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        window
            .local_storage()
            .map_err(|e| anyhow::anyhow!("localStorage unavailable: {e:?}"))?
            .ok_or_else(|| anyhow::anyhow!("localStorage disabled"))
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageBestScoreStore {
    fn read(&self) -> Result<u32> {
        let raw = Self::storage()?
            .get_item(&self.key)
            .map_err(|e| anyhow::anyhow!("getItem failed: {e:?}"))?;
        match raw {
            None => Ok(0),
            Some(s) => s
                .trim()
                .parse::<u32>()
                .with_context(|| format!("corrupt value '{s}' under {}", self.key)),
        }
    }

    fn write(&mut self, score: u32) -> Result<()> {
        Self::storage()?
            .set_item(&self.key, &score.to_string())
            .map_err(|e| anyhow::anyhow!("setItem failed: {e:?}"))
    }

    fn describe(&self) -> String {
        format!("localStorage '{}'", self.key)
    }
}

/// Store matching the platform: `localStorage` in the browser, the configured RON file
/// on native, memory when no path is configured.
pub fn store_for_config(cfg: &GameConfig) -> Box<dyn BestScoreStore> {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = cfg;
        Box::new(LocalStorageBestScoreStore::new(LocalStorageBestScoreStore::DEFAULT_KEY))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if cfg.best_score_path.trim().is_empty() {
            Box::new(MemoryBestScoreStore::default())
        } else {
            Box::new(FileBestScoreStore::new(cfg.best_score_path.trim()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_clones_share_value() {
        let handle = MemoryBestScoreStore::with_value(4);
        let mut boxed: Box<dyn BestScoreStore> = Box::new(handle.clone());
        assert_eq!(boxed.read().unwrap(), 4);
        boxed.write(9).unwrap();
        assert_eq!(handle.value(), 9);
        assert_eq!(handle.write_count(), 1);
    }

    #[test]
    fn empty_path_falls_back_to_memory() {
        let cfg = GameConfig {
            best_score_path: "  ".into(),
            ..Default::default()
        };
        assert_eq!(store_for_config(&cfg).describe(), "memory");
    }
}
