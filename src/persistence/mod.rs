pub mod best_score;

pub use best_score::{
    read_or_zero, store_for_config, BestScoreStore, FileBestScoreStore, MemoryBestScoreStore,
};
#[cfg(target_arch = "wasm32")]
pub use best_score::LocalStorageBestScoreStore;
