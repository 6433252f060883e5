pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod persistence;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::core::color::{Channel, HslColor};
pub use crate::core::config::{config::GameConfig, config::WindowConfig};
pub use crate::gameplay::color_gen::{ColorGenerator, Round, GRID_SIZE};
pub use crate::gameplay::engine::{EngineSignal, GuessOutcome, Phase, RoundEngine, TickOutcome};
pub use crate::persistence::best_score::{BestScoreStore, FileBestScoreStore, MemoryBestScoreStore};
