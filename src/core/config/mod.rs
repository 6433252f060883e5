pub mod config;

pub use config::{
    ChannelRange, DifficultyConfig, GameConfig, PaletteConfig, RulesConfig, WindowConfig,
    DEFAULT_CONFIG_PATHS,
};
