// This file is part of Swatch Hunt.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

use swatch_hunt::core::config::{GameConfig, DEFAULT_CONFIG_PATHS};
use swatch_hunt::GamePlugin;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Spot the odd swatch before the clock runs out", long_about = None)]
struct Cli {
    /// Config layers applied in order (defaults to assets/config/game.ron + game.local.ron)
    #[arg(long = "config")]
    configs: Vec<PathBuf>,
    /// Fixed RNG seed for a reproducible sequence of rounds
    #[arg(long)]
    seed: Option<u64>,
    /// Where the best score is kept (native builds)
    #[arg(long)]
    best_score_file: Option<PathBuf>,
    /// Exit after this many seconds (0 disables)
    #[arg(long)]
    auto_close: Option<f32>,
}

/// Outcome of config loading, logged once the log plugin is up.
#[derive(Resource, Debug, Default)]
struct ConfigLoadReport {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn load_config(cli: &Cli) -> (GameConfig, ConfigLoadReport) {
    let (mut cfg, used, errors) = if cli.configs.is_empty() {
        GameConfig::load_layered(DEFAULT_CONFIG_PATHS)
    } else {
        GameConfig::load_layered(cli.configs.iter())
    };
    if let Some(seed) = cli.seed {
        cfg.seed = Some(seed);
    }
    if let Some(path) = &cli.best_score_file {
        cfg.best_score_path = path.display().to_string();
    }
    if let Some(secs) = cli.auto_close {
        cfg.window.auto_close = secs;
    }
    let warnings = cfg.validate();
    (cfg, ConfigLoadReport { used, errors, warnings })
}

fn log_config_report(report: Res<ConfigLoadReport>) {
    if report.used.is_empty() {
        info!(target: "config", "no config files applied; using defaults");
    } else {
        info!(target: "config", "config layers applied: {}", report.used.join(", "));
    }
    for e in &report.errors {
        warn!(target: "config", "{e}");
    }
    for w in &report.warnings {
        warn!(target: "config", "validation: {w}");
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    // Browsers hand us no argv; fall back to defaults rather than exiting.
    let cli = if cfg!(target_arch = "wasm32") {
        Cli::default()
    } else {
        Cli::parse()
    };
    let (cfg, report) = load_config(&cli);

    App::new()
        .insert_resource(cfg.clone())
        .insert_resource(report)
        .insert_resource(ClearColor(Color::srgb(0.03, 0.03, 0.05)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .add_systems(Startup, log_config_report)
        .run();
}
