use crate::core::config::GameConfig;
use crate::gameplay::engine::RoundEngine;
use bevy::prelude::*;

/// Exits the app after `window.autoClose` seconds (> 0). Used for unattended smoke runs.
#[derive(Resource, Deref, DerefMut)]
pub struct AutoCloseTimer(Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_autoclose)
            .add_systems(Update, check_autoclose.run_if(resource_exists::<AutoCloseTimer>));
    }
}

fn setup_autoclose(mut commands: Commands, cfg: Res<GameConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "AutoClose: will exit after {secs} seconds");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn check_autoclose(
    time: Res<Time>,
    mut timer: ResMut<AutoCloseTimer>,
    engine: Option<Res<RoundEngine>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if !timer.tick(time.delta()).just_finished() {
        return;
    }
    match engine {
        Some(e) => info!(
            "AutoClose: exiting in {:?} with score {} (best {})",
            e.phase(),
            e.session().score,
            e.best_score()
        ),
        None => info!("AutoClose: timer finished, requesting app exit"),
    }
    ev_exit.write(AppExit::Success);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_by_default() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.add_plugins(AutoClosePlugin);
        app.update();
        assert!(!app.world().contains_resource::<AutoCloseTimer>());
    }

    #[test]
    fn positive_seconds_arm_timer() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let mut cfg = GameConfig::default();
        cfg.window.auto_close = 2.5;
        app.insert_resource(cfg);
        app.add_plugins(AutoClosePlugin);
        app.update();
        let timer = app.world().resource::<AutoCloseTimer>();
        assert_eq!(timer.duration().as_secs_f32(), 2.5);
    }
}
