use bevy::prelude::*;
use bevy::ui::{AlignItems, Display, FlexDirection, JustifyContent, Node, RepeatedGridTrack};

use crate::core::components::{GridRoot, HudField, Swatch};
use crate::gameplay::color_gen::{GRID_SIDE, GRID_SIZE};
use crate::gameplay::engine::{GuessOutcome, Phase, RoundEngine, SessionView};
use crate::gameplay::session::{GuessFeedback, SessionSet};

const IDLE_SWATCH: Color = Color::srgb(0.22, 0.22, 0.26);
const GRID_BACKGROUND: Color = Color::srgb(0.08, 0.08, 0.1);
const CORRECT_FLASH: Color = Color::srgb(0.15, 0.55, 0.25);
const INCORRECT_FLASH: Color = Color::srgb(0.7, 0.15, 0.15);
const LOW_TIME: Color = Color::srgb(1.0, 0.35, 0.3);
const FLASH_SECS: f32 = 0.3;
/// Countdown values at or below this render in the warning color.
const LOW_TIME_SECS: u32 = 5;

pub struct GridUiPlugin;

impl Plugin for GridUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FeedbackFlash>()
            .add_systems(Startup, spawn_grid_ui)
            .add_systems(
                Update,
                (
                    start_feedback_flash,
                    fade_feedback_flash,
                    refresh_swatches,
                    refresh_hud,
                )
                    .chain()
                    .in_set(SessionSet::Present),
            );
    }
}

/// Short tint behind the grid after each accepted guess.
#[derive(Resource, Debug)]
pub struct FeedbackFlash {
    timer: Timer,
    color: Color,
}

impl Default for FeedbackFlash {
    fn default() -> Self {
        let mut timer = Timer::from_seconds(FLASH_SECS, TimerMode::Once);
        // Start finished so nothing flashes before the first guess.
        timer.tick(timer.duration());
        Self {
            timer,
            color: GRID_BACKGROUND,
        }
    }
}

fn spawn_grid_ui(mut commands: Commands) {
    commands.spawn(Camera2d);

    let root = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.03, 0.03, 0.05)),
        ))
        .id();

    commands.entity(root).with_children(|p| {
        p.spawn(Node {
            flex_direction: FlexDirection::Row,
            column_gap: Val::Px(24.0),
            ..default()
        })
        .with_children(|hud| {
            for field in [HudField::Score, HudField::Level, HudField::Time, HudField::Best] {
                hud.spawn((
                    field,
                    Text::new(""),
                    TextFont {
                        font_size: 26.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            }
        });

        p.spawn((
            GridRoot,
            Node {
                display: Display::Grid,
                width: Val::Px(560.0),
                height: Val::Px(560.0),
                grid_template_columns: RepeatedGridTrack::flex(GRID_SIDE as u16, 1.0),
                grid_template_rows: RepeatedGridTrack::flex(GRID_SIDE as u16, 1.0),
                row_gap: Val::Px(8.0),
                column_gap: Val::Px(8.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(GRID_BACKGROUND),
            BorderRadius::all(Val::Px(12.0)),
        ))
        .with_children(|grid| {
            for index in 0..GRID_SIZE {
                grid.spawn((
                    Swatch { index },
                    Button,
                    Node::default(),
                    BackgroundColor(IDLE_SWATCH),
                    BorderRadius::all(Val::Px(8.0)),
                ));
            }
        });

        p.spawn((
            HudField::Status,
            Text::new(""),
            TextFont {
                font_size: 22.0,
                ..default()
            },
            TextColor(Color::srgb(0.8, 0.8, 0.85)),
        ));
    });
}

fn start_feedback_flash(mut feedback: EventReader<GuessFeedback>, mut flash: ResMut<FeedbackFlash>) {
    let Some(last) = feedback.read().last() else {
        return;
    };
    flash.color = match last.outcome {
        GuessOutcome::Correct => CORRECT_FLASH,
        GuessOutcome::Incorrect => INCORRECT_FLASH,
    };
    flash.timer.reset();
}

fn fade_feedback_flash(
    time: Res<Time>,
    mut flash: ResMut<FeedbackFlash>,
    mut q: Query<&mut BackgroundColor, With<GridRoot>>,
) {
    if flash.timer.finished() {
        return;
    }
    flash.timer.tick(time.delta());
    let t = flash.timer.fraction();
    let from = flash.color.to_srgba();
    let to = GRID_BACKGROUND.to_srgba();
    let mixed = Color::srgb(
        from.red + (to.red - from.red) * t,
        from.green + (to.green - from.green) * t,
        from.blue + (to.blue - from.blue) * t,
    );
    for mut bg in &mut q {
        bg.0 = mixed;
    }
}

fn refresh_swatches(engine: Res<RoundEngine>, mut q: Query<(&Swatch, &mut BackgroundColor)>) {
    if !engine.is_changed() {
        return;
    }
    let swatches = engine.view().swatches;
    for (swatch, mut bg) in &mut q {
        let color = match swatches {
            Some(colors) => colors[swatch.index].to_bevy(),
            None => IDLE_SWATCH,
        };
        if bg.0 != color {
            bg.0 = color;
        }
    }
}

fn refresh_hud(engine: Res<RoundEngine>, mut q: Query<(&HudField, &mut Text, &mut TextColor)>) {
    if !engine.is_changed() {
        return;
    }
    let view = engine.view();
    for (field, mut text, mut color) in &mut q {
        let s = hud_text(*field, &view);
        if text.0 != s {
            text.0 = s;
        }
        if *field == HudField::Time {
            color.0 = if view.active && view.time_remaining <= LOW_TIME_SECS {
                LOW_TIME
            } else {
                Color::WHITE
            };
        }
    }
}

pub fn hud_text(field: HudField, view: &SessionView) -> String {
    match field {
        HudField::Score => format!("Score {}", view.score),
        HudField::Level => format!("Level {}", view.level),
        HudField::Time => format!("Time {}s", view.time_remaining),
        HudField::Best => format!("Best {}", view.best_score),
        HudField::Status => match view.phase {
            Phase::Idle => "Find the odd swatch. Press Space or click to start.".into(),
            Phase::Active => "Click the swatch that differs.".into(),
            Phase::GameOver => format!(
                "Time's up! Score {} (best {}). Press Space to play again.",
                view.score, view.best_score
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(phase: Phase) -> SessionView {
        SessionView {
            score: 12,
            level: 13,
            time_remaining: 4,
            max_time: 30,
            best_score: 20,
            phase,
            active: phase == Phase::Active,
            over: phase == Phase::GameOver,
            swatches: None,
        }
    }

    #[test]
    fn hud_labels() {
        let v = view(Phase::Active);
        assert_eq!(hud_text(HudField::Score, &v), "Score 12");
        assert_eq!(hud_text(HudField::Level, &v), "Level 13");
        assert_eq!(hud_text(HudField::Time, &v), "Time 4s");
        assert_eq!(hud_text(HudField::Best, &v), "Best 20");
    }

    #[test]
    fn status_mentions_final_score_after_game_over() {
        let s = hud_text(HudField::Status, &view(Phase::GameOver));
        assert!(s.contains("Score 12"));
        assert!(s.contains("best 20"));
    }

    #[test]
    fn flash_starts_idle() {
        assert!(FeedbackFlash::default().timer.finished());
    }
}
