use bevy::prelude::*;
use rand::Rng;

use crate::gameplay::session::{Celebrate, SessionSet};

const CONFETTI_COUNT: usize = 80;
const CONFETTI_LIFETIME: f32 = 2.4;
const GRAVITY_PX: f32 = 420.0;

pub struct CelebrationPlugin;

impl Plugin for CelebrationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (spawn_celebration, animate_confetti, expire_banner).in_set(SessionSet::Present),
        );
    }
}

#[derive(Component, Debug)]
pub struct Confetti {
    pos: Vec2,
    vel: Vec2,
    life: Timer,
    color: Color,
}

#[derive(Component, Debug)]
pub struct NewBestBanner(Timer);

fn spawn_celebration(
    mut commands: Commands,
    mut events: EventReader<Celebrate>,
    windows: Query<&Window>,
) {
    // Exactly one effect even if duplicates were queued.
    let Some(ev) = events.read().last().copied() else {
        return;
    };
    info!(target: "celebration", "new best {}!", ev.score);
    let width = windows.iter().next().map(|w| w.width()).unwrap_or(720.0);
    let mut rng = rand::thread_rng();
    for _ in 0..CONFETTI_COUNT {
        let color = Color::hsl(rng.gen_range(0.0..360.0), 0.85, 0.6);
        let pos = Vec2::new(rng.gen_range(0.0..width), rng.gen_range(-60.0..0.0));
        let vel = Vec2::new(rng.gen_range(-80.0..80.0), rng.gen_range(40.0..220.0));
        let size = rng.gen_range(6.0..12.0);
        commands.spawn((
            Confetti {
                pos,
                vel,
                life: Timer::from_seconds(CONFETTI_LIFETIME, TimerMode::Once),
                color,
            },
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(pos.x),
                top: Val::Px(pos.y),
                width: Val::Px(size),
                height: Val::Px(size * 0.6),
                ..default()
            },
            BackgroundColor(color),
            GlobalZIndex(10),
        ));
    }
    commands.spawn((
        NewBestBanner(Timer::from_seconds(CONFETTI_LIFETIME, TimerMode::Once)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(24.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        GlobalZIndex(11),
        children![(
            Text::new(format!("New best: {}!", ev.score)),
            TextFont {
                font_size: 40.0,
                ..default()
            },
            TextColor(Color::srgb(1.0, 0.85, 0.2)),
        )],
    ));
}

fn animate_confetti(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Confetti, &mut Node, &mut BackgroundColor)>,
) {
    let dt = time.delta_secs();
    for (e, mut c, mut node, mut bg) in &mut q {
        if c.life.tick(time.delta()).finished() {
            commands.entity(e).despawn();
            continue;
        }
        c.vel.y += GRAVITY_PX * dt;
        let step = c.vel * dt;
        c.pos += step;
        node.left = Val::Px(c.pos.x);
        node.top = Val::Px(c.pos.y);
        bg.0 = c.color.with_alpha(1.0 - c.life.fraction());
    }
}

fn expire_banner(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut NewBestBanner)>,
) {
    for (e, mut banner) in &mut q {
        if banner.0.tick(time.delta()).finished() {
            commands.entity(e).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_burst_per_celebrate_frame() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_event::<Celebrate>();
        app.add_systems(Update, spawn_celebration);
        app.world_mut().send_event(Celebrate { score: 3 });
        app.world_mut().send_event(Celebrate { score: 3 });
        app.update();
        let world = app.world_mut();
        let confetti = world.query::<&Confetti>().iter(world).count();
        let banners = world.query::<&NewBestBanner>().iter(world).count();
        assert_eq!(confetti, CONFETTI_COUNT);
        assert_eq!(banners, 1);
    }
}
