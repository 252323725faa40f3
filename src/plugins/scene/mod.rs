//! Main scene: round lifecycle and bookkeeping.
//!
//! The scene root is a plain entity tagged `MainScene`, scoped to
//! `GameState::InGame`. Walls, the hero and enemies are spawned as its
//! children after `SceneSystems::SpawnRoot`, so despawning the root on exit
//! tears the whole round down and re-entering builds a fresh one. Bullets
//! only hold non-owning `TargetHero` handles into that tree.
//!
//! Hero and enemy handling report outcomes here as messages:
//! ```text
//! EnemyDefeated ──► SceneStats.enemies_defeated
//! HeroDefeated  ──► SceneStats.rounds_lost, GameState::GameOver
//! RestartRequest / R (in GameOver) ──► GameState::InGame
//! ```

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

#[derive(Component)]
pub struct MainScene;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneSystems {
    /// Spawns the `MainScene` root. Round spawners run after it.
    SpawnRoot,
}

#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct SceneStats {
    /// Reset at the start of every round.
    pub enemies_defeated: u32,
    /// Reset at the start of every round.
    pub hero_hits_taken: u32,
    pub rounds_lost: u32,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroDefeated {
    pub hero: Entity,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyDefeated {
    pub enemy: Entity,
}

#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RestartRequest;

pub fn plugin(app: &mut App) {
    app.init_resource::<SceneStats>()
        .add_message::<HeroDefeated>()
        .add_message::<EnemyDefeated>()
        .add_message::<RestartRequest>();

    app.add_systems(
        OnEnter(GameState::InGame),
        (reset_round_stats, spawn_main_scene.in_set(SceneSystems::SpawnRoot)),
    )
        .add_systems(OnEnter(GameState::GameOver), announce_game_over)
        .add_systems(
            FixedPostUpdate,
            (track_enemy_defeats, end_round_on_hero_defeat)
                .after(crate::plugins::projectiles::ProjectileSystems::ApplyHits)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            restart_round.run_if(in_state(GameState::GameOver)),
        );
}

fn spawn_main_scene(mut commands: Commands) {
    commands.spawn((
        Name::new("MainScene"),
        MainScene,
        Transform::default(),
        Visibility::default(),
        DespawnOnExit(GameState::InGame),
    ));
}

fn reset_round_stats(mut stats: ResMut<SceneStats>) {
    stats.enemies_defeated = 0;
    stats.hero_hits_taken = 0;
}

fn track_enemy_defeats(mut defeated: MessageReader<EnemyDefeated>, mut stats: ResMut<SceneStats>) {
    let n = defeated.read().count() as u32;
    if n > 0 {
        stats.enemies_defeated += n;
        debug!("{} enemies defeated this round", stats.enemies_defeated);
    }
}

fn end_round_on_hero_defeat(
    mut defeated: MessageReader<HeroDefeated>,
    mut stats: ResMut<SceneStats>,
    mut next: ResMut<NextState<GameState>>,
) {
    // Several hits on the same frame can only end the round once.
    if defeated.read().count() == 0 {
        return;
    }
    stats.rounds_lost += 1;
    next.set(GameState::GameOver);
}

fn announce_game_over(stats: Res<SceneStats>) {
    info!(
        "game over: {} enemies defeated, {} hits taken (rounds lost: {})",
        stats.enemies_defeated, stats.hero_hits_taken, stats.rounds_lost
    );
}

fn restart_round(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut requests: MessageReader<RestartRequest>,
    mut next: ResMut<NextState<GameState>>,
) {
    let requested = requests.read().count() > 0;
    let pressed = keys.is_some_and(|k| k.just_pressed(KeyCode::KeyR));
    if requested || pressed {
        info!("restarting round");
        next.set(GameState::InGame);
    }
}
