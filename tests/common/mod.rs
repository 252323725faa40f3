//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `sliders::game::configure_headless` to install gameplay plugins.

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

use sliders::plugins::hero::Hero;

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    sliders::game::configure_headless(&mut app);
    // `App::run` does this; tests drive `update()` by hand, so do it here.
    app.finish();
    app.cleanup();
    app
}

/// Headless app after the first frame: InGame entered, round spawned.
pub fn app_in_round() -> App {
    let mut app = app_headless();
    app.update();
    app
}

pub fn hero(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Hero>>()
        .single(app.world())
        .expect("exactly one hero")
}
