use std::process::ExitCode;

use bevy::prelude::*;
use skylane::{
    assets::WorldImages,
    camera::CameraPlugin,
    plane::PlanePlugin,
    state::{GameState, SimSet},
    ui::UiPlugin,
    world::WorldPlugin,
};

fn main() -> ExitCode {
    // The three checked asset loads. Everything past this point is allowed
    // to degrade instead of failing.
    let images = match WorldImages::load() {
        Ok(images) => images,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Airplane Simulation".into(),
                resolution: (1920.0, 1080.0).into(),
                ..default()
            }),
            ..default()
        }))
        .init_state::<GameState>()
        .configure_sets(Update, (SimSet::Flight, SimSet::Camera).chain())
        .insert_resource(images)
        .add_plugins((WorldPlugin, PlanePlugin, CameraPlugin, UiPlugin))
        .run();

    ExitCode::SUCCESS
}
