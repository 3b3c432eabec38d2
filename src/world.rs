use bevy::{
    pbr::CascadeShadowConfigBuilder,
    prelude::*,
    render::{
        render_asset::RenderAssetUsages,
        render_resource::{Extent3d, TextureDimension, TextureFormat},
    },
};
use image::RgbaImage;

use crate::{
    assets::{WorldImages, ENGINE_SOUND_PATH},
    state::GameState,
    terrain::{
        self, LANDING_SPOT, RUNWAY_POSITION, RUNWAY_SIZE, TERRAIN_ORIGIN, TERRAIN_SIZE,
    },
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_lighting, setup_terrain, setup_runway))
            .add_systems(OnExit(GameState::Menu), start_engine_sound);
    }
}

fn setup_lighting(mut commands: Commands) {
    // Shadow cascades sized for the ~1000 unit terrain footprint.
    let cascade_shadow_config = CascadeShadowConfigBuilder {
        first_cascade_far_bound: 100.0,
        maximum_distance: 1200.0,
        ..default()
    }
    .build();

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            color: Color::rgb(0.98, 0.95, 0.82),
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -60_f32.to_radians(),
            30_f32.to_radians(),
            0.0,
        )),
        cascade_shadow_config,
        ..default()
    });
}

fn setup_terrain(
    mut commands: Commands,
    images: Res<WorldImages>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut textures: ResMut<Assets<Image>>,
) {
    let mesh = meshes.add(terrain::heightmap_mesh(&images.heightmap, TERRAIN_SIZE));
    let texture = textures.add(rgba_texture(&images.terrain_diffuse));

    commands.spawn(PbrBundle {
        mesh,
        material: materials.add(StandardMaterial {
            base_color_texture: Some(texture),
            perceptual_roughness: 1.0,
            ..default()
        }),
        transform: Transform::from_translation(TERRAIN_ORIGIN),
        ..default()
    });

    // Red marker over the landing spot.
    commands.spawn(PbrBundle {
        mesh: meshes.add(Sphere::new(1.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::RED,
            unlit: true,
            ..default()
        }),
        transform: Transform::from_translation(LANDING_SPOT),
        ..default()
    });

    info!(
        "Terrain ready: {}x{} heightmap",
        images.heightmap.width(),
        images.heightmap.height()
    );
}

fn setup_runway(
    mut commands: Commands,
    images: Res<WorldImages>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut textures: ResMut<Assets<Image>>,
) {
    let texture = textures.add(rgba_texture(&images.runway_diffuse));

    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(RUNWAY_SIZE.x, RUNWAY_SIZE.y)),
        material: materials.add(StandardMaterial {
            base_color_texture: Some(texture),
            perceptual_roughness: 1.0,
            ..default()
        }),
        transform: Transform::from_translation(RUNWAY_POSITION),
        ..default()
    });
}

/// Engine loop, started once the menu is dismissed. An unchecked load: a
/// missing file degrades to silence.
fn start_engine_sound(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn(AudioBundle {
        source: asset_server.load(ENGINE_SOUND_PATH),
        settings: PlaybackSettings::LOOP,
    });
}

fn rgba_texture(image: &RgbaImage) -> Image {
    Image::new(
        Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        image.clone().into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}
