use bevy::{
    pbr::{FogFalloff, FogSettings},
    prelude::*,
    render::camera::ClearColorConfig,
};
use leafwing_input_manager::prelude::ActionState;

use crate::{
    flight::PlanePose,
    plane::{self, Plane, PlaneAction},
    state::{in_simulation, GameState, SimSet},
};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraViewState>()
            .add_systems(Startup, setup_cameras)
            .add_systems(
                Update,
                (
                    toggle_view.run_if(in_state(GameState::Playing)),
                    update_free_camera.run_if(in_simulation),
                    update_follow_camera.run_if(in_simulation),
                )
                    .chain()
                    .in_set(SimSet::Camera),
            );
    }
}

#[derive(Component)]
pub struct MainCamera;

/// View-mode flags. `free` takes precedence over `first_person`; neither set
/// means the default chase view.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct CameraViewState {
    pub first_person: bool,
    pub free: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Free,
    Chase,
    FirstPerson,
}

pub fn effective_mode(view: &CameraViewState) -> CameraMode {
    if view.free {
        CameraMode::Free
    } else if view.first_person {
        CameraMode::FirstPerson
    } else {
        CameraMode::Chase
    }
}

/// Chase offset in the plane's pitch/yaw frame.
pub const CHASE_OFFSET: Vec3 = Vec3::new(-15.0, 2.5, 0.0);
/// Per-frame chase lerp factor at the reference 60 Hz step.
pub const CHASE_SMOOTHING: f32 = 0.1;
pub const FIRST_PERSON_OFFSET: Vec3 = Vec3::new(0.0, 0.5, 0.0);

const FREE_MOVE_SPEED: f32 = 30.0;
const FREE_TURN_RATE: f32 = 1.5;

/// Chase offset rotated by pitch and yaw only. Roll is deliberately left out
/// so the view does not bank with the plane.
pub fn chase_offset(pitch_deg: f32, yaw_deg: f32) -> Vec3 {
    Quat::from_euler(
        EulerRot::XYZ,
        pitch_deg.to_radians(),
        yaw_deg.to_radians(),
        0.0,
    ) * CHASE_OFFSET
}

/// One-pole smoothing factor equivalent to `CHASE_SMOOTHING` per frame at
/// 60 Hz, correct under a variable time step.
pub fn smoothing_factor(dt: f32) -> f32 {
    1.0 - (1.0 - CHASE_SMOOTHING).powf(dt * 60.0)
}

/// Free-look attitude, kept separately so the controller does not have to
/// re-derive angles from the transform every frame.
#[derive(Component, Default)]
pub struct FreeLook {
    pub yaw: f32,
    pub pitch: f32,
}

fn setup_cameras(mut commands: Commands) {
    commands.spawn((
        MainCamera,
        FreeLook::default(),
        Camera3dBundle {
            camera: Camera {
                order: 0,
                clear_color: ClearColorConfig::Custom(Color::rgb(0.4, 0.7, 1.0)),
                ..default()
            },
            projection: Projection::Perspective(PerspectiveProjection {
                fov: 8.0_f32.to_radians(),
                ..default()
            }),
            transform: Transform::from_xyz(0.0, 60.0, 120.0)
                .looking_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y),
            ..default()
        },
        FogSettings {
            color: Color::rgba(0.35, 0.48, 0.66, 1.0),
            falloff: FogFalloff::from_visibility_colors(
                1500.0,
                Color::rgb(0.35, 0.5, 0.66),
                Color::rgb(0.8, 0.844, 1.0),
            ),
            ..default()
        },
    ));

    // Overlay camera for the radar, drawn on top of the 3D view.
    commands.spawn(Camera2dBundle {
        camera: Camera {
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        ..default()
    });
}

fn toggle_view(
    mut view: ResMut<CameraViewState>,
    query: Query<&ActionState<PlaneAction>, With<Plane>>,
) {
    let Ok(action_state) = query.get_single() else {
        return;
    };

    if action_state.just_pressed(&PlaneAction::ToggleFirstPerson) {
        view.first_person = !view.first_person;
        info!("First person: {}", view.first_person);
    }
    if action_state.just_pressed(&PlaneAction::ToggleFreeCamera) {
        view.free = !view.free;
        info!("Free camera: {}", view.free);
    }
}

/// Keyboard free-look controller, fully decoupled from the plane: W/S
/// forward and back, A/D strafe, E/Q up and down, arrows rotate.
pub fn update_free_camera(
    view: Res<CameraViewState>,
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&mut Transform, &mut FreeLook), With<MainCamera>>,
    mut was_free: Local<bool>,
) {
    let Ok((mut transform, mut look)) = query.get_single_mut() else {
        return;
    };

    let free = effective_mode(&view) == CameraMode::Free;
    if free && !*was_free {
        // Pick up the chase/first-person attitude so the view does not snap.
        let (yaw, pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
        look.yaw = yaw;
        look.pitch = pitch;
    }
    *was_free = free;
    if !free {
        return;
    }

    let dt = time.delta_seconds();

    if keys.pressed(KeyCode::ArrowLeft) {
        look.yaw += FREE_TURN_RATE * dt;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        look.yaw -= FREE_TURN_RATE * dt;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        look.pitch += FREE_TURN_RATE * dt;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        look.pitch -= FREE_TURN_RATE * dt;
    }
    look.pitch = look.pitch.clamp(-1.54, 1.54);
    transform.rotation = Quat::from_euler(EulerRot::YXZ, look.yaw, look.pitch, 0.0);

    let forward = *transform.forward();
    let right = *transform.right();
    let mut delta = Vec3::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        delta += forward;
    }
    if keys.pressed(KeyCode::KeyS) {
        delta -= forward;
    }
    if keys.pressed(KeyCode::KeyD) {
        delta += right;
    }
    if keys.pressed(KeyCode::KeyA) {
        delta -= right;
    }
    if keys.pressed(KeyCode::KeyE) {
        delta += Vec3::Y;
    }
    if keys.pressed(KeyCode::KeyQ) {
        delta -= Vec3::Y;
    }
    transform.translation += delta * FREE_MOVE_SPEED * dt;
}

pub fn update_follow_camera(
    view: Res<CameraViewState>,
    time: Res<Time>,
    plane_query: Query<(&Transform, &PlanePose), (With<Plane>, Without<MainCamera>)>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok((plane_transform, pose)) = plane_query.get_single() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.get_single_mut() else {
        return;
    };

    let plane_position = plane_transform.translation;

    match effective_mode(&view) {
        CameraMode::Free => {}
        CameraMode::FirstPerson => {
            // Full plane rotation including the mesh correction, so the view
            // matches the visual nose direction.
            let rotation = plane::model_correction()
                * Quat::from_euler(
                    EulerRot::XYZ,
                    pose.pitch.to_radians(),
                    pose.yaw.to_radians(),
                    pose.roll.to_radians(),
                );
            let position = plane_position + FIRST_PERSON_OFFSET;
            let forward = rotation * Vec3::Z;
            let up = rotation * Vec3::Y;
            *camera_transform =
                Transform::from_translation(position).looking_at(position + forward, up);
        }
        CameraMode::Chase => {
            let desired = plane_position + chase_offset(pose.pitch, pose.yaw);
            let position = camera_transform
                .translation
                .lerp(desired, smoothing_factor(time.delta_seconds()));
            *camera_transform =
                Transform::from_translation(position).looking_at(plane_position, Vec3::Y);
        }
    }
}
