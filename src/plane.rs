use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use leafwing_input_manager::{
    prelude::{ActionState, InputManagerPlugin, InputMap},
    Actionlike, InputManagerBundle,
};

use crate::{
    flight::{self, FlightControls, PlanePose},
    state::{GameState, SimSet},
    terrain::{LANDING_SPOT, LANDING_THRESHOLD},
};

/// Uniform scale reconciling model units with world units.
pub const MODEL_SCALE: f32 = 0.005;

pub struct PlanePlugin;

impl Plugin for PlanePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<PlaneAction>::default())
            .add_systems(Startup, setup_plane)
            .add_systems(OnEnter(GameState::Playing), reset_plane)
            .add_systems(
                Update,
                (apply_flight_controls, sync_plane_transform, check_landing)
                    .chain()
                    .in_set(SimSet::Flight)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

#[derive(Component)]
pub struct Plane;

#[derive(Actionlike, PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect)]
pub enum PlaneAction {
    Throttle,
    Boost,
    Climb,
    Descend,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    RollLeft,
    RollRight,
    ToggleFirstPerson,
    ToggleFreeCamera,
}

fn input_map() -> InputMap<PlaneAction> {
    InputMap::new([
        (PlaneAction::Throttle, KeyCode::ShiftLeft),
        (PlaneAction::Boost, KeyCode::Space),
        (PlaneAction::Climb, KeyCode::KeyW),
        (PlaneAction::Descend, KeyCode::KeyS),
        (PlaneAction::PitchUp, KeyCode::ArrowDown),
        (PlaneAction::PitchDown, KeyCode::ArrowUp),
        (PlaneAction::YawLeft, KeyCode::KeyA),
        (PlaneAction::YawRight, KeyCode::KeyD),
        (PlaneAction::RollLeft, KeyCode::ArrowLeft),
        (PlaneAction::RollRight, KeyCode::ArrowRight),
        (PlaneAction::ToggleFirstPerson, KeyCode::KeyF),
        (PlaneAction::ToggleFreeCamera, KeyCode::KeyR),
    ])
}

/// Rotation fix between the plane mesh's own axis convention and the pose
/// frame, applied before rotation and translation.
pub fn model_correction() -> Quat {
    Quat::from_rotation_y(FRAC_PI_2)
}

/// World transform of a pose: rotation, then translation, then correction,
/// then scale. Folded into TRS form, so the translation carries the scale
/// and the correction swing.
pub fn world_transform(pose: &PlanePose) -> Transform {
    let correction = model_correction();
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        pose.pitch.to_radians(),
        pose.yaw.to_radians(),
        pose.roll.to_radians(),
    );

    Transform {
        translation: correction * (pose.position * MODEL_SCALE),
        rotation: correction * rotation,
        scale: Vec3::splat(MODEL_SCALE),
    }
}

fn setup_plane(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let pose = PlanePose::default();
    let transform = world_transform(&pose);

    // Child dimensions are in model units; the pose transform scales them
    // down to world size.
    let hull = materials.add(StandardMaterial {
        base_color: Color::rgb(0.85, 0.85, 0.88),
        perceptual_roughness: 0.4,
        ..default()
    });
    let trim = materials.add(StandardMaterial {
        base_color: Color::rgb(0.75, 0.12, 0.12),
        perceptual_roughness: 0.6,
        ..default()
    });

    commands
        .spawn((
            Plane,
            pose,
            SpatialBundle::from_transform(transform),
            InputManagerBundle::with_map(input_map()),
        ))
        .with_children(|parent| {
            // fuselage, nose toward local +Z
            parent.spawn(PbrBundle {
                mesh: meshes.add(Cuboid::new(260.0, 260.0, 1700.0)),
                material: hull.clone(),
                ..default()
            });
            // main wing
            parent.spawn(PbrBundle {
                mesh: meshes.add(Cuboid::new(3400.0, 60.0, 520.0)),
                material: trim.clone(),
                transform: Transform::from_xyz(0.0, 120.0, 250.0),
                ..default()
            });
            // tail fin
            parent.spawn(PbrBundle {
                mesh: meshes.add(Cuboid::new(60.0, 420.0, 360.0)),
                material: hull,
                transform: Transform::from_xyz(0.0, 260.0, -780.0),
                ..default()
            });
            // tail plane
            parent.spawn(PbrBundle {
                mesh: meshes.add(Cuboid::new(1100.0, 50.0, 300.0)),
                material: trim,
                transform: Transform::from_xyz(0.0, 180.0, -760.0),
                ..default()
            });
        });
}

/// Puts the plane back at the spawn pose. Runs on every entry into
/// `Playing`, which covers both the Start button and the game-over restart.
pub fn reset_plane(mut query: Query<(&mut PlanePose, &mut Transform), With<Plane>>) {
    let Ok((mut pose, mut transform)) = query.get_single_mut() else {
        return;
    };

    *pose = PlanePose::default();
    *transform = world_transform(&pose);
    info!("Plane reset to spawn pose");
}

pub fn apply_flight_controls(
    mut query: Query<(&ActionState<PlaneAction>, &mut PlanePose), With<Plane>>,
    time: Res<Time>,
) {
    let Ok((action_state, mut pose)) = query.get_single_mut() else {
        return;
    };

    let pressed = |action: PlaneAction| action_state.pressed(&action);
    let exclusive = |positive: PlaneAction, negative: PlaneAction| {
        if pressed(positive) {
            1.0
        } else if pressed(negative) {
            -1.0
        } else {
            0.0
        }
    };

    let controls = FlightControls {
        throttle: pressed(PlaneAction::Throttle),
        boost: pressed(PlaneAction::Boost),
        vertical: exclusive(PlaneAction::Climb, PlaneAction::Descend),
        pitch: exclusive(PlaneAction::PitchUp, PlaneAction::PitchDown),
        // Opposing yaw keys cancel instead of one winning.
        yaw: (pressed(PlaneAction::YawLeft) as i8 - pressed(PlaneAction::YawRight) as i8) as f32,
        roll: exclusive(PlaneAction::RollRight, PlaneAction::RollLeft),
    };

    flight::step_flight(&mut pose, &controls, time.delta_seconds() * 60.0);
}

pub fn sync_plane_transform(mut query: Query<(&PlanePose, &mut Transform), With<Plane>>) {
    let Ok((pose, mut transform)) = query.get_single_mut() else {
        return;
    };

    *transform = world_transform(pose);
}

/// Latches into `GameOver` once the plane is on top of the landing spot.
/// Nothing clears the state except the explicit restart.
pub fn check_landing(
    query: Query<&Transform, With<Plane>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(transform) = query.get_single() else {
        return;
    };

    if transform.translation.distance(LANDING_SPOT) < LANDING_THRESHOLD {
        info!("Touched down at {}", transform.translation);
        next_state.set(GameState::GameOver);
    }
}
