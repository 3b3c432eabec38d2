use bevy::{
    app::AppExit,
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
    window::PrimaryWindow,
};
use bevy_egui::{
    egui::{self, Color32, RichText},
    EguiContexts, EguiPlugin,
};

use crate::{
    flight::PlanePose,
    plane::Plane,
    state::{in_simulation, GameState},
    terrain::LANDING_SPOT,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((EguiPlugin, FrameTimeDiagnosticsPlugin))
            .add_systems(OnExit(GameState::Menu), setup_radar)
            .add_systems(Update, menu_ui.run_if(in_state(GameState::Menu)))
            .add_systems(Update, (hud_ui, update_radar).run_if(in_simulation))
            .add_systems(Update, game_over_ui.run_if(in_state(GameState::GameOver)));
    }
}

fn menu_ui(
    mut contexts: EguiContexts,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    let ctx = contexts.ctx_mut();

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(Color32::from_gray(245)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.35);
                ui.label(
                    RichText::new("Airplane Simulation")
                        .size(40.0)
                        .color(Color32::from_rgb(0, 82, 172)),
                );
                ui.add_space(40.0);
                if ui
                    .add_sized([200.0, 50.0], egui::Button::new("Start"))
                    .clicked()
                {
                    info!("Starting simulation");
                    next_state.set(GameState::Playing);
                }
                ui.add_space(10.0);
                if ui
                    .add_sized([200.0, 50.0], egui::Button::new("Exit"))
                    .clicked()
                {
                    exit.send(AppExit);
                }
            });
        });
}

fn hud_ui(
    mut contexts: EguiContexts,
    plane_query: Query<&PlanePose, With<Plane>>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let Ok(pose) = plane_query.get_single() else {
        return;
    };

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(-1.0);

    let ctx = contexts.ctx_mut();

    egui::TopBottomPanel::top("hud").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("fps: {fps:5.1}"));
            ui.separator();
            ui.label(format!(
                "X: {:.2}, Y: {:.2}, Z: {:.2}",
                pose.position.x, pose.position.y, pose.position.z
            ));
        });
    });
}

const RADAR_RADIUS: f32 = 70.0;
/// Distance of the radar centre from the lower-left window corner.
const RADAR_MARGIN: f32 = 150.0;
/// World units to radar units.
const RADAR_SCALE: f32 = 0.05;

#[derive(Component)]
struct RadarDisplay;

#[derive(Component)]
struct RadarMarker;

fn setup_radar(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn((
        RadarDisplay,
        ColorMesh2dBundle {
            mesh: meshes.add(Circle::new(RADAR_RADIUS)).into(),
            material: materials.add(Color::DARK_GRAY.with_a(0.85)),
            ..default()
        },
    ));
    commands.spawn((
        RadarMarker,
        ColorMesh2dBundle {
            mesh: meshes.add(Circle::new(5.0)).into(),
            material: materials.add(Color::RED),
            transform: Transform::from_xyz(0.0, 0.0, 1.0),
            ..default()
        },
    ));
}

/// Keeps the radar anchored to the lower-left corner and the red marker at
/// the landing spot's offset from the plane, top-down.
fn update_radar(
    windows: Query<&Window, With<PrimaryWindow>>,
    plane_query: Query<&Transform, With<Plane>>,
    mut radar_query: Query<
        &mut Transform,
        (With<RadarDisplay>, Without<RadarMarker>, Without<Plane>),
    >,
    mut marker_query: Query<
        &mut Transform,
        (With<RadarMarker>, Without<RadarDisplay>, Without<Plane>),
    >,
    mut gizmos: Gizmos,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    let center = Vec2::new(
        -window.width() * 0.5 + RADAR_MARGIN,
        -window.height() * 0.5 + RADAR_MARGIN,
    );

    if let Ok(mut transform) = radar_query.get_single_mut() {
        transform.translation = center.extend(0.0);
    }

    gizmos.circle_2d(center, RADAR_RADIUS, Color::BLACK);
    gizmos.line_2d(
        center - Vec2::X * RADAR_RADIUS,
        center + Vec2::X * RADAR_RADIUS,
        Color::GREEN,
    );
    gizmos.line_2d(
        center - Vec2::Y * RADAR_RADIUS,
        center + Vec2::Y * RADAR_RADIUS,
        Color::GREEN,
    );

    let Ok(plane_transform) = plane_query.get_single() else {
        return;
    };
    let diff = LANDING_SPOT - plane_transform.translation;

    if let Ok(mut transform) = marker_query.get_single_mut() {
        // World +Z maps to radar down.
        transform.translation =
            (center + Vec2::new(diff.x, -diff.z) * RADAR_SCALE).extend(1.0);
    }
}

fn game_over_ui(
    mut contexts: EguiContexts,
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    let ctx = contexts.ctx_mut();

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(Color32::from_black_alpha(128)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.4);
                ui.label(RichText::new("LANDED!").size(40.0).color(Color32::WHITE));
                ui.add_space(20.0);
                ui.label(
                    RichText::new("Press Y to Play Again or N to Exit")
                        .size(20.0)
                        .color(Color32::WHITE),
                );
            });
        });

    if keys.just_pressed(KeyCode::KeyY) {
        info!("Restarting");
        next_state.set(GameState::Playing);
    }
    if keys.just_pressed(KeyCode::KeyN) {
        exit.send(AppExit);
    }
}
