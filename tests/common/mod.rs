use std::time::Duration;

use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;

use skylane::{
    flight::PlanePose,
    plane::{self, Plane, PlaneAction},
    state::GameState,
};

/// One reference frame at 60 Hz.
pub const FRAME: Duration = Duration::from_micros(16_667);

/// Headless app with the flight systems wired up exactly as in the game:
/// integration, transform sync and the landing check run only while
/// `Playing`, and the pose resets on every entry into `Playing`. Time is
/// advanced manually so the tests are deterministic.
pub struct SimHarness {
    pub app: App,
    pub plane: Entity,
}

impl SimHarness {
    pub fn new() -> Self {
        let mut app = App::new();
        app.init_state::<GameState>();
        app.insert_resource(Time::<()>::default());
        app.add_systems(
            Update,
            (
                plane::apply_flight_controls,
                plane::sync_plane_transform,
                plane::check_landing,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
        app.add_systems(OnEnter(GameState::Playing), plane::reset_plane);

        let pose = PlanePose::default();
        let transform = plane::world_transform(&pose);
        let plane = app
            .world
            .spawn((
                Plane,
                pose,
                ActionState::<PlaneAction>::default(),
                TransformBundle::from_transform(transform),
            ))
            .id();

        Self { app, plane }
    }

    pub fn step(&mut self, frames: usize) {
        for _ in 0..frames {
            self.app.world.resource_mut::<Time>().advance_by(FRAME);
            self.app.update();
        }
    }

    pub fn press(&mut self, action: PlaneAction) {
        self.action_state().press(&action);
    }

    pub fn release(&mut self, action: PlaneAction) {
        self.action_state().release(&action);
    }

    fn action_state(&mut self) -> Mut<'_, ActionState<PlaneAction>> {
        self.app
            .world
            .get_mut::<ActionState<PlaneAction>>(self.plane)
            .expect("plane has an action state")
    }

    pub fn pose(&self) -> PlanePose {
        self.app
            .world
            .get::<PlanePose>(self.plane)
            .expect("plane has a pose")
            .clone()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.app
            .world
            .get_mut::<PlanePose>(self.plane)
            .expect("plane has a pose")
            .position = position;
    }

    pub fn state(&self) -> GameState {
        *self.app.world.resource::<State<GameState>>().get()
    }

    /// Queues a state change and runs one update so the transition (and any
    /// `OnEnter` work) applies.
    pub fn set_state(&mut self, state: GameState) {
        self.app
            .world
            .resource_mut::<NextState<GameState>>()
            .set(state);
        self.app.update();
    }
}
