use bevy::prelude::*;

/// Top-level mode of the demo. `Menu` gates the whole simulation; `GameOver`
/// freezes flight and collision but keeps the camera and overlays live.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    GameOver,
}

/// Per-frame update order: flight integration runs before camera placement,
/// so the camera always sees this frame's plane transform.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Flight,
    Camera,
}

/// Run condition for systems that are live both while playing and while the
/// game-over overlay is up, but not in the menu.
pub fn in_simulation(state: Res<State<GameState>>) -> bool {
    matches!(state.get(), GameState::Playing | GameState::GameOver)
}
