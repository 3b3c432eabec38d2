pub mod assets;
pub mod camera;
pub mod flight;
pub mod plane;
pub mod state;
pub mod terrain;
pub mod ui;
pub mod world;
