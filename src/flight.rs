use bevy::prelude::*;

pub const SPAWN_POSITION: Vec3 = Vec3::new(-1000.0, 5500.0, 19000.0);

/// Below this altitude the plane is dragged down and all translation inputs
/// are halved.
pub const GROUND_EFFECT_ALTITUDE: f32 = 6000.0;
pub const GROUND_PULL: f32 = 0.5;
pub const GROUND_SPEED_FACTOR: f32 = 0.5;

/// World units per frame at the reference 60 Hz step.
pub const THROTTLE_SPEED: f32 = 40.5;
pub const THROTTLE_CLIMB_SPEED: f32 = 20.5;
pub const BOOST_SPEED: f32 = 50.0;
pub const VERTICAL_SPEED: f32 = 12.0;

/// Degrees per frame at the reference 60 Hz step.
pub const PITCH_RATE: f32 = 0.2;
pub const PITCH_DECAY: f32 = 0.2;
pub const YAW_RATE: f32 = 0.4;
pub const ROLL_RATE: f32 = 0.7;
pub const ROLL_DECAY: f32 = 0.3;

pub const X_BOUNDS: (f32, f32) = (-189_900.0, 9_900.0);
pub const Z_BOUNDS: (f32, f32) = (-9_900.0, 189_900.0);
pub const Y_BOUNDS: (f32, f32) = (5_500.0, 200_000.0);

/// Plane position in world units and attitude in degrees. The renderable
/// transform is derived from this every frame; nothing else mutates it.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct PlanePose {
    pub position: Vec3,
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

impl Default for PlanePose {
    fn default() -> Self {
        Self {
            position: SPAWN_POSITION,
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
        }
    }
}

/// One frame of pilot input, already resolved from key state. Axis fields
/// are -1, 0 or +1.
#[derive(Default, Clone, Copy, Debug)]
pub struct FlightControls {
    pub throttle: bool,
    pub boost: bool,
    /// +1 climb, -1 descend.
    pub vertical: f32,
    /// +1 nose up, -1 nose down.
    pub pitch: f32,
    /// +1 turn left, -1 turn right.
    pub yaw: f32,
    /// +1 bank right, -1 bank left.
    pub roll: f32,
}

/// Horizontal heading unit vector for a yaw angle in degrees.
pub fn forward_vector(yaw_deg: f32) -> Vec3 {
    let yaw = yaw_deg.to_radians();
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Moves `value` toward zero by at most `step`. Once inside the ±step band
/// the value holds still rather than being forced to zero.
pub fn decay_toward_zero(value: f32, step: f32) -> f32 {
    if value > step {
        value - step
    } else if value < -step {
        value + step
    } else {
        value
    }
}

/// Advances the plane pose by `frames` reference frames, where
/// `frames = dt * 60`. Movement constants are tuned per 60 Hz frame; scaling
/// by the explicit time step keeps the motion identical under variable frame
/// rates.
pub fn step_flight(pose: &mut PlanePose, controls: &FlightControls, frames: f32) {
    let mut speed_factor = 1.0;
    if pose.position.y <= GROUND_EFFECT_ALTITUDE {
        pose.position.y -= GROUND_PULL * frames;
        speed_factor = GROUND_SPEED_FACTOR;
    }

    let forward = forward_vector(pose.yaw);

    if controls.throttle {
        pose.position.x += forward.x * THROTTLE_SPEED * speed_factor * frames;
        pose.position.z += forward.z * THROTTLE_SPEED * speed_factor * frames;
        pose.position.y +=
            pose.pitch.to_radians().sin() * THROTTLE_CLIMB_SPEED * speed_factor * frames;
    }
    if controls.boost {
        pose.position.x += forward.x * BOOST_SPEED * speed_factor * frames;
        pose.position.z += forward.z * BOOST_SPEED * speed_factor * frames;
    }
    pose.position.y += controls.vertical * VERTICAL_SPEED * speed_factor * frames;

    if controls.pitch != 0.0 {
        pose.pitch += controls.pitch * PITCH_RATE * frames;
    } else {
        pose.pitch = decay_toward_zero(pose.pitch, PITCH_DECAY * frames);
    }

    pose.yaw += controls.yaw * YAW_RATE * frames;

    if controls.roll != 0.0 {
        pose.roll += controls.roll * ROLL_RATE * frames;
    } else {
        pose.roll = decay_toward_zero(pose.roll, ROLL_DECAY * frames);
    }

    pose.position.x = pose.position.x.clamp(X_BOUNDS.0, X_BOUNDS.1);
    pose.position.z = pose.position.z.clamp(Z_BOUNDS.0, Z_BOUNDS.1);
    pose.position.y = pose.position.y.clamp(Y_BOUNDS.0, Y_BOUNDS.1);
}
