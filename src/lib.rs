//! Sky Chase - a chase-and-evade arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (bodies, input aggregation, capture rules)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedurally generated sound effects (wasm)
//! - `settings`: User preferences
//! - `highscores`: Best-catch leaderboard

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod haptics;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Half-width of the playfield: positions satisfy x in [-8, 8]
    pub const BOUNDS_HALF_WIDTH: f32 = 8.0;
    /// Half-height of the playfield: positions satisfy y in [-4, 4]
    pub const BOUNDS_HALF_HEIGHT: f32 = 4.0;

    /// Player acceleration per held direction key, per frame
    pub const PLAYER_ACCELERATION: f32 = 0.01;
    /// Multiplicative velocity decay applied to the player every frame
    pub const PLAYER_DRAG: f32 = 0.98;
    /// Player speed ceiling (world units per frame)
    pub const PLAYER_MAX_SPEED: f32 = 0.2;

    /// Distance at which the prey notices the player and starts fleeing
    pub const PREY_AWARENESS_RADIUS: f32 = 4.0;
    /// Prey flight speed while fleeing (world units per frame)
    pub const PREY_ESCAPE_SPEED: f32 = 0.06;
    /// Velocity decay while the prey is coasting (player out of range)
    pub const PREY_IDLE_DRAG: f32 = 0.95;

    /// Pursuer closing speed toward the player (world units per frame)
    pub const PURSUER_CHASE_SPEED: f32 = 0.018;

    /// Player-prey distance below which the prey is caught
    pub const CAPTURE_RADIUS: f32 = 1.5;

    /// Horizontal-velocity deadzone for sprite mirroring (avoids flicker)
    pub const FACING_DEADZONE: f32 = 0.01;

    /// Mouse drag delta -> velocity scale (added each move)
    pub const MOUSE_SENSITIVITY: f32 = 0.02;
    /// Touch drag offset -> velocity scale (replaces each move)
    pub const TOUCH_SENSITIVITY: f32 = 0.01;

    /// Session spawn positions
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(-4.0, 0.0);
    pub const PREY_SPAWN: Vec2 = Vec2::new(4.0, 0.0);
    pub const PURSUER_SPAWN: Vec2 = Vec2::new(8.0, 0.0);

    /// Prey respawn region after a catch (inset from the playfield edges)
    pub const RESPAWN_HALF_WIDTH: f32 = 7.0;
    pub const RESPAWN_HALF_HEIGHT: f32 = 3.0;
}

/// Clamp a position to the playfield rectangle
#[inline]
pub fn clamp_to_bounds(pos: Vec2) -> Vec2 {
    Vec2::new(
        pos.x
            .clamp(-consts::BOUNDS_HALF_WIDTH, consts::BOUNDS_HALF_WIDTH),
        pos.y
            .clamp(-consts::BOUNDS_HALF_HEIGHT, consts::BOUNDS_HALF_HEIGHT),
    )
}

/// Rescale a velocity to `max` if it exceeds it, preserving direction
#[inline]
pub fn clamp_speed(vel: Vec2, max: f32) -> Vec2 {
    if vel.length() > max {
        vel.normalize_or_zero() * max
    } else {
        vel
    }
}
