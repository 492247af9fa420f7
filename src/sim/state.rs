//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen - bodies pinned to their spawn positions
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused; body state is frozen
    Paused,
}

/// Which way a sprite is mirrored, derived from horizontal velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// A moving body: the player, the prey, or the pursuer.
///
/// The three roles share this record; their behavior rules live in the
/// per-role update passes in `tick`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    /// World units per frame
    pub vel: Vec2,
    pub facing: Facing,
}

impl Body {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: Facing::Right,
        }
    }

    /// Integrate one frame of motion and clamp to the playfield
    pub fn integrate(&mut self) {
        self.pos = crate::clamp_to_bounds(self.pos + self.vel);
    }

    /// Update the mirror flag from horizontal velocity, with a deadzone so
    /// the sprite doesn't flicker while hovering
    pub fn update_facing(&mut self) {
        if self.vel.x > FACING_DEADZONE {
            self.facing = Facing::Right;
        } else if self.vel.x < -FACING_DEADZONE {
            self.facing = Facing::Left;
        }
    }
}

/// A cosmetic particle from a catch burst
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// Maximum particles alive at once
pub const MAX_PARTICLES: usize = 256;

/// Events produced by one simulation step, for the caller to turn into
/// sound, haptics, and HUD updates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The player caught the prey at this position (pre-respawn)
    PreyCaptured { pos: Vec2 },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed, logged for reproducing runs
    pub seed: u64,
    /// Session RNG (prey respawn positions, particle spread)
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Catches this session
    pub score: u32,
    /// Frame counter
    pub time_ticks: u64,
    /// The controlled body
    pub player: Body,
    /// The fleeing body; replaced on every catch
    pub prey: Body,
    /// The chasing body; never catches anything
    pub pursuer: Body,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            score: 0,
            time_ticks: 0,
            player: Body::at(PLAYER_SPAWN),
            prey: Body::at(PREY_SPAWN),
            pursuer: Body::at(PURSUER_SPAWN),
            particles: Vec::new(),
        }
    }

    /// Whether a session has begun (Playing or Paused)
    pub fn is_started(&self) -> bool {
        self.phase != GamePhase::Ready
    }

    /// Whether the simulation is frozen mid-session
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Pin all bodies to their spawn positions with zero velocity
    pub fn pin_to_spawns(&mut self) {
        self.player = Body::at(PLAYER_SPAWN);
        self.prey = Body::at(PREY_SPAWN);
        self.pursuer = Body::at(PURSUER_SPAWN);
    }
}
