//! Frame-driven simulation module
//!
//! All gameplay logic lives here, free of rendering and platform
//! dependencies:
//! - One step per rendered frame, velocities in world units per frame
//! - Seeded RNG only
//! - Events out, input snapshots in

pub mod input;
pub mod state;
pub mod tick;

pub use input::{DirKey, InputCollector, TickInput};
pub use state::{Body, Facing, GameEvent, GamePhase, GameState, Particle, MAX_PARTICLES};
pub use tick::tick;
