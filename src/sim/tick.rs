//! Per-frame simulation step
//!
//! One call per rendered frame. Velocities are world units per frame, so the
//! step takes no timestep parameter.

use glam::Vec2;
use rand::Rng;

use super::input::TickInput;
use super::state::{Body, GameEvent, GamePhase, GameState, Particle, MAX_PARTICLES};
use crate::consts::*;

/// Advance the game by one frame.
///
/// Returns the events the caller turns into sound, haptics, and HUD updates.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    if input.start && state.phase == GamePhase::Ready {
        state.phase = GamePhase::Playing;
    }

    // Pause toggles never advance the simulation, in either direction, so
    // pausing and resuming with no other input leaves body state untouched.
    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::Ready => GamePhase::Ready,
        };
        return Vec::new();
    }

    match state.phase {
        GamePhase::Ready => {
            // Start screen: hold everything at the spawn layout
            state.pin_to_spawns();
            return Vec::new();
        }
        GamePhase::Paused => return Vec::new(),
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    step_player(state, input);
    step_prey(state);
    step_pursuer(state);

    let mut events = Vec::new();
    let distance = state.player.pos.distance(state.prey.pos);
    if distance < CAPTURE_RADIUS {
        let caught_at = state.prey.pos;
        state.score += 1;
        spawn_catch_burst(state, caught_at);
        respawn_prey(state);
        events.push(GameEvent::PreyCaptured { pos: caught_at });
    }

    update_particles(state);

    events
}

/// Player kinematics: aggregate input, drag, speed clamp, integrate
fn step_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;

    // Touch drag replaces velocity outright; lifting the finger stops the
    // player dead. Mouse drag and keyboard then add on top - the sources
    // combine rather than excluding one another.
    if let Some(vel) = input.touch_override {
        player.vel = vel;
    }
    if input.touch_released {
        player.vel = Vec2::ZERO;
    }
    player.vel += input.mouse_impulse;
    if input.keys.up {
        player.vel.y += PLAYER_ACCELERATION;
    }
    if input.keys.down {
        player.vel.y -= PLAYER_ACCELERATION;
    }
    if input.keys.left {
        player.vel.x -= PLAYER_ACCELERATION;
    }
    if input.keys.right {
        player.vel.x += PLAYER_ACCELERATION;
    }

    // Drag applies every frame, input or not
    player.vel *= PLAYER_DRAG;
    player.vel = crate::clamp_speed(player.vel, PLAYER_MAX_SPEED);

    player.integrate();
    player.update_facing();
}

/// Prey behavior: flee while the player is close, otherwise coast to rest
fn step_prey(state: &mut GameState) {
    let to_player = state.player.pos - state.prey.pos;
    if to_player.length() < PREY_AWARENESS_RADIUS {
        // Instantaneous turn: the flight vector overwrites prior velocity
        state.prey.vel = -to_player.normalize_or_zero() * PREY_ESCAPE_SPEED;
    } else {
        state.prey.vel *= PREY_IDLE_DRAG;
    }
    state.prey.integrate();
    state.prey.update_facing();
}

/// Pursuer behavior: home in on the player every frame, no awareness gate.
/// Contact with the player or the prey has no effect - the pursuer is a
/// threat in appearance only.
fn step_pursuer(state: &mut GameState) {
    let heading = (state.player.pos - state.pursuer.pos).normalize_or_zero();
    state.pursuer.vel = heading * PURSUER_CHASE_SPEED;
    state.pursuer.integrate();
    state.pursuer.update_facing();
}

/// Replace the caught prey with a fresh one at a random position.
///
/// Resamples until the new position is outside the capture radius, so a
/// catch can never count twice in the same frame's evaluation.
fn respawn_prey(state: &mut GameState) {
    let pos = loop {
        let candidate = Vec2::new(
            state
                .rng
                .random_range(-RESPAWN_HALF_WIDTH..=RESPAWN_HALF_WIDTH),
            state
                .rng
                .random_range(-RESPAWN_HALF_HEIGHT..=RESPAWN_HALF_HEIGHT),
        );
        if candidate.distance(state.player.pos) >= CAPTURE_RADIUS {
            break candidate;
        }
    };
    state.prey = Body::at(pos);
}

/// Golden feather burst where the prey was caught
fn spawn_catch_burst(state: &mut GameState, pos: Vec2) {
    for _ in 0..24 {
        if state.particles.len() >= MAX_PARTICLES {
            state.particles.remove(0);
        }
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(0.02..0.08_f32);
        let warm = state.rng.random_range(0.0..1.0_f32);
        state.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            // Gold core fading toward orange at the edges
            color: [1.0, 0.55 + 0.35 * warm, 0.15 * warm, 1.0],
            life: state.rng.random_range(0.6..1.0_f32),
            size: state.rng.random_range(0.05..0.15_f32),
        });
    }
}

fn update_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel *= 0.96;
        particle.vel.y -= 0.001;
        particle.life -= 0.02;
        particle.size *= 0.99;
    }
    state.particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::HeldKeys;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.phase = GamePhase::Playing;
        state
    }

    fn keys(up: bool, down: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            keys: HeldKeys {
                up,
                down,
                left,
                right,
            },
            ..Default::default()
        }
    }

    #[test]
    fn ready_phase_pins_bodies_to_spawns() {
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(2.0, 2.0);
        state.player.vel = Vec2::new(0.1, 0.0);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.player.pos, PLAYER_SPAWN);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.prey.pos, PREY_SPAWN);
        assert_eq!(state.pursuer.pos, PURSUER_SPAWN);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn start_input_begins_the_session() {
        let mut state = GameState::new(1);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn pause_toggle_leaves_body_state_untouched() {
        let mut state = playing(42);
        state.player.vel = Vec2::new(0.1, 0.05);
        tick(&mut state, &TickInput::default());

        let player = state.player;
        let prey = state.prey;
        let pursuer = state.pursuer;

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        // Frames while paused are no-ops
        for _ in 0..5 {
            assert!(tick(&mut state, &TickInput::default()).is_empty());
        }

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);

        assert_eq!(state.player, player);
        assert_eq!(state.prey, prey);
        assert_eq!(state.pursuer, pursuer);
    }

    #[test]
    fn capture_inside_radius_scores_once_and_respawns() {
        let mut state = playing(9);
        state.player.pos = Vec2::new(0.0, 0.0);
        state.prey.pos = Vec2::new(1.0, 0.0);
        state.pursuer.pos = Vec2::new(8.0, 0.0);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events.len(), 1);
        // The prey fled one frame before being caught
        assert_eq!(
            events[0],
            GameEvent::PreyCaptured {
                pos: Vec2::new(1.0 + PREY_ESCAPE_SPEED, 0.0)
            }
        );
        assert_eq!(state.score, 1);

        // Fresh prey: random position inside the respawn region, outside the
        // capture radius, at rest
        assert!(state.prey.pos.x.abs() <= RESPAWN_HALF_WIDTH);
        assert!(state.prey.pos.y.abs() <= RESPAWN_HALF_HEIGHT);
        assert!(state.prey.pos.distance(state.player.pos) >= CAPTURE_RADIUS);
        assert_eq!(state.prey.vel, Vec2::ZERO);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn no_capture_at_boundary_distance() {
        let mut state = playing(9);
        state.player.pos = Vec2::new(0.0, 0.0);
        state.prey.pos = Vec2::new(1.6, 0.0);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn one_increment_per_capture_across_frames() {
        let mut state = playing(5);
        state.player.pos = Vec2::new(0.0, 0.0);
        state.prey.pos = Vec2::new(0.5, 0.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);

        // Respawn put the prey out of range, so the following frame cannot
        // re-count the same catch
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn prey_flees_directly_away_inside_awareness() {
        let mut state = playing(3);
        state.player.pos = Vec2::new(0.0, 0.0);
        state.prey.pos = Vec2::new(3.9, 0.0);

        tick(&mut state, &TickInput::default());
        assert!((state.prey.vel.x - PREY_ESCAPE_SPEED).abs() < 1e-6);
        assert!(state.prey.vel.y.abs() < 1e-6);
        assert_eq!(state.prey.facing, crate::sim::state::Facing::Right);
    }

    #[test]
    fn prey_coasts_to_rest_outside_awareness() {
        let mut state = playing(3);
        state.player.pos = Vec2::new(0.0, 0.0);
        state.prey.pos = Vec2::new(5.0, 0.0);
        state.prey.vel = Vec2::new(PREY_ESCAPE_SPEED, 0.0);

        tick(&mut state, &TickInput::default());
        assert!((state.prey.vel.x - 0.057).abs() < 1e-6);
        assert_eq!(state.prey.vel.y, 0.0);
    }

    #[test]
    fn pursuer_homes_on_player_every_frame() {
        let mut state = playing(3);
        state.player.pos = Vec2::new(-4.0, 0.0);
        state.pursuer.pos = Vec2::new(8.0, 0.0);

        tick(&mut state, &TickInput::default());
        assert!((state.pursuer.vel.x - -PURSUER_CHASE_SPEED).abs() < 1e-6);
        assert_eq!(state.pursuer.facing, crate::sim::state::Facing::Left);

        // Overlapping the player is harmless and produces no motion
        state.pursuer.pos = state.player.pos;
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.pursuer.vel, Vec2::ZERO);
        assert_eq!(state.score, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn keyboard_accelerates_and_drag_decays() {
        let mut state = playing(1);
        // Keep the prey out of the way
        state.prey.pos = Vec2::new(7.0, 3.0);
        state.player.pos = Vec2::new(-7.0, 0.0);

        tick(&mut state, &keys(false, false, false, true));
        assert!((state.player.vel.x - PLAYER_ACCELERATION * PLAYER_DRAG).abs() < 1e-6);

        // Released: velocity decays multiplicatively
        let before = state.player.vel.x;
        tick(&mut state, &TickInput::default());
        assert!((state.player.vel.x - before * PLAYER_DRAG).abs() < 1e-6);
    }

    #[test]
    fn player_speed_saturates_at_max() {
        let mut state = playing(1);
        state.prey.pos = Vec2::new(7.0, 3.0);
        state.player.pos = Vec2::new(-7.0, -3.0);

        for _ in 0..300 {
            tick(&mut state, &keys(true, false, false, true));
            assert!(state.player.vel.length() <= PLAYER_MAX_SPEED + 1e-5);
        }
    }

    #[test]
    fn touch_override_replaces_then_other_sources_add() {
        let mut state = playing(1);
        state.prey.pos = Vec2::new(7.0, 3.0);
        state.player.vel = Vec2::new(0.1, 0.0);

        // Override wipes the previous velocity entirely
        let input = TickInput {
            touch_override: Some(Vec2::new(0.0, 0.05)),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.vel.x, 0.0);
        assert!((state.player.vel.y - 0.05 * PLAYER_DRAG).abs() < 1e-6);

        // Keyboard on top of a touch override combines with it
        let input = TickInput {
            touch_override: Some(Vec2::new(0.0, 0.05)),
            keys: HeldKeys {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.player.vel.x > 0.0);
        assert!(state.player.vel.y > 0.0);
    }

    #[test]
    fn touch_release_stops_the_player() {
        let mut state = playing(1);
        state.prey.pos = Vec2::new(7.0, 3.0);
        state.player.vel = Vec2::new(0.15, -0.1);
        let before = state.player.pos;

        let input = TickInput {
            touch_released: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn mouse_impulse_adds_to_velocity() {
        let mut state = playing(1);
        state.prey.pos = Vec2::new(7.0, 3.0);
        state.player.vel = Vec2::new(0.05, 0.0);

        let input = TickInput {
            mouse_impulse: Vec2::new(0.02, 0.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.player.vel.x - 0.07 * PLAYER_DRAG).abs() < 1e-6);
    }

    #[test]
    fn particles_age_out() {
        let mut state = playing(11);
        state.player.pos = Vec2::ZERO;
        state.prey.pos = Vec2::new(0.5, 0.0);
        tick(&mut state, &TickInput::default());
        assert!(!state.particles.is_empty());

        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.particles.is_empty());
    }

    mod invariants {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn bodies_stay_in_bounds_and_player_speed_clamped(
                seed in any::<u64>(),
                frames in proptest::collection::vec(
                    (
                        any::<bool>(),
                        any::<bool>(),
                        any::<bool>(),
                        any::<bool>(),
                        -1.0f32..1.0f32,
                        -1.0f32..1.0f32,
                    ),
                    1..200,
                ),
            ) {
                let mut state = GameState::new(seed);
                state.phase = GamePhase::Playing;

                for (up, down, left, right, mx, my) in frames {
                    let input = TickInput {
                        keys: HeldKeys { up, down, left, right },
                        mouse_impulse: Vec2::new(mx, my),
                        ..Default::default()
                    };
                    tick(&mut state, &input);

                    for body in [&state.player, &state.prey, &state.pursuer] {
                        prop_assert!(body.pos.x.abs() <= BOUNDS_HALF_WIDTH);
                        prop_assert!(body.pos.y.abs() <= BOUNDS_HALF_HEIGHT);
                    }
                    prop_assert!(state.player.vel.length() <= PLAYER_MAX_SPEED + 1e-4);
                }
            }
        }
    }
}
