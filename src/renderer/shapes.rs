//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{colors, Vertex};
use crate::consts::{BOUNDS_HALF_HEIGHT, BOUNDS_HALF_WIDTH};
use crate::sim::{Facing, GameState};

/// Local-space outline of a winged body, nose pointing +x.
/// Mirrored across x for a left-facing sprite.
const WING_TRIANGLES: [[Vec2; 3]; 3] = [
    // Fuselage, upper half
    [
        Vec2::new(1.0, 0.0),
        Vec2::new(-0.8, 0.45),
        Vec2::new(-0.45, 0.0),
    ],
    // Fuselage, lower half
    [
        Vec2::new(1.0, 0.0),
        Vec2::new(-0.45, 0.0),
        Vec2::new(-0.8, -0.45),
    ],
    // Raised wing
    [
        Vec2::new(0.25, 0.1),
        Vec2::new(-0.25, 0.75),
        Vec2::new(-0.35, 0.15),
    ],
];

/// Generate vertices for a body sprite at `center`, mirrored by `facing`
pub fn body_sprite(center: Vec2, size: f32, facing: Facing, color: [f32; 4]) -> Vec<Vertex> {
    let flip = match facing {
        Facing::Right => 1.0,
        Facing::Left => -1.0,
    };

    let mut vertices = Vec::with_capacity(WING_TRIANGLES.len() * 3);
    for tri in &WING_TRIANGLES {
        for p in tri {
            let world = center + Vec2::new(p.x * flip, p.y) * size;
            vertices.push(Vertex::new(world.x, world.y, color));
        }
    }
    vertices
}

/// Generate vertices for a filled disc
pub fn disc(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Build the full frame: ground band, particles, then the three bodies
pub fn scene(state: &GameState, show_particles: bool) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    vertices.extend(rect(
        Vec2::new(-BOUNDS_HALF_WIDTH, -BOUNDS_HALF_HEIGHT - 0.6),
        Vec2::new(BOUNDS_HALF_WIDTH, -BOUNDS_HALF_HEIGHT),
        colors::GROUND,
    ));

    if show_particles {
        for particle in &state.particles {
            let mut color = particle.color;
            color[3] *= particle.life;
            vertices.extend(disc(particle.pos, particle.size, color, 10));
        }
    }

    // Draw order: pursuer behind, prey in front, player on top
    vertices.extend(body_sprite(
        state.pursuer.pos,
        0.9,
        state.pursuer.facing,
        colors::PURSUER,
    ));
    vertices.extend(body_sprite(
        state.prey.pos,
        0.5,
        state.prey.facing,
        colors::PREY,
    ));
    vertices.extend(body_sprite(
        state.player.pos,
        0.7,
        state.player.facing,
        colors::PLAYER,
    ));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_sprite_mirrors_horizontally() {
        let right = body_sprite(Vec2::ZERO, 1.0, Facing::Right, colors::PLAYER);
        let left = body_sprite(Vec2::ZERO, 1.0, Facing::Left, colors::PLAYER);
        assert_eq!(right.len(), left.len());
        for (r, l) in right.iter().zip(&left) {
            assert_eq!(r.position[0], -l.position[0]);
            assert_eq!(r.position[1], l.position[1]);
        }
    }

    #[test]
    fn scene_contains_all_three_bodies() {
        let state = GameState::new(1);
        let with = scene(&state, true);
        // Ground + three sprites, no particles yet
        let expected = 6 + 3 * WING_TRIANGLES.len() * 3;
        assert_eq!(with.len(), expected);
    }

    #[test]
    fn disc_triangle_count() {
        let v = disc(Vec2::ZERO, 1.0, colors::PREY, 12);
        assert_eq!(v.len(), 36);
    }
}
