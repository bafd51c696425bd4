//! Entity motion integration
//!
//! Healthy vehicles bounce along their assigned lane; anything hit by
//! the storm drifts on its fling velocity with exponential damping,
//! clamped to the map.

use glam::Vec2;

use crate::consts::{FADE_FLOOR, FADE_RATE, FLING_DAMPING, MAP_MAX, MAP_MIN};

use super::state::{EntityKind, EntityState, SimState};

/// Advance all entity positions by `dt` seconds
pub fn integrate(state: &mut SimState, dt: f32) {
    let dt = dt.max(0.0);

    for entity in &mut state.entities {
        if entity.state == EntityState::Ok {
            if entity.kind != EntityKind::Vehicle {
                continue;
            }
            let Some(lane) = entity.lane else { continue };

            entity.lane_progress += entity.lane_dir * entity.speed * dt;
            if entity.lane_progress < 0.0 {
                entity.lane_progress = 0.0;
                entity.lane_dir = -entity.lane_dir;
            } else if entity.lane_progress > 1.0 {
                entity.lane_progress = 1.0;
                entity.lane_dir = -entity.lane_dir;
            }
            entity.pos = lane.position(entity.lane_progress);
            entity.orientation = lane.orientation(entity.lane_dir);
        } else {
            // Fling drift: damped velocity, clamped to the map
            entity.pos = (entity.pos + entity.vel * dt)
                .clamp(Vec2::splat(MAP_MIN), Vec2::splat(MAP_MAX));
            entity.vel *= FLING_DAMPING;

            if entity.state == EntityState::Destroyed {
                entity.opacity = (entity.opacity - dt * FADE_RATE).max(FADE_FLOOR);
            }
        }
    }
}
