//! Storm-to-entity impact detection
//!
//! Classifies every Ok entity against the storm center each tick:
//! close entities wobble, entities inside the hit radius take their
//! one-and-only damage transition, credit score and emit a radar blip.

use glam::Vec2;
use rand::Rng;

use crate::consts::{BLIP_TTL_SECS, MAX_BLIPS};

use super::state::{EntityKind, EntityState, RadarBlip, SimState};

/// Entities inside hit_radius * this wobble without taking damage
const NEAR_MULTIPLIER: f32 = 1.6;

impl EntityKind {
    /// Outward fling speed on a direct hit, normalized units/s
    fn fling_force(&self) -> f32 {
        match self {
            EntityKind::Vehicle => 0.50,
            EntityKind::Tree => 0.25,
            EntityKind::Building => 0.14,
        }
    }

    /// What a direct hit does to this kind
    fn hit_state(&self) -> EntityState {
        match self {
            EntityKind::Building => EntityState::Damaged,
            EntityKind::Tree | EntityKind::Vehicle => EntityState::Destroyed,
        }
    }

    /// Near-miss sway amplitude in radians; vehicles don't sway
    fn wobble_amplitude(&self) -> f32 {
        match self {
            EntityKind::Building => 0.35,
            EntityKind::Tree => 0.55,
            EntityKind::Vehicle => 0.0,
        }
    }
}

/// Evaluate every entity against the storm for this tick.
///
/// Only entities still in Ok state are considered, so each entity takes
/// at most one hit between damage resets. The wobble path never touches
/// state and may be recomputed freely every tick.
pub fn evaluate(state: &mut SimState) {
    let SimState {
        storm,
        entities,
        blips,
        rng,
        ..
    } = state;

    let hit_radius = storm.ef.hit_radius();
    let near_radius = hit_radius * NEAR_MULTIPLIER;
    let damage = storm.ef.damage_per_hit();

    for entity in entities.iter_mut() {
        if entity.state != EntityState::Ok {
            continue;
        }
        let dist = entity.pos.distance(storm.pos);

        if dist >= hit_radius {
            // Cosmetic sway for near misses
            if dist < near_radius {
                let amp = entity.kind.wobble_amplitude();
                if amp > 0.0 {
                    entity.orientation =
                        (storm.age * 3.2 + entity.pos.x * 9.0 + entity.pos.y * 9.0).sin() * amp * 0.5;
                }
            }
            continue;
        }

        // Direct hit: one-time transition. An entity dead center has
        // no outward direction; fling it along +x.
        entity.state = entity.kind.hit_state();
        let offset = entity.pos - storm.pos;
        let outward = if offset.length_squared() > 0.0 {
            offset.normalize()
        } else {
            Vec2::X
        };
        entity.vel = outward * entity.kind.fling_force();

        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        match entity.kind {
            EntityKind::Vehicle => {
                entity.flipped = true;
                entity.orientation += sign * 0.6;
            }
            EntityKind::Tree => {
                entity.orientation = sign * std::f32::consts::FRAC_PI_2;
            }
            EntityKind::Building => {
                entity.orientation = sign * (std::f32::consts::PI / 2.3);
            }
        }

        storm.cumulative_damage += damage;

        if blips.len() >= MAX_BLIPS {
            blips.remove(0);
        }
        blips.push(RadarBlip {
            pos: entity.pos,
            ttl: BLIP_TTL_SECS,
        });

        log::debug!(
            "{:?} hit at ({:.2},{:.2}), +{} damage",
            entity.kind,
            entity.pos.x,
            entity.pos.y,
            damage,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EfScale, StormConfig};
    use crate::sim::state::Entity;
    use glam::Vec2;

    fn state_with(entities: Vec<Entity>) -> SimState {
        let mut state = SimState::new(1, &StormConfig::default());
        state.storm.pos = Vec2::new(0.5, 0.5);
        state.storm.ef = EfScale::Ef3;
        state.entities = entities;
        state
    }

    #[test]
    fn test_vehicle_at_storm_center_destroyed() {
        let vehicle = Entity::fixed(EntityKind::Vehicle, Vec2::new(0.5, 0.5));
        let mut state = state_with(vec![vehicle]);

        evaluate(&mut state);

        assert_eq!(state.entities[0].state, EntityState::Destroyed);
        assert_eq!(state.storm.cumulative_damage, 115);
        assert_eq!(state.blips.len(), 1);
        assert!((state.blips[0].ttl - BLIP_TTL_SECS).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hit_happens_at_most_once() {
        let vehicle = Entity::fixed(EntityKind::Vehicle, Vec2::new(0.5, 0.5));
        let mut state = state_with(vec![vehicle]);

        for _ in 0..1000 {
            evaluate(&mut state);
        }

        assert_eq!(state.entities[0].state, EntityState::Destroyed);
        assert_eq!(state.storm.cumulative_damage, 115);
        assert_eq!(state.blips.len(), 1);
    }

    #[test]
    fn test_building_damaged_not_destroyed() {
        let building = Entity::fixed(EntityKind::Building, Vec2::new(0.5, 0.5));
        let mut state = state_with(vec![building]);

        evaluate(&mut state);

        assert_eq!(state.entities[0].state, EntityState::Damaged);
        assert!(state.entities[0].vel.length() <= EntityKind::Vehicle.fling_force());
    }

    #[test]
    fn test_near_miss_wobbles_without_state_change() {
        // Just outside the hit radius but inside the near band
        let radius = EfScale::Ef3.hit_radius();
        let tree = Entity::fixed(EntityKind::Tree, Vec2::new(0.5 + radius * 1.2, 0.5));
        let mut state = state_with(vec![tree]);
        state.storm.age = 1.0;

        evaluate(&mut state);

        assert_eq!(state.entities[0].state, EntityState::Ok);
        assert_eq!(state.storm.cumulative_damage, 0);
        assert!(state.blips.is_empty());
        assert!(state.entities[0].orientation.abs() > 0.0);
    }

    #[test]
    fn test_far_entity_untouched() {
        let tree = Entity::fixed(EntityKind::Tree, Vec2::new(0.9, 0.9));
        let mut state = state_with(vec![tree]);

        evaluate(&mut state);

        assert_eq!(state.entities[0].state, EntityState::Ok);
        assert_eq!(state.entities[0].orientation, 0.0);
    }

    #[test]
    fn test_fling_points_away_from_storm() {
        let tree = Entity::fixed(EntityKind::Tree, Vec2::new(0.52, 0.5));
        let mut state = state_with(vec![tree]);

        evaluate(&mut state);

        assert_eq!(state.entities[0].state, EntityState::Destroyed);
        assert!(state.entities[0].vel.x > 0.0);
        assert!((state.entities[0].vel.length() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_center_hit_flings_along_x() {
        // Dead center leaves no outward direction to normalize
        let vehicle = Entity::fixed(EntityKind::Vehicle, Vec2::new(0.5, 0.5));
        let mut state = state_with(vec![vehicle]);

        evaluate(&mut state);

        assert_eq!(state.entities[0].vel, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_blip_cap_evicts_oldest() {
        let entities = (0..20)
            .map(|i| {
                Entity::fixed(
                    EntityKind::Tree,
                    Vec2::new(0.5 + i as f32 * 1e-4, 0.5),
                )
            })
            .collect();
        let mut state = state_with(entities);

        evaluate(&mut state);

        assert_eq!(state.blips.len(), MAX_BLIPS);
    }

    #[test]
    fn test_damage_reset_allows_new_hits() {
        let vehicle = Entity::fixed(EntityKind::Vehicle, Vec2::new(0.5, 0.5));
        let mut state = state_with(vec![vehicle]);

        evaluate(&mut state);
        assert_eq!(state.storm.cumulative_damage, 115);

        state.reset_damage();
        assert_eq!(state.storm.cumulative_damage, 0);
        assert_eq!(state.entities[0].state, EntityState::Ok);
        assert!(state.blips.is_empty());

        evaluate(&mut state);
        assert_eq!(state.entities[0].state, EntityState::Destroyed);
        assert_eq!(state.storm.cumulative_damage, 115);
        assert_eq!(state.blips.len(), 1);
    }
}
