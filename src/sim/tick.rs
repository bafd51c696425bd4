//! Per-frame simulation tick
//!
//! Ordering within one tick is part of the contract: the lifecycle
//! advances first, because both geometry sampling and impact detection
//! read the freshly advanced stage. Entity motion runs last, then the
//! radar blips decay.

use glam::Vec2;

use crate::config::{EfScale, SpinDirection, StormConfig, TornadoType};
use crate::consts::MAX_TRACK;

use super::state::{SimState, StormStage};
use super::{impact, motion};

/// Input for a single tick, gathered by the UI layer
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steering direction, components in [-1, 1] (arrow keys/joystick)
    pub steer: Vec2,
    /// Full reset: new storm instance and a rebuilt city
    pub new_storm: bool,
    /// Partial reset: clear damage, keep positions and lanes
    pub reset_damage: bool,
}

/// Advance the whole simulation by `dt` seconds
pub fn tick(state: &mut SimState, input: &TickInput, config: &StormConfig, dt: f32) {
    if input.new_storm {
        state.new_storm(config, true);
    }
    if input.reset_damage {
        state.reset_damage();
    }

    let dt = dt.max(0.0);

    // A Gone storm is destroyed pending explicit reset: it neither
    // moves nor does damage, it only fades.
    if state.storm.stage != StormStage::Gone {
        state.storm.steer(input.steer, dt);
        state.track.push(state.storm.pos);
        if state.track.len() > MAX_TRACK {
            state.track.remove(0);
        }
    }
    state.storm.advance(dt, config);
    if state.storm.stage != StormStage::Gone {
        impact::evaluate(state);
    }
    motion::integrate(state, dt);

    for blip in &mut state.blips {
        blip.ttl -= dt;
    }
    state.blips.retain(|b| b.ttl > 0.0);
}

/// "Random storm" action: re-roll type, EF class and spin from the
/// sim's RNG, then start a fresh storm over a rebuilt city.
pub fn randomize_storm(state: &mut SimState, config: &mut StormConfig) {
    use rand::Rng;

    config.tornado_type = TornadoType::ALL[state.rng.random_range(0..TornadoType::ALL.len())];
    config.ef = EfScale::ALL[state.rng.random_range(0..EfScale::ALL.len())];
    config.spin = if state.rng.random_bool(0.5) {
        SpinDirection::Cyclonic
    } else {
        SpinDirection::AntiCyclonic
    };
    state.new_storm(config, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Entity, EntityKind, EntityState, StormStage};

    const DT: f32 = 1.0 / 60.0;

    fn quick_config() -> StormConfig {
        StormConfig {
            formation_secs: 0.5,
            mature_secs: 2.0,
            rope_out_secs: 1.0,
            keep_alive: false,
            ..StormConfig::default()
        }
    }

    #[test]
    fn test_full_lifecycle_through_tick() {
        let config = quick_config();
        let mut state = SimState::new(3, &config);
        let input = TickInput::default();

        let mut seen = vec![state.storm.stage];
        for _ in 0..((4.0 / DT) as usize) {
            tick(&mut state, &input, &config, DT);
            if *seen.last().unwrap() != state.storm.stage {
                seen.push(state.storm.stage);
            }
        }
        assert_eq!(
            seen,
            vec![
                StormStage::Forming,
                StormStage::Mature,
                StormStage::RopeOut,
                StormStage::Gone,
            ]
        );
        // No silent respawn once Gone
        tick(&mut state, &input, &config, 10.0);
        assert_eq!(state.storm.stage, StormStage::Gone);
    }

    #[test]
    fn test_vehicle_under_storm_destroyed_in_one_tick() {
        let config = StormConfig::default();
        let mut state = SimState::new(9, &config);
        state.storm.pos = Vec2::new(0.5, 0.5);
        state.entities = vec![Entity::fixed(EntityKind::Vehicle, Vec2::new(0.5, 0.5))];

        tick(&mut state, &TickInput::default(), &config, DT);

        assert_eq!(state.entities[0].state, EntityState::Destroyed);
        assert_eq!(state.storm.cumulative_damage, 115);
        assert_eq!(state.blips.len(), 1);
    }

    #[test]
    fn test_reset_damage_keeps_positions() {
        let config = StormConfig::default();
        let mut state = SimState::new(5, &config);

        // Park the storm on three entities and let it wreck them
        let input = TickInput::default();
        for i in 0..3 {
            state.storm.pos = state.entities[i].pos;
            tick(&mut state, &input, &config, DT);
        }
        assert!(state.storm.cumulative_damage > 0);
        let wrecked = state
            .entities
            .iter()
            .filter(|e| e.state != EntityState::Ok)
            .count();
        assert!(wrecked >= 3);

        let positions: Vec<_> = state.entities.iter().map(|e| e.pos).collect();
        let lanes: Vec<_> = state.entities.iter().map(|e| e.lane).collect();

        state.storm.pos = Vec2::new(0.02, 0.02); // out of everyone's way
        tick(
            &mut state,
            &TickInput {
                reset_damage: true,
                ..TickInput::default()
            },
            &config,
            0.0,
        );

        assert_eq!(state.storm.cumulative_damage, 0);
        assert!(state.blips.is_empty());
        for (i, entity) in state.entities.iter().enumerate() {
            assert_eq!(entity.state, EntityState::Ok);
            assert_eq!(entity.lane, lanes[i]);
            if entity.lane.is_none() {
                assert_eq!(entity.pos, positions[i]);
            }
        }
    }

    #[test]
    fn test_new_storm_rebuilds_everything() {
        let config = StormConfig::default();
        let mut state = SimState::new(11, &config);
        state.storm.cumulative_damage = 500;
        state.storm.pos = Vec2::new(0.9, 0.9);

        tick(
            &mut state,
            &TickInput {
                new_storm: true,
                ..TickInput::default()
            },
            &config,
            DT,
        );

        assert_eq!(state.storm.stage, StormStage::Forming);
        // The old 500 damage is gone; anything on the books now came
        // from hits the fresh storm landed this very tick
        let wrecked = state
            .entities
            .iter()
            .filter(|e| e.state != EntityState::Ok)
            .count() as u32;
        assert_eq!(
            state.storm.cumulative_damage,
            wrecked * config.ef.damage_per_hit()
        );
    }

    #[test]
    fn test_steering_moves_storm() {
        let config = StormConfig::default();
        let mut state = SimState::new(2, &config);
        let start = state.storm.pos;

        let input = TickInput {
            steer: Vec2::new(1.0, 0.0),
            ..TickInput::default()
        };
        tick(&mut state, &input, &config, 1.0);

        assert!(state.storm.pos.x > start.x);
        assert_eq!(state.storm.pos.y, start.y);
    }

    #[test]
    fn test_blips_decay_and_expire() {
        let config = StormConfig::default();
        let mut state = SimState::new(8, &config);
        state.storm.pos = Vec2::new(0.5, 0.5);
        state.entities = vec![Entity::fixed(EntityKind::Tree, Vec2::new(0.5, 0.5))];

        let input = TickInput::default();
        tick(&mut state, &input, &config, DT);
        assert_eq!(state.blips.len(), 1);

        tick(&mut state, &input, &config, 3.0);
        assert!(state.blips.is_empty());
    }

    #[test]
    fn test_gone_storm_neither_moves_nor_damages() {
        let config = quick_config();
        let mut state = SimState::new(21, &config);
        tick(&mut state, &TickInput::default(), &config, 10.0);
        assert_eq!(state.storm.stage, StormStage::Gone);
        tick(&mut state, &TickInput::default(), &config, 5.0);
        assert_eq!(state.storm.dissipation_alpha(), 0.0);

        // An invisible storm must be inert until an explicit reset
        let damage = state.storm.cumulative_damage;
        let pos = state.storm.pos;
        state.entities = vec![Entity::fixed(EntityKind::Vehicle, pos)];

        let input = TickInput {
            steer: Vec2::new(1.0, 1.0),
            ..TickInput::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input, &config, DT);
        }

        assert_eq!(state.storm.pos, pos);
        assert_eq!(state.entities[0].state, EntityState::Ok);
        assert_eq!(state.storm.cumulative_damage, damage);
    }

    #[test]
    fn test_track_records_path_and_caps() {
        let config = StormConfig::default();
        let mut state = SimState::new(4, &config);
        assert!(state.track.is_empty());

        let input = TickInput {
            steer: Vec2::new(1.0, 0.0),
            ..TickInput::default()
        };
        for _ in 0..300 {
            tick(&mut state, &input, &config, DT);
        }
        assert_eq!(state.track.len(), MAX_TRACK);
        assert_ne!(state.track[0], *state.track.last().unwrap());

        // Damage reset keeps the trail; a new storm starts one afresh
        tick(
            &mut state,
            &TickInput {
                reset_damage: true,
                ..TickInput::default()
            },
            &config,
            DT,
        );
        assert_eq!(state.track.len(), MAX_TRACK);

        tick(
            &mut state,
            &TickInput {
                new_storm: true,
                ..TickInput::default()
            },
            &config,
            DT,
        );
        assert_eq!(state.track.len(), 1);
    }

    #[test]
    fn test_tick_is_deterministic() {
        let config = quick_config();
        let mut a = SimState::new(1234, &config);
        let mut b = SimState::new(1234, &config);
        let input = TickInput {
            steer: Vec2::new(0.3, -0.2),
            ..TickInput::default()
        };

        for _ in 0..600 {
            tick(&mut a, &input, &config, DT);
            tick(&mut b, &input, &config, DT);
        }

        assert_eq!(a.storm.pos, b.storm.pos);
        assert_eq!(a.storm.stage, b.storm.stage);
        assert_eq!(a.storm.cumulative_damage, b.storm.cumulative_damage);
        for (ea, eb) in a.entities.iter().zip(&b.entities) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.state, eb.state);
        }
    }

    #[test]
    fn test_randomize_storm_resets() {
        let mut config = quick_config();
        let mut state = SimState::new(77, &config);
        state.storm.cumulative_damage = 42;

        randomize_storm(&mut state, &mut config);

        assert_eq!(state.storm.cumulative_damage, 0);
        assert_eq!(state.storm.tornado_type, config.tornado_type);
        assert_eq!(state.storm.ef, config.ef);
    }
}
