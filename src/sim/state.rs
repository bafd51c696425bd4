//! Storm, city and radar state types
//!
//! Everything the render adapter observes lives here, owned by a single
//! `SimState` context passed into each update function.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{EfScale, SpinDirection, StormConfig, TornadoType};
use crate::consts::*;

/// Lifecycle stage of the current storm instance.
///
/// Transitions only move forward (Forming -> Mature -> RopeOut -> Gone);
/// the only way back is a full reset creating a new instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StormStage {
    /// Funnel descending from the cloud base
    Forming,
    /// Fully developed, on the ground
    Mature,
    /// Narrowing into a rope before dissipating
    RopeOut,
    /// Dissipated; terminal for this instance
    Gone,
}

/// The tornado itself: position, timing and accumulated damage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storm {
    /// Center on the normalized map, clamped to [MAP_MIN, MAP_MAX]
    pub pos: Vec2,
    /// Total seconds alive (excludes paused time)
    pub age: f32,
    pub stage: StormStage,
    /// Seconds accumulated in the current stage (never wall clock)
    pub stage_elapsed: f32,
    /// Stage timing captured from config on each advance
    pub formation_secs: f32,
    pub mature_secs: f32,
    pub rope_out_secs: f32,
    pub tornado_type: TornadoType,
    pub ef: EfScale,
    pub spin: SpinDirection,
    /// Damage score, non-decreasing between resets
    pub cumulative_damage: u32,
}

impl Storm {
    pub fn new(config: &StormConfig) -> Self {
        let stage = if config.formation_secs <= 0.0 {
            StormStage::Mature
        } else {
            StormStage::Forming
        };
        Self {
            pos: Vec2::new(0.50, 0.56),
            age: 0.0,
            stage,
            stage_elapsed: 0.0,
            formation_secs: config.formation_secs,
            mature_secs: config.mature_secs,
            rope_out_secs: config.rope_out_secs,
            tornado_type: config.tornado_type,
            ef: config.ef,
            spin: config.spin,
            cumulative_damage: 0,
        }
    }

    /// Move the storm center, keeping it on the map
    pub fn steer(&mut self, direction: Vec2, dt: f32) {
        self.pos += direction * STEER_SPEED * dt;
        self.pos = self.pos.clamp(Vec2::splat(MAP_MIN), Vec2::splat(MAP_MAX));
    }
}

/// What kind of sprite an entity renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Building,
    Tree,
    Vehicle,
}

/// Damage state. Leaves Ok at most once between damage resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    Ok,
    Damaged,
    Destroyed,
}

/// A fixed road segment a vehicle bounces along
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Horizontal { y: f32 },
    Vertical { x: f32 },
}

/// Drivable span along a lane, inset from the map edges
pub const LANE_SPAN_MIN: f32 = 0.10;
pub const LANE_SPAN_MAX: f32 = 0.90;

impl Lane {
    /// Map lane progress t in [0,1] to a map position
    pub fn position(&self, t: f32) -> Vec2 {
        let along = crate::lerp(LANE_SPAN_MIN, LANE_SPAN_MAX, t);
        match self {
            Lane::Horizontal { y } => Vec2::new(along, *y),
            Lane::Vertical { x } => Vec2::new(*x, along),
        }
    }

    /// Sprite heading for the given travel direction
    pub fn orientation(&self, dir: f32) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Lane::Horizontal { .. } => {
                if dir > 0.0 {
                    0.0
                } else {
                    PI
                }
            }
            Lane::Vertical { .. } => {
                if dir > 0.0 {
                    FRAC_PI_2
                } else {
                    -FRAC_PI_2
                }
            }
        }
    }
}

/// The city's road grid: three horizontal, three vertical
pub const LANES: [Lane; 6] = [
    Lane::Horizontal { y: 0.28 },
    Lane::Horizontal { y: 0.55 },
    Lane::Horizontal { y: 0.80 },
    Lane::Vertical { x: 0.25 },
    Lane::Vertical { x: 0.50 },
    Lane::Vertical { x: 0.75 },
];

/// A decorative map entity the storm can damage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub state: EntityState,
    /// Fling velocity after a hit, normalized units per second
    pub vel: Vec2,
    /// Render rotation in radians (wobble or tumble)
    pub orientation: f32,
    /// Vehicles flip upside down when destroyed
    pub flipped: bool,
    /// Render opacity; decays toward a floor while destroyed
    pub opacity: f32,
    /// Vehicle-only lane assignment
    pub lane: Option<Lane>,
    /// Progress along the lane in [0,1]
    pub lane_progress: f32,
    /// Travel direction along the lane (+1 or -1)
    pub lane_dir: f32,
    /// Lane speed in progress units per second
    pub speed: f32,
}

impl Entity {
    pub fn fixed(kind: EntityKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            state: EntityState::Ok,
            vel: Vec2::ZERO,
            orientation: 0.0,
            flipped: false,
            opacity: 1.0,
            lane: None,
            lane_progress: 0.0,
            lane_dir: 1.0,
            speed: 0.0,
        }
    }

    pub fn vehicle(lane: Lane, progress: f32, dir: f32, speed: f32) -> Self {
        let mut entity = Entity::fixed(EntityKind::Vehicle, lane.position(progress));
        entity.lane = Some(lane);
        entity.lane_progress = progress;
        entity.lane_dir = dir;
        entity.speed = speed;
        entity.orientation = lane.orientation(dir);
        entity
    }

    /// Clear damage fields, leaving position and lane assignment alone
    pub fn reset_damage(&mut self) {
        self.state = EntityState::Ok;
        self.vel = Vec2::ZERO;
        self.orientation = self.lane.map(|l| l.orientation(self.lane_dir)).unwrap_or(0.0);
        self.flipped = false;
        self.opacity = 1.0;
    }
}

/// Ephemeral impact marker for the radar display
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RadarBlip {
    pub pos: Vec2,
    pub ttl: f32,
}

/// City generation bounds for buildings and trees
const CITY_MIN: f32 = 0.12;
const CITY_MAX: f32 = 0.88;

const BUILDING_COUNT: usize = 10;
const TREE_COUNT: usize = 10;
const VEHICLE_COUNT: usize = 9;

/// Complete simulation state, owned by the caller
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; the only source of randomness in the sim
    pub rng: Pcg32,
    pub storm: Storm,
    pub entities: Vec<Entity>,
    pub blips: Vec<RadarBlip>,
    /// Storm path history for the mini-map trail, capped at MAX_TRACK
    pub track: Vec<Vec2>,
}

impl SimState {
    /// Create a fresh state with a seeded RNG and a newly built city
    pub fn new(seed: u64, config: &StormConfig) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            storm: Storm::new(config),
            entities: Vec::new(),
            blips: Vec::new(),
            track: Vec::new(),
        };
        state.build_city();
        state
    }

    /// Place buildings, trees and lane-bound vehicles in batch
    pub fn build_city(&mut self) {
        self.entities.clear();

        for _ in 0..BUILDING_COUNT {
            let pos = Vec2::new(
                self.rng.random_range(CITY_MIN..CITY_MAX),
                self.rng.random_range(CITY_MIN..CITY_MAX),
            );
            self.entities.push(Entity::fixed(EntityKind::Building, pos));
        }
        for _ in 0..TREE_COUNT {
            let pos = Vec2::new(
                self.rng.random_range(CITY_MIN..CITY_MAX),
                self.rng.random_range(CITY_MIN..CITY_MAX),
            );
            self.entities.push(Entity::fixed(EntityKind::Tree, pos));
        }
        for _ in 0..VEHICLE_COUNT {
            let lane = LANES[self.rng.random_range(0..LANES.len())];
            let progress = self.rng.random_range(0.0..1.0);
            let dir = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let speed = self.rng.random_range(0.08..0.14);
            self.entities.push(Entity::vehicle(lane, progress, dir, speed));
        }
    }

    /// "New storm" action: replace the storm instance, optionally
    /// rebuilding the city. Radar blips never survive a reset.
    pub fn new_storm(&mut self, config: &StormConfig, rebuild_city: bool) {
        self.storm = Storm::new(config);
        self.blips.clear();
        self.track.clear();
        if rebuild_city {
            self.build_city();
        }
        log::info!(
            "new storm: type={} ef={} mature={}s rope_out={}s",
            config.tornado_type.as_str(),
            config.ef.as_str(),
            config.mature_secs,
            config.rope_out_secs,
        );
    }

    /// "Reset damage" action: clear damage state everywhere while
    /// leaving positions and lane assignments untouched.
    pub fn reset_damage(&mut self) {
        self.storm.cumulative_damage = 0;
        self.blips.clear();
        for entity in &mut self.entities {
            entity.reset_damage();
        }
    }
}
