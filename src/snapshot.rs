//! Per-frame render snapshot
//!
//! Everything the JS render adapter needs to draw a frame, captured
//! after the tick: lifecycle outputs, funnel width samples and the
//! entity/radar lists. Serialized as JSON across the wasm boundary.

use serde::Serialize;

use crate::config::StormConfig;
use crate::sim::funnel::{self, FunnelSample, LoopArc, PROFILE_STEPS};
use crate::sim::state::{EntityKind, EntityState, SimState, StormStage};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntitySnapshot {
    pub kind: EntityKind,
    pub state: EntityState,
    pub x: f32,
    pub y: f32,
    pub orientation: f32,
    pub flipped: bool,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BlipSnapshot {
    pub x: f32,
    pub y: f32,
    pub ttl: f32,
}

/// One frame's worth of drawing state
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub stage: StormStage,
    pub storm_x: f32,
    pub storm_y: f32,
    pub formation_progress: f32,
    pub rope_out_progress: f32,
    pub dissipation_alpha: f32,
    /// +1 cyclonic, -1 anti-cyclonic; drives the band animation
    pub spin_sign: f32,
    pub cumulative_damage: u32,
    pub funnel: Vec<FunnelSample>,
    pub loop_arc: Option<LoopArc>,
    pub entities: Vec<EntitySnapshot>,
    pub blips: Vec<BlipSnapshot>,
    /// Storm path history as [x, y] pairs, oldest first
    pub track: Vec<[f32; 2]>,
}

impl RenderSnapshot {
    /// Capture the current state. Read-only; call after `tick`.
    pub fn capture(state: &SimState, config: &StormConfig) -> Self {
        let storm = &state.storm;
        Self {
            stage: storm.stage,
            storm_x: storm.pos.x,
            storm_y: storm.pos.y,
            formation_progress: storm.formation_progress(),
            rope_out_progress: storm.rope_out_progress(),
            dissipation_alpha: storm.dissipation_alpha(),
            spin_sign: storm.spin.sign(),
            cumulative_damage: storm.cumulative_damage,
            funnel: funnel::sample_profile(storm, config, PROFILE_STEPS),
            loop_arc: funnel::loop_arc(storm, config),
            entities: state
                .entities
                .iter()
                .map(|e| EntitySnapshot {
                    kind: e.kind,
                    state: e.state,
                    x: e.pos.x,
                    y: e.pos.y,
                    orientation: e.orientation,
                    flipped: e.flipped,
                    opacity: e.opacity,
                })
                .collect(),
            blips: state
                .blips
                .iter()
                .map(|b| BlipSnapshot {
                    x: b.pos.x,
                    y: b.pos.y,
                    ttl: b.ttl,
                })
                .collect(),
            track: state.track.iter().map(|p| [p.x, p.y]).collect(),
        }
    }
}
