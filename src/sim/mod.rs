//! Deterministic simulation module
//!
//! All storm logic lives here. This module must be pure and deterministic:
//! - Explicit delta time threaded through every update
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Tick ordering is load-bearing: the lifecycle advances first, then
//! impacts and entity motion read the freshly advanced stage.

pub mod funnel;
pub mod impact;
pub mod lifecycle;
pub mod motion;
pub mod state;
pub mod tick;

pub use funnel::{FunnelSample, LoopArc, effective_widths, loop_arc, rope_shrink, sample_profile, width_at};
pub use state::{
    Entity, EntityKind, EntityState, Lane, RadarBlip, SimState, Storm, StormStage,
};
pub use tick::{TickInput, randomize_storm, tick};
