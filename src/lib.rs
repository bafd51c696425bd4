//! Twister Sim - deterministic storm core for a browser tornado toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (storm lifecycle, funnel geometry,
//!   entity impacts and motion)
//! - `config`: Validated storm configuration fed in from the UI layer
//! - `snapshot`: Per-frame drawing state for the render adapter
//! - `web`: wasm-bindgen bridge consumed by the JS render adapter
//!
//! The sim must be pure and deterministic: explicit delta time only,
//! seeded RNG only, no rendering or platform dependencies. The render
//! adapter (canvas/DOM, rain, lightning, radar sweep) lives on the JS
//! side and consumes snapshots produced here.

pub mod config;
pub mod sim;
pub mod snapshot;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, StormConfig};
pub use sim::{SimState, TickInput, tick};
pub use snapshot::RenderSnapshot;

/// Simulation constants shared across modules
pub mod consts {
    /// Normalized map bounds for storm and entity positions
    pub const MAP_MIN: f32 = 0.02;
    pub const MAP_MAX: f32 = 0.98;

    /// Storm steering speed (normalized units per second)
    pub const STEER_SPEED: f32 = 0.26;

    /// Seconds of Gone-stage time over which the funnel fades out
    pub const DISSIPATION_FADE_SECS: f32 = 1.8;

    /// Radar blip lifetime in seconds
    pub const BLIP_TTL_SECS: f32 = 2.0;
    /// Maximum live radar blips (oldest evicted first)
    pub const MAX_BLIPS: usize = 14;

    /// Maximum storm track points kept for the mini-map trail
    pub const MAX_TRACK: usize = 220;

    /// Velocity damping applied to flung entities each tick
    pub const FLING_DAMPING: f32 = 0.92;
    /// Opacity decay rate (per second) for destroyed entities
    pub const FADE_RATE: f32 = 0.5;
    /// Opacity floor for destroyed entities
    pub const FADE_FLOOR: f32 = 0.35;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep over [edge0, edge1], clamped
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
