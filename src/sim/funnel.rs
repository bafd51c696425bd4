//! Funnel width profiles per tornado type
//!
//! Pure geometry: normalized height p (0 = cloud base, 1 = ground) in,
//! lateral half-width out. The renderer strokes one ellipse per sample,
//! so everything here must stay deterministic in (p, widths, time).

use serde::Serialize;

use crate::config::{StormConfig, TornadoType};
use crate::{lerp, smoothstep};

use super::state::Storm;

/// Smallest width handed to a profile; non-positive inputs are clamped
/// here rather than propagated.
const MIN_WIDTH: f32 = 1e-3;

/// Wedge funnels must read wider aloft than at the ground
const WEDGE_TOP_RATIO: f32 = 1.35;

/// Rope-out leaves this fraction of the original widths at completion
const ROPE_SHRINK_FLOOR: f32 = 0.18;

/// Segmented banding floor; the factor oscillates up to 1.0
const BAND_FLOOR: f32 = 0.78;

/// Height anchor of the Loop type's decorative arc
const LOOP_ARC_P: f32 = 0.88;

/// Funnel samples handed to the renderer per frame
pub const PROFILE_STEPS: usize = 160;

/// Lateral half-width at normalized height `p` for the given type.
///
/// `time_secs` only matters for Segmented, whose banding crawls along
/// the funnel over time. Guaranteed positive for any p given positive
/// width inputs.
pub fn width_at(p: f32, top_w: f32, base_w: f32, ty: TornadoType, time_secs: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    let top_w = top_w.max(MIN_WIDTH);
    let base_w = base_w.max(MIN_WIDTH);

    match ty {
        // Top-heavy easing: hangs near the top width, narrows late
        TornadoType::Cone => lerp(top_w, base_w, p.powf(0.95)),
        // Defining rule: the top must dominate the base, and the
        // shallow exponent keeps the shape wide most of the way down
        TornadoType::Wedge => {
            let top_w = top_w.max(base_w * WEDGE_TOP_RATIO);
            lerp(top_w, base_w, p.powf(0.55))
        }
        TornadoType::Rope => lerp(top_w * 0.35, base_w * 0.25, p.powf(1.2)),
        TornadoType::Needle => lerp(top_w * 0.30, base_w * 0.15, p.powf(1.35)),
        TornadoType::Loop => lerp(top_w * 0.42, base_w * 0.22, p.powf(1.05)),
        TornadoType::Segmented => {
            let body = lerp(top_w, base_w, p.powf(0.95));
            let s = (std::f32::consts::PI * 12.0 * p + time_secs * 0.9).sin().max(0.0);
            body * (BAND_FLOOR + (1.0 - BAND_FLOOR) * s * s)
        }
        TornadoType::Sheathed => {
            let body = lerp(top_w, base_w, p.powf(0.95));
            // Condensation veil widens the upper quarter only
            let veil = 1.0 + 0.70 * (1.0 - smoothstep(0.0, 0.25, p));
            body * veil
        }
    }
}

/// Width multiplier while roping out: exactly 1.0 at progress 0,
/// easing down to the floor at progress 1, strictly decreasing between.
pub fn rope_shrink(progress: f32) -> f32 {
    lerp(1.0, ROPE_SHRINK_FLOOR, smoothstep(0.0, 1.0, progress.clamp(0.0, 1.0)))
}

/// Effective (top, base) widths for the storm's current state: type
/// reference dimensions scaled by the size sliders, the EF multiplier
/// and the rope-out shrink.
pub fn effective_widths(storm: &Storm, config: &StormConfig) -> (f32, f32) {
    let (ref_top, ref_base) = storm.tornado_type.reference_widths();
    let ef_scale = storm.ef.size_scale();
    let shrink = rope_shrink(storm.rope_out_progress());
    let top = ref_top * (config.top_size_percent / 100.0) * ef_scale * shrink;
    let base = ref_base * (config.base_size_percent / 100.0) * ef_scale * shrink;
    (top, base)
}

/// One funnel slice for the renderer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FunnelSample {
    /// Normalized height, 0 = cloud base, 1 = funnel bottom
    pub p: f32,
    /// Lateral half-width in scene pixels
    pub half_width: f32,
}

/// Sample the funnel profile top to bottom for the current storm state.
/// The renderer lerps sample heights between the cloud base and the
/// ground using `Storm::formation_progress`.
pub fn sample_profile(storm: &Storm, config: &StormConfig, steps: usize) -> Vec<FunnelSample> {
    let (top, base) = effective_widths(storm, config);
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let p = i as f32 / steps as f32;
            FunnelSample {
                p,
                half_width: width_at(p, top, base, storm.tornado_type, storm.age),
            }
        })
        .collect()
}

/// Decorative loop arc for the Loop type, anchored low on the funnel
/// with a slow horizontal oscillation. Auxiliary shape only; not part
/// of the main width profile.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LoopArc {
    /// Normalized height anchor
    pub p: f32,
    /// Horizontal offset from the funnel axis, scene pixels
    pub x_offset: f32,
    /// Half-width of the funnel at the anchor
    pub half_width: f32,
}

/// The arc only shows once the funnel has mostly formed and hides as
/// rope-out finishes.
pub fn loop_arc(storm: &Storm, config: &StormConfig) -> Option<LoopArc> {
    if storm.tornado_type != TornadoType::Loop {
        return None;
    }
    if storm.formation_progress() <= 0.9 || storm.rope_out_progress() >= 0.95 {
        return None;
    }
    let (top, base) = effective_widths(storm, config);
    let half_width = width_at(LOOP_ARC_P, top, base, TornadoType::Loop, storm.age);
    Some(LoopArc {
        p: LOOP_ARC_P,
        x_offset: (storm.age * 0.9).sin() * half_width * 0.7,
        half_width,
    })
}
