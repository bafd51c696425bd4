//! Storm lifecycle state machine
//!
//! Owns the storm's temporal state and exposes the normalized progress
//! ratios the funnel geometry and renderer consume. Stage time is an
//! explicit accumulated counter, never wall clock, so pausing and
//! deterministic tests fall out for free.

use crate::config::StormConfig;
use crate::consts::DISSIPATION_FADE_SECS;

use super::state::{Storm, StormStage};

impl Storm {
    /// Advance age and stage by `dt` seconds.
    ///
    /// Config is re-read every call so slider changes apply mid-storm.
    /// Negative delta time is clamped to 0; `paused` suspends all time
    /// accumulation without discarding progress; `keep_alive` freezes
    /// stage time once RopeOut is reached so Gone is never entered.
    pub fn advance(&mut self, dt: f32, config: &StormConfig) {
        self.tornado_type = config.tornado_type;
        self.ef = config.ef;
        self.spin = config.spin;
        self.formation_secs = config.formation_secs;
        self.mature_secs = config.mature_secs;
        self.rope_out_secs = config.rope_out_secs;

        if config.paused {
            return;
        }
        let dt = if dt < 0.0 {
            log::warn!("negative delta time {dt}, clamping to 0");
            0.0
        } else {
            dt
        };

        self.age += dt;

        let frozen = config.keep_alive && self.stage == StormStage::RopeOut;
        if frozen {
            return;
        }
        self.stage_elapsed += dt;

        // Carry overflow across transitions so a large dt still walks
        // the stages strictly in order.
        loop {
            match self.stage {
                StormStage::Forming if self.stage_elapsed >= self.formation_secs => {
                    self.stage_elapsed -= self.formation_secs;
                    self.stage = StormStage::Mature;
                    log::debug!("storm matured at age {:.2}s", self.age);
                }
                StormStage::Mature
                    if config.rope_out_enabled && self.stage_elapsed >= self.mature_secs =>
                {
                    self.stage_elapsed -= self.mature_secs;
                    self.stage = StormStage::RopeOut;
                    log::debug!("rope-out began at age {:.2}s", self.age);
                }
                StormStage::RopeOut
                    if !config.keep_alive && self.stage_elapsed >= self.rope_out_secs =>
                {
                    self.stage_elapsed -= self.rope_out_secs;
                    self.stage = StormStage::Gone;
                    log::debug!("storm dissipated at age {:.2}s", self.age);
                }
                _ => break,
            }
        }
    }

    /// Funnel descent progress: 0 at the cloud base, 1 on the ground.
    /// 1 for every stage past Forming.
    pub fn formation_progress(&self) -> f32 {
        match self.stage {
            StormStage::Forming => {
                if self.formation_secs <= 0.0 {
                    1.0
                } else {
                    (self.stage_elapsed / self.formation_secs).clamp(0.0, 1.0)
                }
            }
            _ => 1.0,
        }
    }

    /// Rope-out completion in [0,1]: 0 before RopeOut, the clamped
    /// stage-time ratio during it, exactly 1 once Gone.
    pub fn rope_out_progress(&self) -> f32 {
        match self.stage {
            StormStage::Forming | StormStage::Mature => 0.0,
            StormStage::RopeOut => {
                (self.stage_elapsed / self.rope_out_secs.max(f32::EPSILON)).clamp(0.0, 1.0)
            }
            StormStage::Gone => 1.0,
        }
    }

    /// Render alpha: 1 while alive, linear fade to 0 over the fade
    /// window once Gone. Never mutates state.
    pub fn dissipation_alpha(&self) -> f32 {
        match self.stage {
            StormStage::Gone => (1.0 - self.stage_elapsed / DISSIPATION_FADE_SECS).clamp(0.0, 1.0),
            _ => 1.0,
        }
    }
}
