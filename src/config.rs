//! Storm configuration supplied by the UI layer
//!
//! The control panel feeds these values in every frame (JSON over the
//! wasm boundary). Unknown enum strings are fatal at parse time;
//! out-of-range numbers are clamped so a bad slider value can never
//! halt the animation loop.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual funnel archetype. Each variant carries its own width-profile
/// tuning consumed by `sim::funnel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TornadoType {
    Cone,
    #[default]
    Wedge,
    Rope,
    Needle,
    Segmented,
    Sheathed,
    Loop,
}

impl TornadoType {
    pub const ALL: [TornadoType; 7] = [
        TornadoType::Cone,
        TornadoType::Wedge,
        TornadoType::Rope,
        TornadoType::Needle,
        TornadoType::Segmented,
        TornadoType::Sheathed,
        TornadoType::Loop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TornadoType::Cone => "cone",
            TornadoType::Wedge => "wedge",
            TornadoType::Rope => "rope",
            TornadoType::Needle => "needle",
            TornadoType::Segmented => "segmented",
            TornadoType::Sheathed => "sheathed",
            TornadoType::Loop => "loop",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "cone" => Ok(TornadoType::Cone),
            "wedge" => Ok(TornadoType::Wedge),
            "rope" => Ok(TornadoType::Rope),
            "needle" => Ok(TornadoType::Needle),
            "segmented" => Ok(TornadoType::Segmented),
            "sheathed" => Ok(TornadoType::Sheathed),
            "loop" => Ok(TornadoType::Loop),
            _ => Err(ConfigError::UnknownType(s.to_string())),
        }
    }

    /// Reference funnel dimensions (top width, base width) in scene
    /// pixels, before size-percent and EF scaling.
    pub fn reference_widths(&self) -> (f32, f32) {
        match self {
            TornadoType::Cone => (260.0, 120.0),
            TornadoType::Wedge => (430.0, 220.0),
            TornadoType::Rope => (110.0, 55.0),
            TornadoType::Needle => (120.0, 38.0),
            TornadoType::Segmented => (260.0, 140.0),
            TornadoType::Sheathed => (300.0, 130.0),
            TornadoType::Loop => (160.0, 60.0),
        }
    }
}

/// Enhanced Fujita intensity class. Hit radius, damage per hit and the
/// funnel size multiplier all scale monotonically from EF0 to EF5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum EfScale {
    #[serde(rename = "EF0")]
    Ef0,
    #[serde(rename = "EF1")]
    Ef1,
    #[serde(rename = "EF2")]
    Ef2,
    #[default]
    #[serde(rename = "EF3")]
    Ef3,
    #[serde(rename = "EF4")]
    Ef4,
    #[serde(rename = "EF5")]
    Ef5,
}

impl EfScale {
    pub const ALL: [EfScale; 6] = [
        EfScale::Ef0,
        EfScale::Ef1,
        EfScale::Ef2,
        EfScale::Ef3,
        EfScale::Ef4,
        EfScale::Ef5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EfScale::Ef0 => "EF0",
            EfScale::Ef1 => "EF1",
            EfScale::Ef2 => "EF2",
            EfScale::Ef3 => "EF3",
            EfScale::Ef4 => "EF4",
            EfScale::Ef5 => "EF5",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_uppercase().as_str() {
            "EF0" => Ok(EfScale::Ef0),
            "EF1" => Ok(EfScale::Ef1),
            "EF2" => Ok(EfScale::Ef2),
            "EF3" => Ok(EfScale::Ef3),
            "EF4" => Ok(EfScale::Ef4),
            "EF5" => Ok(EfScale::Ef5),
            _ => Err(ConfigError::UnknownEf(s.to_string())),
        }
    }

    /// Impact radius in normalized map units
    pub fn hit_radius(&self) -> f32 {
        match self {
            EfScale::Ef0 => 0.030,
            EfScale::Ef1 => 0.038,
            EfScale::Ef2 => 0.046,
            EfScale::Ef3 => 0.056,
            EfScale::Ef4 => 0.075,
            EfScale::Ef5 => 0.095,
        }
    }

    /// Damage score credited per entity hit
    pub fn damage_per_hit(&self) -> u32 {
        match self {
            EfScale::Ef0 => 20,
            EfScale::Ef1 => 45,
            EfScale::Ef2 => 75,
            EfScale::Ef3 => 115,
            EfScale::Ef4 => 170,
            EfScale::Ef5 => 250,
        }
    }

    /// Mild funnel size multiplier applied on top of the type widths
    pub fn size_scale(&self) -> f32 {
        match self {
            EfScale::Ef0 => 0.80,
            EfScale::Ef1 => 0.88,
            EfScale::Ef2 => 0.96,
            EfScale::Ef3 => 1.04,
            EfScale::Ef4 => 1.19,
            EfScale::Ef5 => 1.35,
        }
    }
}

/// Funnel rotation sense. Consumed only by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinDirection {
    #[default]
    Cyclonic,
    AntiCyclonic,
}

impl SpinDirection {
    /// Sign factor for the renderer's band animation
    pub fn sign(&self) -> f32 {
        match self {
            SpinDirection::Cyclonic => 1.0,
            SpinDirection::AntiCyclonic => -1.0,
        }
    }
}

fn default_formation_secs() -> f32 {
    3.0
}
fn default_mature_secs() -> f32 {
    14.0
}
fn default_rope_out_secs() -> f32 {
    10.0
}
fn default_true() -> bool {
    true
}
fn default_size_percent() -> f32 {
    100.0
}

/// Full configuration surface read by the sim each tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StormConfig {
    #[serde(default)]
    pub tornado_type: TornadoType,
    #[serde(default)]
    pub ef: EfScale,
    #[serde(default)]
    pub spin: SpinDirection,
    /// Seconds spent in Forming before the funnel reaches the ground;
    /// 0 promotes to Mature immediately
    #[serde(default = "default_formation_secs")]
    pub formation_secs: f32,
    /// Seconds spent in Mature before rope-out begins
    #[serde(default = "default_mature_secs")]
    pub mature_secs: f32,
    /// Seconds rope-out takes to run to completion
    #[serde(default = "default_rope_out_secs")]
    pub rope_out_secs: f32,
    /// Freeze the storm at rope-out instead of letting it dissipate
    #[serde(default = "default_true")]
    pub keep_alive: bool,
    /// When false the storm stays Mature forever
    #[serde(default = "default_true")]
    pub rope_out_enabled: bool,
    /// Suspend stage-time accumulation without losing progress
    #[serde(default)]
    pub paused: bool,
    /// Funnel top width as a percentage of the type reference (0-100)
    #[serde(default = "default_size_percent")]
    pub top_size_percent: f32,
    /// Funnel base width as a percentage of the type reference (0-100)
    #[serde(default = "default_size_percent")]
    pub base_size_percent: f32,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            tornado_type: TornadoType::default(),
            ef: EfScale::default(),
            spin: SpinDirection::default(),
            formation_secs: default_formation_secs(),
            mature_secs: default_mature_secs(),
            rope_out_secs: default_rope_out_secs(),
            keep_alive: true,
            rope_out_enabled: true,
            paused: false,
            top_size_percent: default_size_percent(),
            base_size_percent: default_size_percent(),
        }
    }
}

impl StormConfig {
    /// Parse a JSON config from the UI layer. Unknown enum values are
    /// fatal; numeric fields are clamped afterward by `sanitize`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: StormConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;
        config.sanitize();
        Ok(config)
    }

    /// Clamp numeric fields into their valid ranges. Sliders can't
    /// produce bad values but a hand-edited JSON payload can.
    pub fn sanitize(&mut self) {
        if self.formation_secs < 0.0 {
            log::warn!("negative formation_secs {}, clamping to 0", self.formation_secs);
            self.formation_secs = 0.0;
        }
        if self.mature_secs < 1.0 {
            self.mature_secs = 1.0;
        }
        if self.rope_out_secs < 1.0 {
            self.rope_out_secs = 1.0;
        }
        self.top_size_percent = self.top_size_percent.clamp(0.0, 100.0);
        self.base_size_percent = self.base_size_percent.clamp(0.0, 100.0);
    }
}

/// Fatal configuration errors, rejected at the input boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownType(String),
    UnknownEf(String),
    InvalidJson(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownType(s) => write!(f, "unknown tornado type: {s:?}"),
            ConfigError::UnknownEf(s) => write!(f, "unknown EF class: {s:?}"),
            ConfigError::InvalidJson(s) => write!(f, "invalid config JSON: {s}"),
        }
    }
}

impl std::error::Error for ConfigError {}
