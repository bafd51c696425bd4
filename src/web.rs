//! wasm-bindgen bridge for the JS render adapter
//!
//! The JS side owns the canvas, control panel and animation loop; this
//! wrapper owns the sim. Per frame: push input via `tick`, pull a JSON
//! `snapshot` to draw. Config changes arrive as JSON whenever a control
//! moves.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::config::StormConfig;
use crate::sim::{self, SimState, TickInput};
use crate::snapshot::RenderSnapshot;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct TornadoSim {
    state: SimState,
    config: StormConfig,
    pending: TickInput,
}

#[wasm_bindgen]
impl TornadoSim {
    /// Create a sim with a reproducible seed
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> TornadoSim {
        let config = StormConfig::default();
        TornadoSim {
            state: SimState::new(seed as u64, &config),
            config,
            pending: TickInput::default(),
        }
    }

    /// Replace the active config from a JSON payload. Unknown enum
    /// values reject the whole payload; the old config stays in force.
    pub fn set_config(&mut self, json: &str) -> Result<(), JsValue> {
        match StormConfig::from_json(json) {
            Ok(config) => {
                self.config = config;
                Ok(())
            }
            Err(e) => {
                log::error!("rejected config: {e}");
                Err(JsValue::from_str(&e.to_string()))
            }
        }
    }

    /// Queue a full reset for the next tick
    pub fn new_storm(&mut self) {
        self.pending.new_storm = true;
    }

    /// Queue a damage-only reset for the next tick
    pub fn reset_damage(&mut self) {
        self.pending.reset_damage = true;
    }

    /// Re-roll type/EF/spin and restart. Returns the updated config as
    /// JSON so the control panel can sync its widgets.
    pub fn randomize_storm(&mut self) -> String {
        sim::randomize_storm(&mut self.state, &mut self.config);
        serde_json::to_string(&self.config).unwrap_or_default()
    }

    /// Advance the sim one animation frame
    pub fn tick(&mut self, dt: f32, steer_x: f32, steer_y: f32) {
        self.pending.steer = Vec2::new(steer_x.clamp(-1.0, 1.0), steer_y.clamp(-1.0, 1.0));
        sim::tick(&mut self.state, &self.pending, &self.config, dt);
        self.pending = TickInput::default();
    }

    /// Current frame's drawing state as JSON
    pub fn snapshot(&self) -> String {
        let snap = RenderSnapshot::capture(&self.state, &self.config);
        serde_json::to_string(&snap).unwrap_or_default()
    }
}
