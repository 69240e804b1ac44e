use flock_core::{Flock, FlockConfig, Size};
use flock_shared::{FlockSettings, SettingsUpdate, StatusResponse};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[cfg(not(target_arch = "wasm32"))]
fn log(_s: &str) {}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

/// Driver-facing handle over the flock simulator.
///
/// The embedding page owns the frame loop, the canvas and the compass; this
/// type only advances the simulation and reads agent state back out.
#[wasm_bindgen]
pub struct FlockSimulation {
    flock: Flock,
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl FlockSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, agent_count: usize, seed: u64) -> FlockSimulation {
        console_log!("Initializing flock simulation with {} agents", agent_count);

        let config = FlockConfig {
            agent_count,
            seed,
            ..FlockConfig::default()
        };

        FlockSimulation {
            flock: Flock::new(config),
            width,
            height,
        }
    }

    /// Advance one frame. `time` is the driver's clock in seconds;
    /// `heading` is the optional compass reading in degrees.
    pub fn tick(&mut self, time: f64, heading: Option<f64>) {
        self.flock
            .tick(time, Size::new(self.width, self.height), heading);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        console_log!("Resized to {}x{}", width, height);
    }

    pub fn agent_count(&self) -> usize {
        self.flock.boids.len()
    }

    /// Flat agent read-out for the renderer: x, y, orientation (radians)
    /// and visual tag per agent, in display order.
    pub fn agents(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.flock.boids.len() * 4);
        for boid in &self.flock.boids {
            out.push(boid.position.x);
            out.push(boid.position.y);
            out.push(boid.velocity.direction());
            out.push(boid.tag.0 as f64);
        }
        out
    }

    /// Flat vision-sector read-out for the debug overlay: center x,
    /// center y, heading, width and radius per agent.
    pub fn vision_sectors(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.flock.boids.len() * 5);
        for boid in &self.flock.boids {
            let sector = boid.vision();
            out.push(sector.center.x);
            out.push(sector.center.y);
            out.push(sector.heading);
            out.push(sector.width);
            out.push(sector.radius);
        }
        out
    }

    /// Applies a JSON `SettingsUpdate` sent by the driver
    pub fn apply_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let update: SettingsUpdate =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.apply(update.settings);
        Ok(())
    }

    pub fn status_json(&self) -> Result<String, JsValue> {
        let status = StatusResponse {
            agent_count: self.flock.boids.len(),
            heading_force_active: self.flock.config.heading_force_enabled,
        };
        serde_json::to_string(&status).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_max_speed(&mut self, speed: f64) {
        self.flock.config.max_speed = speed;
    }

    pub fn set_max_force(&mut self, force: f64) {
        self.flock.config.max_force = force;
    }

    pub fn set_vision_radius(&mut self, radius: f64) {
        self.flock.config.vision_radius = radius;
        for boid in self.flock.boids.iter_mut() {
            boid.vision_radius = radius;
        }
    }

    pub fn set_heading_force_enabled(&mut self, enabled: bool) {
        self.flock.config.heading_force_enabled = enabled;
    }

    pub fn set_heading_weight(&mut self, weight: f64) {
        self.flock.config.heading_weight = weight;
    }

    fn apply(&mut self, settings: FlockSettings) {
        self.set_vision_radius(settings.vision_radius);
        self.flock.config.max_speed = settings.max_speed;
        self.flock.config.max_force = settings.max_force;
        self.flock.config.alignment_weight = settings.alignment_weight;
        self.flock.config.cohesion_weight = settings.cohesion_weight;
        self.flock.config.separation_weight = settings.separation_weight;
        self.flock.config.heading_weight = settings.heading_weight;
        self.flock.config.heading_force_enabled = settings.heading_force_enabled;
    }
}
