//! Runtime configuration for a particle backdrop

use std::time::Duration;

use particle_physics::{Attraction, SpawnParams};
use particle_renderer::LinkStyle;

/// Debounce used by the constellation layout
pub const CONSTELLATION_DEBOUNCE: Duration = Duration::from_millis(250);

/// How many physics steps one frame may run when catching up on a slow frame
pub const MAX_STEPS_PER_FRAME: u32 = 8;

/// How often (in ticks) frame stats are logged
pub const DEFAULT_STATS_INTERVAL: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub spawn: SpawnParams,
    pub attraction: Attraction,
    pub links: LinkStyle,

    /// Quiet period after the last resize before the field is rebuilt.
    /// Zero rebuilds on every resize notification.
    pub resize_debounce: Duration,

    /// `None`: one physics step per host frame, so speed follows the display
    /// refresh rate. `Some(rate)`: elapsed time is turned into `rate` steps
    /// per second.
    pub ticks_per_second: Option<f32>,

    /// Fixed seed for reproducible layouts; `None` seeds from the OS
    pub seed: Option<u64>,

    /// Log frame stats every this many ticks; 0 disables
    pub stats_interval: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            spawn: SpawnParams::default(),
            attraction: Attraction::default(),
            links: LinkStyle::default(),
            resize_debounce: Duration::ZERO,
            ticks_per_second: None,
            seed: None,
            stats_interval: DEFAULT_STATS_INTERVAL,
        }
    }
}

impl SimulationParams {
    /// Fixed set of nodes, thin links, no pointer reaction, debounced resize
    pub fn constellation() -> Self {
        Self {
            spawn: SpawnParams::constellation(),
            attraction: Attraction::ignore(),
            links: LinkStyle::constellation(),
            resize_debounce: CONSTELLATION_DEBOUNCE,
            ..Self::default()
        }
    }

    /// Look a preset up by name (`chat` or `constellation`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "chat" | "default" => Some(Self::default()),
            "constellation" | "landing" => Some(Self::constellation()),
            _ => None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_resize_debounce(mut self, debounce: Duration) -> Self {
        self.resize_debounce = debounce;
        self
    }

    pub fn with_ticks_per_second(mut self, rate: f32) -> Self {
        self.ticks_per_second = Some(rate);
        self
    }
}
