//! Gameplay tuning dials
//!
//! Every rule constant that is a choice rather than a law lives here, so a
//! variant ruleset is one JSON blob away. Persisted separately from the best
//! score in LocalStorage.

use serde::{Deserialize, Serialize};

/// What the difficulty ramp keys off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyDriver {
    /// Total drops spawned this session (the classic rule)
    #[default]
    SpawnCount,
    /// Current score
    Score,
}

impl DifficultyDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyDriver::SpawnCount => "spawn-count",
            DifficultyDriver::Score => "score",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spawn-count" | "spawns" => Some(DifficultyDriver::SpawnCount),
            "score" => Some(DifficultyDriver::Score),
            _ => None,
        }
    }
}

/// Gameplay tuning values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Difficulty ramp input
    pub driver: DifficultyDriver,

    // === Spawn cadence ===
    /// Delay between spawns at difficulty 0 (ms)
    pub spawn_base_ms: u32,
    /// Cadence floor (ms)
    pub spawn_min_ms: u32,
    /// Cadence reduction per difficulty point (ms)
    pub spawn_decrement_ms: u32,

    // === Fall speed ===
    /// Slowest possible speed at difficulty 0 (px per frame)
    pub base_speed: f32,
    /// Base speed gain per difficulty point
    pub speed_increment: f32,

    // === Scoring ===
    /// Probability a spawned drop is golden (0.0 - 1.0)
    pub golden_chance: f64,
    /// Points per popped drop
    pub points_per_hit: u32,
    /// Points lost per answer that matched nothing
    pub points_per_miss: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            driver: DifficultyDriver::SpawnCount,

            spawn_base_ms: 2000,
            spawn_min_ms: 500,
            spawn_decrement_ms: 20,

            base_speed: 0.5,
            speed_increment: 0.005,

            golden_chance: 0.2,
            points_per_hit: 50,
            points_per_miss: 75,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "math_rain_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(tuning) = serde_json::from_str(&json) {
                    log::info!("Loaded tuning from LocalStorage");
                    return tuning;
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
