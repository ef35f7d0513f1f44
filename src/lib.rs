//! Math Rain - falling arithmetic drops versus a rising sea
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (problem generation, drop physics, scoring)
//! - `renderer`: Canvas-2D drawing of drops and the sea overlay
//! - `platform`: Browser scheduling (cancellable frame loop, re-armable interval)
//! - `scores`: Best-score persistence in LocalStorage
//! - `tuning`: Data-driven game balance

pub mod scores;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use scores::BestScore;
pub use tuning::{DifficultyDriver, Tuning};

/// Game configuration constants
pub mod consts {
    /// Playfield width in CSS pixels (backing store is scaled by devicePixelRatio)
    pub const CANVAS_WIDTH: f32 = 1200.0;
    /// Playfield height - fixed 16:9 aspect
    pub const CANVAS_HEIGHT: f32 = (CANVAS_WIDTH / 16.0) * 9.0;

    /// Drop extent (square bounding box, also the text layout unit)
    pub const DROP_SIZE: f32 = 112.0;

    /// Sea level at the start of a game (fraction of playfield height)
    pub const SEA_LEVEL_START: f32 = 0.1;
    /// Sea level rise per miss (fraction of playfield height)
    pub const SEA_LEVEL_STEP: f32 = 0.1;
}
